use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

use super::{RemoteBackend, http, memory};
use crate::config::RemoteConfig;
use crate::errors::Result;

pub type BoxedRemoteBackendFuture = Pin<Box<dyn Future<Output = Result<RemoteBackend>> + Send>>;
pub type RemoteBackendConstructor =
    Arc<dyn Fn(RemoteConfig) -> BoxedRemoteBackendFuture + Send + Sync>;

static REMOTE_BACKEND_REGISTRY: Lazy<RwLock<HashMap<String, RemoteBackendConstructor>>> =
    Lazy::new(|| {
        let mut builtin: HashMap<String, RemoteBackendConstructor> = HashMap::new();
        builtin.insert(http::BACKEND_NAME.to_string(), http::constructor());
        builtin.insert(memory::BACKEND_NAME.to_string(), memory::constructor());
        RwLock::new(builtin)
    });

pub fn register_remote_backend<S: Into<String>>(name: S, constructor: RemoteBackendConstructor) {
    let name = name.into();
    let mut registry = REMOTE_BACKEND_REGISTRY
        .write()
        .expect("Remote backend registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_remote_backend(name: &str) -> Option<RemoteBackendConstructor> {
    REMOTE_BACKEND_REGISTRY
        .read()
        .expect("Remote backend registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_remote_backend_registry() {
    let registry = REMOTE_BACKEND_REGISTRY
        .read()
        .expect("Remote backend registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No remote backends registered.");
    } else {
        tracing::debug!("Registered remote backends:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
