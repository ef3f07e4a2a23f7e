use tracing::{debug, warn};

use crate::config::{AppConfig, RemoteConfig};
use crate::errors::{AdminError, Result};
use crate::gateway::RemoteBackend;
use crate::gateway::register::{debug_remote_backend_registry, get_remote_backend};

pub struct StartupContext {
    pub backend: RemoteBackend,
}

async fn construct(name: &str, config: &RemoteConfig) -> Result<RemoteBackend> {
    let constructor = get_remote_backend(name).ok_or_else(|| {
        AdminError::remote_backend_not_found(format!(
            "Remote backend '{name}' not found in registry"
        ))
    })?;
    constructor(config.clone()).await
}

/// Creates the configured remote backend. In development a broken or
/// unknown backend falls back to the in-memory store.
pub async fn create_remote_backend(config: &AppConfig) -> Result<RemoteBackend> {
    let name = config.remote.backend.as_str();
    warn!("Attempting to create {} remote backend", name);

    match construct(name, &config.remote).await {
        Ok(backend) => {
            warn!("Successfully created {} remote backend", name);
            Ok(backend)
        }
        Err(e) if config.is_development() && name != "memory" => {
            warn!("Failed to create {} remote backend: {}", name, e);
            warn!("Falling back to in-memory remote store with demo data");
            construct("memory", &config.remote).await
        }
        Err(e) => Err(e),
    }
}

/// Prepares everything the HTTP server needs before binding.
pub async fn prepare_server_startup() -> StartupContext {
    if cfg!(debug_assertions) {
        debug_remote_backend_registry();
        debug!("Debug mode: remote backend registry listed");
    }

    let config = AppConfig::get();
    let backend = create_remote_backend(config)
        .await
        .expect("Failed to create remote backend");
    warn!("Remote backend initialized");

    StartupContext { backend }
}
