//! Remote store boundary.
//!
//! Mutations go through [`MutationGateway`] and reads through [`IndexSource`].
//! Backends (`http`, `memory`) register themselves by name in [`register`]
//! and are selected from `remote.backend` at startup.

pub mod http;
pub mod memory;
pub mod register;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{EntityKind, ScreenData};

/// Failure of one mutation attempt, as reported by the remote validator or
/// the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFailure {
    /// HTTP status when the store answered, `None` for transport failures.
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: String,
    /// Field name -> messages from the remote validator.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl RemoteFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn rejected(
        status: u16,
        message: impl Into<String>,
        errors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            errors,
        }
    }

    /// The store rejected the payload itself (HTTP 422).
    pub fn is_validation(&self) -> bool {
        self.status == Some(422)
    }
}

pub type MutationOutcome = std::result::Result<(), RemoteFailure>;

/// Create or update, chosen by whether the form was opened with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationIntent {
    Create,
    Update { id: i64 },
}

#[async_trait]
pub trait MutationGateway: Send + Sync {
    /// `POST /{collection}` with the full field mapping.
    async fn create(&self, kind: EntityKind, payload: serde_json::Value) -> MutationOutcome;

    /// `PUT /{collection}/{id}` with the full field mapping.
    async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        payload: serde_json::Value,
    ) -> MutationOutcome;
}

#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Raw screen data (`records`, `stats`, `options`) for one collection.
    async fn fetch_index(&self, kind: EntityKind) -> Result<serde_json::Value>;
}

/// Fetches and decodes a screen's data.
pub async fn load_screen_data<T: DeserializeOwned>(
    source: &dyn IndexSource,
    kind: EntityKind,
) -> Result<ScreenData<T>> {
    let raw = source.fetch_index(kind).await?;
    Ok(serde_json::from_value(raw)?)
}

type SuccessHook<'a> = Box<dyn FnOnce() + Send + 'a>;
type ErrorHook<'a> = Box<dyn FnOnce(&RemoteFailure) + Send + 'a>;
type FinishHook<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Completion hooks of one mutation. Settling consumes the hooks, so each
/// fires at most once and `on_finish` fires exactly once.
#[derive(Default)]
pub struct MutationHooks<'a> {
    on_success: Option<SuccessHook<'a>>,
    on_error: Option<ErrorHook<'a>>,
    on_finish: Option<FinishHook<'a>>,
}

impl<'a> MutationHooks<'a> {
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_error: None,
            on_finish: None,
        }
    }

    pub fn on_success(mut self, hook: impl FnOnce() + Send + 'a) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(&RemoteFailure) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn on_finish(mut self, hook: impl FnOnce() + Send + 'a) -> Self {
        self.on_finish = Some(Box::new(hook));
        self
    }

    pub fn settle(self, outcome: &MutationOutcome) {
        match outcome {
            Ok(()) => {
                if let Some(hook) = self.on_success {
                    hook();
                }
            }
            Err(failure) => {
                if let Some(hook) = self.on_error {
                    hook(failure);
                }
            }
        }
        if let Some(hook) = self.on_finish {
            hook();
        }
    }
}

/// Runs one mutation to completion and settles its hooks. No retries.
pub async fn dispatch(
    gateway: &dyn MutationGateway,
    kind: EntityKind,
    intent: MutationIntent,
    payload: serde_json::Value,
    hooks: MutationHooks<'_>,
) -> MutationOutcome {
    let outcome = match intent {
        MutationIntent::Create => gateway.create(kind, payload).await,
        MutationIntent::Update { id } => gateway.update(kind, id, payload).await,
    };
    hooks.settle(&outcome);
    outcome
}

/// Both halves of a configured remote store.
#[derive(Clone)]
pub struct RemoteBackend {
    pub gateway: Arc<dyn MutationGateway>,
    pub index: Arc<dyn IndexSource>,
}

impl RemoteBackend {
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: MutationGateway + IndexSource + 'static,
    {
        Self {
            gateway: backend.clone(),
            index: backend,
        }
    }
}
