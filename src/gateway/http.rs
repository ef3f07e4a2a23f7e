use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::register::{BoxedRemoteBackendFuture, RemoteBackendConstructor};
use super::{IndexSource, MutationGateway, MutationOutcome, RemoteBackend, RemoteFailure};
use crate::config::RemoteConfig;
use crate::errors::{AdminError, Result};
use crate::models::EntityKind;

pub const BACKEND_NAME: &str = "http";

pub(super) fn constructor() -> RemoteBackendConstructor {
    Arc::new(|config: RemoteConfig| -> BoxedRemoteBackendFuture {
        Box::pin(async move {
            let store = HttpRemoteStore::new(&config)?;
            Ok::<_, AdminError>(RemoteBackend::from_shared(Arc::new(store)))
        })
    })
}

/// Remote store reached over HTTP/JSON.
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(AdminError::config_load(format!(
                "remote.base_url must be an http(s) URL, got '{}'",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        debug!(
            "HttpRemoteStore created for {} (timeout {} ms)",
            config.base_url, config.timeout_ms
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: (!config.api_token.is_empty()).then(|| config.api_token.clone()),
        })
    }

    pub fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.base_url, kind.collection_path())
    }

    pub fn record_url(&self, kind: EntityKind, id: i64) -> String {
        format!("{}/{}", self.collection_url(kind), id)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_mutation(&self, builder: RequestBuilder, target: &str) -> MutationOutcome {
        let response = match self.authorize(builder).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Mutation request to {} failed: {}", target, e);
                return Err(RemoteFailure::transport(e.to_string()));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Mutation accepted by {} ({})", target, status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let failure = parse_failure(status.as_u16(), &body);
        warn!(
            "Mutation rejected by {} ({}): {:?}",
            target, status, failure.errors
        );
        Err(failure)
    }
}

#[async_trait]
impl MutationGateway for HttpRemoteStore {
    async fn create(&self, kind: EntityKind, payload: serde_json::Value) -> MutationOutcome {
        let url = self.collection_url(kind);
        self.send_mutation(self.client.post(&url).json(&payload), &url)
            .await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        payload: serde_json::Value,
    ) -> MutationOutcome {
        let url = self.record_url(kind, id);
        self.send_mutation(self.client.put(&url).json(&payload), &url)
            .await
    }
}

#[async_trait]
impl IndexSource for HttpRemoteStore {
    async fn fetch_index(&self, kind: EntityKind) -> Result<serde_json::Value> {
        let url = self.collection_url(kind);
        let response = self.authorize(self.client.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::remote_rejected(format!(
                "GET {url} answered {status}"
            )));
        }
        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessages {
    Many(Vec<String>),
    One(String),
}

#[derive(Deserialize, Default)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, ErrorMessages>,
}

/// Decodes a rejection body `{ "message": .., "errors": { field: [..] } }`.
/// Missing or malformed bodies degrade to an empty error map.
pub fn parse_failure(status: u16, body: &str) -> RemoteFailure {
    let parsed: FailureBody = serde_json::from_str(body).unwrap_or_default();
    let errors = parsed
        .errors
        .into_iter()
        .map(|(field, messages)| {
            let messages = match messages {
                ErrorMessages::Many(list) => list,
                ErrorMessages::One(message) => vec![message],
            };
            (field, messages)
        })
        .collect();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("Remote store answered HTTP {status}"));
    RemoteFailure::rejected(status, message, errors)
}
