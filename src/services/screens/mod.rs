pub mod create;
pub mod list;
pub mod update;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use crate::errors::AdminError;
use crate::forms::{FieldOf, FormController, SubmitOutcome, errors_by_name};
use crate::gateway::RemoteBackend;
use crate::models::{ApiResponse, ErrorCode};
use crate::notify::Toast;
use crate::screens::{Screen, ScreenQuery};
use crate::utils::validate::FieldValue;

/// Request body of a create or edit: wire field name -> value.
pub type FieldInput = serde_json::Map<String, serde_json::Value>;

pub struct ScreenService {
    backend: Option<RemoteBackend>,
}

impl ScreenService {
    pub fn new_lazy() -> Self {
        Self { backend: None }
    }

    /// Service bound to a backend instead of the one in app data.
    pub fn with_backend(backend: RemoteBackend) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub(crate) fn get_backend(&self, request: &HttpRequest) -> RemoteBackend {
        if let Some(backend) = &self.backend {
            backend.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<RemoteBackend>>()
                .expect("Remote backend not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Screen view: stats, table page and form options
    pub async fn list<S: Screen>(
        &self,
        request: &HttpRequest,
        query: ScreenQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_screen::<S>(self, request, query).await
    }

    pub async fn create<S: Screen>(
        &self,
        request: &HttpRequest,
        input: FieldInput,
    ) -> ActixResult<HttpResponse> {
        create::create_record::<S>(self, request, input).await
    }

    pub async fn update<S: Screen>(
        &self,
        request: &HttpRequest,
        id: i64,
        input: FieldInput,
    ) -> ActixResult<HttpResponse> {
        update::update_record::<S>(self, request, id, input).await
    }
}

/// Outcome of a form submission as returned to the client.
#[derive(Debug, Serialize)]
pub struct SubmitReport {
    pub saved: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<&'static str, String>,
    pub toasts: Vec<Toast>,
}

/// Feeds request fields into the form. Unknown names and wrong value types
/// are rejected before anything is validated.
pub(crate) fn apply_input<S: Screen>(
    form: &FormController<S>,
    input: FieldInput,
) -> Result<(), HttpResponse> {
    for (name, value) in input {
        let value: FieldValue = match value {
            serde_json::Value::String(text) => text.into(),
            serde_json::Value::Bool(flag) => flag.into(),
            serde_json::Value::Number(number) => number.to_string().into(),
            serde_json::Value::Null => String::new().into(),
            other => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Field '{name}' has an unsupported value: {other}"),
                )));
            }
        };
        if let Err(e) = form.change_field_by_name(&name, value) {
            return Err(bad_input(e));
        }
    }
    Ok(())
}

fn bad_input(e: AdminError) -> HttpResponse {
    let code = match e {
        AdminError::UnknownField(_) => ErrorCode::UnknownField,
        _ => ErrorCode::BadRequest,
    };
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, e.message()))
}

pub(crate) async fn submit_form<S: Screen>(
    form: &FormController<S>,
    toasts: &crate::notify::FlashNotifier,
    saved_status: StatusCode,
) -> HttpResponse {
    let outcome: SubmitOutcome<FieldOf<S>> = form.submit().await;
    let (status, code, message, errors) = match outcome {
        SubmitOutcome::Saved => (
            saved_status,
            ErrorCode::Success,
            format!("{} saved", S::KIND),
            BTreeMap::new(),
        ),
        SubmitOutcome::Invalid(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValidationFailed,
            format!("{} form has invalid fields", S::KIND),
            errors_by_name(&errors),
        ),
        SubmitOutcome::Failed(failure) if failure.is_validation() => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::RemoteRejected,
            failure.message,
            BTreeMap::new(),
        ),
        SubmitOutcome::Failed(failure) => (
            StatusCode::BAD_GATEWAY,
            match failure.status {
                Some(_) => ErrorCode::RemoteRejected,
                None => ErrorCode::RemoteUnavailable,
            },
            failure.message,
            BTreeMap::new(),
        ),
        SubmitOutcome::Ignored => {
            warn!("{} submit ignored: form busy", S::KIND);
            (
                StatusCode::CONFLICT,
                ErrorCode::FormBusy,
                format!("{} form is busy", S::KIND),
                BTreeMap::new(),
            )
        }
    };

    let report = SubmitReport {
        saved: code == ErrorCode::Success,
        errors,
        toasts: toasts.take(),
    };
    let body = if report.saved {
        ApiResponse::success(report, message)
    } else {
        ApiResponse::error(code, report, message)
    };
    HttpResponse::build(status).json(body)
}

pub(crate) fn new_form<S: Screen>(
    backend: &RemoteBackend,
) -> (FormController<S>, Arc<crate::notify::FlashNotifier>) {
    let toasts = Arc::new(crate::notify::FlashNotifier::new());
    let form = FormController::new(backend.gateway.clone(), toasts.clone());
    (form, toasts)
}
