use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{FieldInput, ScreenService, apply_input, new_form, submit_form};
use crate::gateway::load_screen_data;
use crate::models::{ApiResponse, ErrorCode};
use crate::screens::Screen;
use crate::table::TableRecord;

/// Edits an existing record. Fields missing from the body keep the values
/// the form was seeded with.
pub async fn update_record<S: Screen>(
    service: &ScreenService,
    request: &HttpRequest,
    id: i64,
    input: FieldInput,
) -> ActixResult<HttpResponse> {
    let backend = service.get_backend(request);

    let data = match load_screen_data::<S::Record>(backend.index.as_ref(), S::KIND).await {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to load {} records for edit: {}", S::KIND, e);
            return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::RemoteUnavailable,
                format!("Failed to load {} data: {}", S::KIND, e.message()),
            )));
        }
    };

    let record = match data.records.into_iter().find(|record| record.row_id() == id) {
        Some(record) => record,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                format!("{} {} not found", S::KIND, id),
            )));
        }
    };

    let (form, toasts) = new_form::<S>(&backend);
    form.open(Some(record));
    if let Err(resp) = apply_input(&form, input) {
        return Ok(resp);
    }

    Ok(submit_form(&form, &toasts, StatusCode::OK).await)
}
