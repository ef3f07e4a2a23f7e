use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScreenService;
use crate::config::AppConfig;
use crate::gateway::load_screen_data;
use crate::models::{ApiResponse, ErrorCode};
use crate::screens::{Screen, ScreenQuery, compose};

pub async fn list_screen<S: Screen>(
    service: &ScreenService,
    request: &HttpRequest,
    query: ScreenQuery,
) -> ActixResult<HttpResponse> {
    let backend = service.get_backend(request);

    let data = match load_screen_data::<S::Record>(backend.index.as_ref(), S::KIND).await {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to load {} screen data: {}", S::KIND, e);
            return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::RemoteUnavailable,
                format!("Failed to load {} data: {}", S::KIND, e.message()),
            )));
        }
    };

    match compose::<S>(&data, &query, &AppConfig::get().table) {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            view,
            format!("{} screen retrieved successfully", S::KIND),
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UnknownField,
            e.message(),
        ))),
    }
}
