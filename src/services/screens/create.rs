use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FieldInput, ScreenService, apply_input, new_form, submit_form};
use crate::screens::Screen;

pub async fn create_record<S: Screen>(
    service: &ScreenService,
    request: &HttpRequest,
    input: FieldInput,
) -> ActixResult<HttpResponse> {
    let backend = service.get_backend(request);
    let (form, toasts) = new_form::<S>(&backend);

    form.open(None);
    if let Err(resp) = apply_input(&form, input) {
        return Ok(resp);
    }

    Ok(submit_form(&form, &toasts, StatusCode::CREATED).await)
}
