use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::forms::{JurusanSchema, KelasSchema, SemesterSchema, TahunAjaranSchema};
use crate::models::ApiResponse;
use crate::screens::{Screen, ScreenQuery, screen_url};
use crate::services::ScreenService;
use crate::services::screens::FieldInput;

static SCREEN_SERVICE: Lazy<ScreenService> = Lazy::new(ScreenService::new_lazy);

#[derive(Debug, Serialize)]
pub struct ScreenLink {
    pub screen: &'static str,
    pub title: &'static str,
    pub url: String,
}

fn link<S: Screen>() -> ScreenLink {
    ScreenLink {
        screen: S::KIND.collection_path(),
        title: S::TITLE,
        url: screen_url::<S>(),
    }
}

pub async fn list_screens() -> ActixResult<HttpResponse> {
    let links = vec![
        link::<JurusanSchema>(),
        link::<KelasSchema>(),
        link::<SemesterSchema>(),
        link::<TahunAjaranSchema>(),
    ];
    Ok(HttpResponse::Ok().json(ApiResponse::success(links, "Screens retrieved successfully")))
}

pub async fn list_records<S: Screen>(
    req: HttpRequest,
    query: web::Query<ScreenQuery>,
) -> ActixResult<HttpResponse> {
    SCREEN_SERVICE.list::<S>(&req, query.into_inner()).await
}

pub async fn create_record<S: Screen>(
    req: HttpRequest,
    input: web::Json<FieldInput>,
) -> ActixResult<HttpResponse> {
    SCREEN_SERVICE.create::<S>(&req, input.into_inner()).await
}

pub async fn update_record<S: Screen>(
    req: HttpRequest,
    id: web::Path<i64>,
    input: web::Json<FieldInput>,
) -> ActixResult<HttpResponse> {
    SCREEN_SERVICE
        .update::<S>(&req, id.into_inner(), input.into_inner())
        .await
}

fn screen_scope<S: Screen>() -> actix_web::Scope {
    web::scope(&screen_url::<S>())
        .service(
            web::resource("")
                .route(web::get().to(list_records::<S>))
                .route(web::post().to(create_record::<S>)),
        )
        .service(web::resource("/{id}").route(web::put().to(update_record::<S>)))
}

pub fn configure_screen_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin", web::get().to(list_screens))
        .service(screen_scope::<JurusanSchema>())
        .service(screen_scope::<KelasSchema>())
        .service(screen_scope::<SemesterSchema>())
        .service(screen_scope::<TahunAjaranSchema>());
}
