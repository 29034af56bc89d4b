use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::pages::requests::{PageListParams, PageRequest};
use crate::models::users::entities::UserRole;
use crate::services::PageService;
use crate::utils::SafeIDI64;

static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);

pub async fn list_pages(
    req: HttpRequest,
    query: web::Query<PageListParams>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.list_pages(query.into_inner(), &req).await
}

pub async fn create_page(req: HttpRequest, body: web::Json<PageRequest>) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.create_page(body.into_inner(), &req).await
}

pub async fn get_page(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.get_page(id.0, &req).await
}

pub async fn update_page(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<PageRequest>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.update_page(id.0, body.into_inner(), &req).await
}

pub async fn delete_page(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.delete_page(id.0, &req).await
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/pages")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_pages))
                    .route("", web::post().to(create_page))
                    .route("/{id}", web::get().to(get_page))
                    .route("/{id}", web::put().to(update_page))
                    .route("/{id}", web::delete().to(delete_page)),
            ),
    );
}
