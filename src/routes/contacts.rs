use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::contacts::requests::{ContactListParams, ContactRequest};
use crate::models::users::entities::UserRole;
use crate::services::ContactService;
use crate::utils::SafeIDI64;

static CONTACT_SERVICE: Lazy<ContactService> = Lazy::new(ContactService::new_lazy);

pub async fn list_contacts(
    req: HttpRequest,
    query: web::Query<ContactListParams>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.list_contacts(query.into_inner(), &req).await
}

pub async fn create_contact(
    req: HttpRequest,
    body: web::Json<ContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.create_contact(body.into_inner(), &req).await
}

pub async fn get_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.get_contact(id.0, &req).await
}

pub async fn update_contact(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .update_contact(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.delete_contact(id.0, &req).await
}

// 配置路由（仅超级管理员）
pub fn configure_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/contacts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::super_admin_roles()))
                    .route("", web::get().to(list_contacts))
                    .route("", web::post().to(create_contact))
                    .route("/{id}", web::get().to(get_contact))
                    .route("/{id}", web::put().to(update_contact))
                    .route("/{id}", web::delete().to(delete_contact)),
            ),
    );
}
