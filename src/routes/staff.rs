use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IdsRequest;
use crate::models::staff::requests::{
    AssignSubjectsRequest, PositionHistoryRequest, StaffListParams, StaffRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StaffService;
use crate::utils::{SafeIDI64, SafeNestedIDI64};

static STAFF_SERVICE: Lazy<StaffService> = Lazy::new(StaffService::new_lazy);

pub async fn list_staff(
    req: HttpRequest,
    query: web::Query<StaffListParams>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.list_staff(query.into_inner(), &req).await
}

pub async fn create_staff(
    req: HttpRequest,
    body: web::Json<StaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.create_staff(body.into_inner(), &req).await
}

pub async fn get_staff(req: HttpRequest, staff_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.get_staff(staff_id.0, &req).await
}

pub async fn update_staff(
    req: HttpRequest,
    staff_id: SafeIDI64,
    body: web::Json<StaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .update_staff(staff_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_staff(req: HttpRequest, staff_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.delete_staff(staff_id.0, &req).await
}

pub async fn bulk_delete_staff(
    req: HttpRequest,
    body: web::Json<IdsRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.bulk_delete_staff(body.into_inner(), &req).await
}

pub async fn assign_subjects(
    req: HttpRequest,
    staff_id: SafeIDI64,
    body: web::Json<AssignSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .assign_subjects(staff_id.0, body.into_inner(), &req)
        .await
}

// 路径 /{id}/subjects/{item_id}
pub async fn remove_subject(req: HttpRequest, ids: SafeNestedIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.remove_subject(ids.0, ids.1, &req).await
}

pub async fn create_position_history(
    req: HttpRequest,
    body: web::Json<PositionHistoryRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .create_position_history(body.into_inner(), &req)
        .await
}

pub async fn update_position_history(
    req: HttpRequest,
    history_id: SafeIDI64,
    body: web::Json<PositionHistoryRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .update_position_history(history_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_position_history(
    req: HttpRequest,
    history_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.delete_position_history(history_id.0, &req).await
}

pub async fn bulk_delete_position_history(
    req: HttpRequest,
    body: web::Json<IdsRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .bulk_delete_position_history(body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_staff_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/staff")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_staff))
                    .route("", web::post().to(create_staff))
                    .route("/bulk-delete", web::post().to(bulk_delete_staff))
                    .route("/{id}", web::get().to(get_staff))
                    .route("/{id}", web::put().to(update_staff))
                    .route("/{id}", web::delete().to(delete_staff))
                    .route("/{id}/subjects", web::put().to(assign_subjects))
                    .route("/{id}/subjects/{item_id}", web::delete().to(remove_subject)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/position-history")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_position_history))
                    .route("/bulk-delete", web::post().to(bulk_delete_position_history))
                    .route("/{id}", web::put().to(update_position_history))
                    .route("/{id}", web::delete().to(delete_position_history)),
            ),
    );
}
