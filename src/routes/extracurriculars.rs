use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IdsRequest;
use crate::models::extracurriculars::requests::{
    AssignStudentsRequest, ExtracurricularListParams, ExtracurricularRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ExtracurricularService;
use crate::utils::{SafeIDI64, SafeNestedIDI64};

static EXTRACURRICULAR_SERVICE: Lazy<ExtracurricularService> =
    Lazy::new(ExtracurricularService::new_lazy);

pub async fn list_extracurriculars(
    req: HttpRequest,
    query: web::Query<ExtracurricularListParams>,
) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .list_extracurriculars(query.into_inner(), &req)
        .await
}

pub async fn create_extracurricular(
    req: HttpRequest,
    body: web::Json<ExtracurricularRequest>,
) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .create_extracurricular(body.into_inner(), &req)
        .await
}

pub async fn get_extracurricular(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE.get_extracurricular(id.0, &req).await
}

pub async fn update_extracurricular(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ExtracurricularRequest>,
) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .update_extracurricular(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_extracurricular(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .delete_extracurricular(id.0, &req)
        .await
}

pub async fn bulk_delete_extracurriculars(
    req: HttpRequest,
    body: web::Json<IdsRequest>,
) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .bulk_delete_extracurriculars(body.into_inner(), &req)
        .await
}

pub async fn assign_students(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignStudentsRequest>,
) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .assign_students(id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_student(req: HttpRequest, ids: SafeNestedIDI64) -> ActixResult<HttpResponse> {
    EXTRACURRICULAR_SERVICE
        .remove_student(ids.0, ids.1, &req)
        .await
}

// 配置路由
pub fn configure_extracurricular_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/extracurriculars")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_extracurriculars))
                    .route("", web::post().to(create_extracurricular))
                    .route("/bulk-delete", web::post().to(bulk_delete_extracurriculars))
                    .route("/{id}", web::get().to(get_extracurricular))
                    .route("/{id}", web::put().to(update_extracurricular))
                    .route("/{id}", web::delete().to(delete_extracurricular))
                    .route("/{id}/students", web::post().to(assign_students))
                    .route("/{id}/students/{item_id}", web::delete().to(remove_student)),
            ),
    );
}
