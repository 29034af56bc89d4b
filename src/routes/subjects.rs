use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IdsRequest;
use crate::models::subjects::requests::{
    AssignStaffRequest, BulkAssignmentRequest, SubjectAssignmentParams, SubjectListParams,
    SubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;
use crate::utils::{SafeIDI64, SafeNestedIDI64};

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(subject_id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeIDI64,
    body: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(subject_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(subject_id.0, &req).await
}

pub async fn bulk_delete_subjects(
    req: HttpRequest,
    body: web::Json<IdsRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .bulk_delete_subjects(body.into_inner(), &req)
        .await
}

pub async fn assign_staff(
    req: HttpRequest,
    subject_id: SafeIDI64,
    body: web::Json<AssignStaffRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .assign_staff(subject_id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_staff(req: HttpRequest, ids: SafeNestedIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.remove_staff(ids.0, ids.1, &req).await
}

pub async fn assignment_overview(
    req: HttpRequest,
    query: web::Query<SubjectAssignmentParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .assignment_overview(query.into_inner(), &req)
        .await
}

pub async fn bulk_update_assignments(
    req: HttpRequest,
    body: web::Json<BulkAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .bulk_update_assignments(body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_subjects))
                    .route("", web::post().to(create_subject))
                    .route("/bulk-delete", web::post().to(bulk_delete_subjects))
                    .route("/{id}", web::get().to(get_subject))
                    .route("/{id}", web::put().to(update_subject))
                    .route("/{id}", web::delete().to(delete_subject))
                    .route("/{id}/staff", web::put().to(assign_staff))
                    .route("/{id}/staff/{item_id}", web::delete().to(remove_staff)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/subject-assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(assignment_overview))
                    .route("", web::put().to(bulk_update_assignments)),
            ),
    );
}
