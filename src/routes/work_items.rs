use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::work_items::requests::{
    FileMetadataQuery, InitializeFoldersRequest, TeacherWorkItemRequest, TrackAccessRequest,
    WorkItemRequest, WorkLookupQuery,
};
use crate::services::WorkItemService;
use crate::utils::SafeIDI64;

static WORK_ITEM_SERVICE: Lazy<WorkItemService> = Lazy::new(WorkItemService::new_lazy);

// 管理端
pub async fn index(req: HttpRequest) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.index(&req).await
}

pub async fn store(req: HttpRequest, body: web::Json<WorkItemRequest>) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.store(body.into_inner(), &req).await
}

pub async fn update(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<WorkItemRequest>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.update(id.0, body.into_inner(), &req).await
}

pub async fn destroy(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.destroy(id.0, &req).await
}

pub async fn stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.stats(&req).await
}

// 教师端
pub async fn teacher_index(req: HttpRequest) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.teacher_index(&req).await
}

pub async fn store_teacher(
    req: HttpRequest,
    body: web::Json<TeacherWorkItemRequest>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.store_teacher(body.into_inner(), &req).await
}

pub async fn destroy_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.destroy_teacher(id.0, &req).await
}

// 教学文档
pub async fn initialize_folders(
    req: HttpRequest,
    body: web::Json<InitializeFoldersRequest>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .initialize_folders(body.into_inner(), &req)
        .await
}

pub async fn upload_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.upload_file(payload, &req).await
}

pub async fn delete_file(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.delete_file(id.0, &req).await
}

pub async fn file_metadata(
    req: HttpRequest,
    query: web::Query<FileMetadataQuery>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .file_metadata(query.into_inner(), &req)
        .await
}

pub async fn lookup(
    req: HttpRequest,
    query: web::Query<WorkLookupQuery>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.lookup(query.into_inner(), &req).await
}

pub async fn teacher_progress(req: HttpRequest, staff_id: SafeIDI64) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE.teacher_progress(staff_id.0, &req).await
}

pub async fn track_access(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<TrackAccessRequest>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .track_access(id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_work_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/work-items")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(index))
                    .route("", web::post().to(store))
                    .route("/stats", web::get().to(stats))
                    .route("/{id}", web::put().to(update))
                    .route("/{id}", web::delete().to(destroy)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/teacher/work-items")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
                    .route("", web::get().to(teacher_index))
                    .route("", web::post().to(store_teacher))
                    .route("/{id}", web::delete().to(destroy_teacher)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/work-files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("/initialize-folders", web::post().to(initialize_folders))
                    .route("/metadata", web::get().to(file_metadata))
                    .route("/lookup", web::get().to(lookup))
                    .route("/teachers/{id}/progress", web::get().to(teacher_progress))
                    .service(
                        web::resource("/upload")
                            .wrap(middlewares::RateLimit::file_upload())
                            .route(web::post().to(upload_file)),
                    )
                    .route("/{id}", web::delete().to(delete_file))
                    .route("/{id}/track", web::post().to(track_access)),
            ),
    );
}
