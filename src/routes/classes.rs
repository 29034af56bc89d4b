use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IdsRequest;
use crate::models::classes::requests::{ClassOptionsQuery, ClassQueryParams, ClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn class_options(
    req: HttpRequest,
    query: web::Query<ClassOptionsQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.class_options(&req, query.into_inner()).await
}

pub async fn class_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.class_stats(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeIDI64,
    update_data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn bulk_delete_classes(
    req: HttpRequest,
    body: web::Json<IdsRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .bulk_delete_classes(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_classes))
                    .route("", web::post().to(create_class))
                    .route("/options", web::get().to(class_options))
                    .route("/stats", web::get().to(class_stats))
                    .route("/bulk-delete", web::post().to(bulk_delete_classes))
                    .route("/{id}", web::get().to(get_class))
                    .route("/{id}", web::put().to(update_class))
                    .route("/{id}", web::delete().to(delete_class)),
            ),
    );
}
