use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::homeroom::requests::{HomeroomAssignRequest, HomeroomRemoveRequest};
use crate::models::users::entities::UserRole;
use crate::services::HomeroomService;

static HOMEROOM_SERVICE: Lazy<HomeroomService> = Lazy::new(HomeroomService::new_lazy);

pub async fn overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.overview(&req).await
}

pub async fn assign_class(
    req: HttpRequest,
    body: web::Json<HomeroomAssignRequest>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.assign_class(body.into_inner(), &req).await
}

pub async fn remove_assignment(
    req: HttpRequest,
    body: web::Json<HomeroomRemoveRequest>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE
        .remove_assignment(body.into_inner(), &req)
        .await
}

pub async fn bulk_assign_students(
    req: HttpRequest,
    body: web::Json<HomeroomAssignRequest>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE
        .bulk_assign_students(body.into_inner(), &req)
        .await
}

pub async fn class_details(
    req: HttpRequest,
    class_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE
        .class_details(class_name.into_inner(), &req)
        .await
}

pub async fn available_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.available_teachers(&req).await
}

// 配置路由
pub fn configure_homeroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/homeroom")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(overview))
                    .route("/assign", web::post().to(assign_class))
                    .route("/remove", web::post().to(remove_assignment))
                    .route("/students", web::post().to(bulk_assign_students))
                    .route("/teachers", web::get().to(available_teachers))
                    .route("/classes/{class_name}", web::get().to(class_details)),
            ),
    );
}
