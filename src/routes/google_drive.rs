use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::google_drive::requests::UpdateTokenRequest;
use crate::models::users::entities::UserRole;
use crate::services::GoogleDriveService;

static GOOGLE_DRIVE_SERVICE: Lazy<GoogleDriveService> = Lazy::new(GoogleDriveService::new_lazy);

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    GOOGLE_DRIVE_SERVICE.dashboard(&req).await
}

pub async fn refresh(req: HttpRequest) -> ActixResult<HttpResponse> {
    GOOGLE_DRIVE_SERVICE.refresh(&req).await
}

pub async fn test_connection(req: HttpRequest) -> ActixResult<HttpResponse> {
    GOOGLE_DRIVE_SERVICE.test_connection(&req).await
}

pub async fn update_token(
    req: HttpRequest,
    body: web::Json<UpdateTokenRequest>,
) -> ActixResult<HttpResponse> {
    GOOGLE_DRIVE_SERVICE.update_token(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_google_drive_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/google-drive")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/refresh", web::post().to(refresh))
                    .route("/test-connection", web::post().to(test_connection))
                    .route("/token", web::put().to(update_token)),
            ),
    );
}
