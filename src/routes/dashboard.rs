use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activities::requests::BulkDeleteActivitiesRequest;
use crate::models::users::entities::UserRole;
use crate::services::{ActivityService, DashboardService};

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

pub async fn overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.overview(&req).await
}

pub async fn list_activities(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.list_activities(&req).await
}

pub async fn bulk_delete_activities(
    req: HttpRequest,
    body: web::Json<BulkDeleteActivitiesRequest>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.bulk_delete(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(overview)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/system-activities")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_activities))
                    .route("/bulk-delete", web::post().to(bulk_delete_activities)),
            ),
    );
}
