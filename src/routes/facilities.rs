use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::facilities::requests::{FacilityListParams, FacilityRequest};
use crate::models::users::entities::UserRole;
use crate::services::FacilityService;
use crate::utils::SafeIDI64;

static FACILITY_SERVICE: Lazy<FacilityService> = Lazy::new(FacilityService::new_lazy);

pub async fn list_facilities(
    req: HttpRequest,
    query: web::Query<FacilityListParams>,
) -> ActixResult<HttpResponse> {
    FACILITY_SERVICE.list_facilities(query.into_inner(), &req).await
}

pub async fn create_facility(
    req: HttpRequest,
    body: web::Json<FacilityRequest>,
) -> ActixResult<HttpResponse> {
    FACILITY_SERVICE.create_facility(body.into_inner(), &req).await
}

pub async fn get_facility(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACILITY_SERVICE.get_facility(id.0, &req).await
}

pub async fn update_facility(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<FacilityRequest>,
) -> ActixResult<HttpResponse> {
    FACILITY_SERVICE
        .update_facility(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_facility(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FACILITY_SERVICE.delete_facility(id.0, &req).await
}

// 配置路由
pub fn configure_facility_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/facilities")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_facilities))
                    .route("", web::post().to(create_facility))
                    .route("/{id}", web::get().to(get_facility))
                    .route("/{id}", web::put().to(update_facility))
                    .route("/{id}", web::delete().to(delete_facility)),
            ),
    );
}
