use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::posts::requests::{PostListParams, PostRequest, TogglePublishRequest};
use crate::models::users::entities::UserRole;
use crate::services::PostService;
use crate::utils::SafeIDI64;

static POST_SERVICE: Lazy<PostService> = Lazy::new(PostService::new_lazy);

pub async fn list_posts(
    req: HttpRequest,
    query: web::Query<PostListParams>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE.list_posts(query.into_inner(), &req).await
}

pub async fn create_post(req: HttpRequest, body: web::Json<PostRequest>) -> ActixResult<HttpResponse> {
    POST_SERVICE.create_post(body.into_inner(), &req).await
}

pub async fn get_post(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.get_post(id.0, &req).await
}

pub async fn update_post(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<PostRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE.update_post(id.0, body.into_inner(), &req).await
}

pub async fn delete_post(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.delete_post(id.0, &req).await
}

pub async fn toggle_publish(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<TogglePublishRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE
        .toggle_publish(id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/posts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_posts))
                    .route("", web::post().to(create_post))
                    .route("/{id}", web::get().to(get_post))
                    .route("/{id}", web::put().to(update_post))
                    .route("/{id}", web::delete().to(delete_post))
                    .route("/{id}/publish", web::patch().to(toggle_publish)),
            ),
    );
}
