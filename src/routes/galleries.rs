use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::galleries::requests::{
    DeleteDriveFileRequest, GalleryListParams, GalleryRequest, ReorderGalleriesRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GalleryService;
use crate::utils::{SafeIDI64, SafeNestedIDI64};

static GALLERY_SERVICE: Lazy<GalleryService> = Lazy::new(GalleryService::new_lazy);

pub async fn list_galleries(
    req: HttpRequest,
    query: web::Query<GalleryListParams>,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.list_galleries(query.into_inner(), &req).await
}

pub async fn create_gallery(
    req: HttpRequest,
    body: web::Json<GalleryRequest>,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.create_gallery(body.into_inner(), &req).await
}

pub async fn get_gallery(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.get_gallery(id.0, &req).await
}

pub async fn update_gallery(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GalleryRequest>,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE
        .update_gallery(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_gallery(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.delete_gallery(id.0, &req).await
}

pub async fn toggle_publish(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.toggle_publish(id.0, &req).await
}

pub async fn reorder(
    req: HttpRequest,
    body: web::Json<ReorderGalleriesRequest>,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.reorder(body.into_inner(), &req).await
}

// Google Drive 文件夹操作
pub async fn list_files(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.list_files(id.0, &req).await
}

pub async fn upload_file(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.upload_file(id.0, payload, &req).await
}

pub async fn delete_file(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<DeleteDriveFileRequest>,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE
        .delete_file(id.0, body.into_inner(), &req)
        .await
}

pub async fn initialize_folder(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.initialize_folder(id.0, &req).await
}

pub async fn upload_featured_image(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE
        .upload_featured_image(id.0, payload, &req)
        .await
}

pub async fn remove_featured_image(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.remove_featured_image(id.0, &req).await
}

pub async fn upload_item_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.upload_item_file(payload, &req).await
}

// 相册条目：/{id}/items/{item_id}
pub async fn destroy_item(req: HttpRequest, ids: SafeNestedIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.destroy_item(ids.0, ids.1, &req).await
}

pub async fn toggle_item_featured(
    req: HttpRequest,
    ids: SafeNestedIDI64,
) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE
        .toggle_item_featured(ids.0, ids.1, &req)
        .await
}

pub async fn clear_item_image(req: HttpRequest, ids: SafeNestedIDI64) -> ActixResult<HttpResponse> {
    GALLERY_SERVICE.clear_item_image(ids.0, ids.1, &req).await
}

// 配置路由
pub fn configure_gallery_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/galleries")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_galleries))
                    .route("", web::post().to(create_gallery))
                    .route("/reorder", web::post().to(reorder))
                    .route("/items/upload", web::post().to(upload_item_file))
                    .route("/{id}", web::get().to(get_gallery))
                    .route("/{id}", web::put().to(update_gallery))
                    .route("/{id}", web::delete().to(delete_gallery))
                    .route("/{id}/publish", web::patch().to(toggle_publish))
                    .route("/{id}/files", web::get().to(list_files))
                    .route("/{id}/files", web::post().to(upload_file))
                    .route("/{id}/files", web::delete().to(delete_file))
                    .route("/{id}/folder", web::post().to(initialize_folder))
                    .route("/{id}/featured-image", web::post().to(upload_featured_image))
                    .route("/{id}/featured-image", web::delete().to(remove_featured_image))
                    .route("/{id}/items/{item_id}", web::delete().to(destroy_item))
                    .route(
                        "/{id}/items/{item_id}/featured",
                        web::patch().to(toggle_item_featured),
                    )
                    .route("/{id}/items/{item_id}/image", web::delete().to(clear_item_image)),
            ),
    );
}
