use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FileService;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn handle_upload(
    category: web::Path<String>,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE
        .handle_upload(category.into_inner(), payload)
        .await
}

pub async fn serve(path: web::Path<(String, String)>) -> ActixResult<HttpResponse> {
    let (category, name) = path.into_inner();
    FILE_SERVICE.serve(category, name).await
}

// 本地 Drive 存储的文件
pub async fn serve_drive(
    request: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.serve_drive(path.into_inner(), &request).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middleware::Compress::default())
            .route("/drive/{path:.*}", web::get().to(serve_drive))
            .route("/{category}/{name}", web::get().to(serve))
            .service(
                web::resource("/{category}")
                    .wrap(middlewares::RateLimit::file_upload())
                    .wrap(middlewares::RequireJWT)
                    .route(web::post().to(handle_upload)),
            ),
    );
}
