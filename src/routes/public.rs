use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::models::public::requests::{GalleryQuery, NewsQuery};
use crate::services::PublicService;
use crate::utils::SafeSlug;

static PUBLIC_SERVICE: Lazy<PublicService> = Lazy::new(PublicService::new_lazy);

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.home(&req).await
}

pub async fn news(req: HttpRequest, query: web::Query<NewsQuery>) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.news(query.into_inner(), &req).await
}

pub async fn news_detail(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.news_detail(&slug.0, &req).await
}

pub async fn galleries(
    req: HttpRequest,
    query: web::Query<GalleryQuery>,
) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.galleries(query.into_inner(), &req).await
}

pub async fn gallery_detail(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.gallery_detail(&slug.0, &req).await
}

pub async fn extracurriculars(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.extracurriculars(&req).await
}

pub async fn teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.teachers(&req).await
}

pub async fn teacher_detail(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.teacher_detail(&slug.0, &req).await
}

pub async fn principal(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.principal(&req).await
}

pub async fn staff(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.staff(&req).await
}

pub async fn staff_detail(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.staff_detail(&slug.0, &req).await
}

pub async fn facilities(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.facilities(&req).await
}

pub async fn pages(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.pages(&req).await
}

pub async fn page(req: HttpRequest, slug: SafeSlug) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.page(&slug.0, &req).await
}

pub async fn contact(req: HttpRequest) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.contact(&req).await
}

// 配置路由（无需登录）
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/public")
            .wrap(middleware::Compress::default())
            .route("/home", web::get().to(home))
            .route("/news", web::get().to(news))
            .route("/news/{slug}", web::get().to(news_detail))
            .route("/galleries", web::get().to(galleries))
            .route("/galleries/{slug}", web::get().to(gallery_detail))
            .route("/extracurriculars", web::get().to(extracurriculars))
            .route("/teachers", web::get().to(teachers))
            .route("/teachers/{slug}", web::get().to(teacher_detail))
            .route("/principal", web::get().to(principal))
            .route("/staff", web::get().to(staff))
            .route("/staff/{slug}", web::get().to(staff_detail))
            .route("/facilities", web::get().to(facilities))
            .route("/pages", web::get().to(pages))
            .route("/pages/{slug}", web::get().to(page))
            .route("/contact", web::get().to(contact)),
    );
}
