pub mod content;
pub mod people;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header::ContentType};
use serde::Serialize;
use std::future::Future;
use ts_rs::TS;

use crate::cache::{CacheResult, PUBLIC_CACHE_PREFIX};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::public::requests::{GalleryQuery, NewsQuery};

use super::{define_service, error_response, object_cache};

define_service!(PublicService);

fn json_body(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body)
}

/// 公开接口的响应体缓存到下一次内容变更
async fn cached<T, F>(
    request: &HttpRequest,
    key: String,
    message: &str,
    load: F,
) -> ActixResult<HttpResponse>
where
    T: Serialize + TS,
    F: Future<Output = Result<T>>,
{
    let cache = object_cache(request)?;
    let key = format!("{PUBLIC_CACHE_PREFIX}{key}");
    if let CacheResult::Found(body) = cache.get_raw(&key).await {
        tracing::debug!("Public cache hit: {}", key);
        return Ok(json_body(body));
    }

    let data = match load.await {
        Ok(data) => data,
        Err(e) => return Ok(error_response(&e)),
    };
    let body = serde_json::to_string(&ApiResponse::success(data, message))
        .map_err(actix_web::error::ErrorInternalServerError)?;
    cache.insert_raw(key, body.clone(), 0).await;
    Ok(json_body(body))
}

impl PublicService {
    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "home".into(),
            "Home data retrieved successfully",
            content::home(storage.as_ref()),
        )
        .await
    }

    pub async fn news(&self, query: NewsQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("news:{}", query.cache_key()),
            "News retrieved successfully",
            content::news(storage.as_ref(), query),
        )
        .await
    }

    pub async fn news_detail(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("news:detail:{slug}"),
            "News retrieved successfully",
            content::news_detail(storage.as_ref(), slug),
        )
        .await
    }

    pub async fn galleries(&self, query: GalleryQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("galleries:{}", query.cache_key()),
            "Galleries retrieved successfully",
            content::galleries(storage.as_ref(), query),
        )
        .await
    }

    pub async fn gallery_detail(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("galleries:detail:{slug}"),
            "Gallery retrieved successfully",
            content::gallery_detail(storage.as_ref(), slug),
        )
        .await
    }

    pub async fn extracurriculars(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "extracurriculars".into(),
            "Extracurriculars retrieved successfully",
            content::extracurriculars(storage.as_ref()),
        )
        .await
    }

    pub async fn teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "teachers".into(),
            "Teachers retrieved successfully",
            people::teachers(storage.as_ref()),
        )
        .await
    }

    pub async fn teacher_detail(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("teachers:{slug}"),
            "Teacher retrieved successfully",
            people::teacher_detail(storage.as_ref(), slug),
        )
        .await
    }

    pub async fn principal(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "principal".into(),
            "Principal retrieved successfully",
            people::principal(storage.as_ref()),
        )
        .await
    }

    pub async fn staff(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "staff".into(),
            "Staff directory retrieved successfully",
            people::staff_directory(storage.as_ref()),
        )
        .await
    }

    pub async fn staff_detail(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("staff:{slug}"),
            "Staff retrieved successfully",
            people::staff_detail(storage.as_ref(), slug),
        )
        .await
    }

    pub async fn facilities(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "facilities".into(),
            "Facilities retrieved successfully",
            content::facilities(storage.as_ref()),
        )
        .await
    }

    pub async fn pages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "pages".into(),
            "Pages retrieved successfully",
            content::pages(storage.as_ref()),
        )
        .await
    }

    pub async fn page(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            format!("pages:{slug}"),
            "Page retrieved successfully",
            content::page(storage.as_ref(), slug),
        )
        .await
    }

    pub async fn contact(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        cached(
            request,
            "contact".into(),
            "Contact retrieved successfully",
            content::contact(storage.as_ref()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;
    use actix_web::{test, web};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_responses_are_cached_until_invalidated() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Joko", "Petugas Kebersihan", "Pramubhakti").await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::for_tests());

        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();
        let service = PublicService::new_lazy();

        let response = service.staff(&request).await.unwrap();
        assert_eq!(response.status(), 200);
        let body = match cache.get_raw("public:staff").await {
            CacheResult::Found(body) => body,
            other => panic!("expected cached body, got {other:?}"),
        };
        assert!(body.contains("Pramubhakti"));

        cache.invalidate_prefix(PUBLIC_CACHE_PREFIX).await;
        assert_eq!(cache.get_raw("public:staff").await, CacheResult::NotFound);

        let missing = service.page("unknown", &request).await.unwrap();
        assert_eq!(missing.status(), 404);
        assert_eq!(
            cache.get_raw("public:pages:unknown").await,
            CacheResult::NotFound
        );
    }
}
