use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::pages::{
    entities::Page,
    requests::{PageListParams, PageRequest},
};
use crate::services::files::{merge_image, remove_stored_file};
use crate::services::{define_service, found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

define_service!(PageService);

const CONTENT_TYPE: &str = "page";
const NOT_FOUND: &str = "Page not found";

async fn validated(storage: &dyn Storage, mut req: PageRequest, exclude_id: Option<i64>) -> Result<PageRequest> {
    req.slug = req.slug.trim().to_string();
    req.title = req.title.trim().to_string();
    req.validate().map_err(invalid)?;
    if storage.page_slug_exists(&req.slug, exclude_id).await? {
        return Err(invalid("A page with this slug already exists."));
    }
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: PageRequest) -> Result<Page> {
    let req = validated(storage, req, None).await?;
    let image = merge_image(req.remove_image, req.image.clone(), None);
    let page = storage.create_page(req, image).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(page.id),
        Some(&page.title),
    );
    Ok(page)
}

pub(crate) async fn update(storage: &dyn Storage, id: i64, req: PageRequest) -> Result<Page> {
    let current = found(storage.get_page_by_id(id).await?, NOT_FOUND)?;
    let req = validated(storage, req, Some(id)).await?;
    let image = merge_image(req.remove_image, req.image.clone(), current.image.as_deref());
    let page = found(storage.update_page(id, req, image).await?, NOT_FOUND)?;
    if current.image != page.image {
        remove_stored_file(current.image.as_deref());
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(page.id),
        Some(&page.title),
    );
    Ok(page)
}

pub(crate) async fn delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let current = found(storage.get_page_by_id(id).await?, NOT_FOUND)?;
    if !storage.delete_page(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    remove_stored_file(current.image.as_deref());
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&current.title));
    Ok(())
}

impl PageService {
    pub async fn list_pages(&self, query: PageListParams, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_pages_with_pagination(query).await,
            "Pages retrieved successfully",
        )
    }

    pub async fn get_page(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = storage.get_page_by_id(id).await.and_then(|p| found(p, NOT_FOUND));
        respond(result, "Page retrieved successfully")
    }

    pub async fn create_page(&self, body: PageRequest, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_created(create(storage.as_ref(), body).await, "Page created successfully.")
    }

    pub async fn update_page(
        &self,
        id: i64,
        body: PageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(update(storage.as_ref(), id, body).await, "Page updated successfully.")
    }

    pub async fn delete_page(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(delete(storage.as_ref(), id).await, "Page deleted successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(slug: &str) -> PageRequest {
        PageRequest {
            slug: slug.into(),
            title: "Sejarah Sekolah".into(),
            content: "Didirikan pada tahun 1985.".into(),
            image: None,
            remove_image: false,
        }
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let page = create(&storage, request("sejarah")).await.unwrap();
        let err = create(&storage, request("sejarah")).await.unwrap_err();
        assert_eq!(err.message(), "A page with this slug already exists.");

        // 保存自身 slug 不冲突
        let mut same = request("sejarah");
        same.image = Some("pages/1-a.jpg".into());
        let updated = update(&storage, page.id, same).await.unwrap();
        assert_eq!(updated.image.as_deref(), Some("pages/1-a.jpg"));
    }

    #[tokio::test]
    async fn test_invalid_slug_format() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(
            create(&storage, request("Sejarah Kami")).await.unwrap_err().code(),
            "E007"
        );
    }
}
