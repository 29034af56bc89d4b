use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::facilities::{
    entities::Facility,
    requests::{FacilityListParams, FacilityRequest},
};
use crate::services::files::{merge_image, remove_stored_file};
use crate::services::{define_service, found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

define_service!(FacilityService);

const CONTENT_TYPE: &str = "facility";
const NOT_FOUND: &str = "Facility not found";

fn normalize(mut req: FacilityRequest) -> Result<FacilityRequest> {
    req.validate().map_err(invalid)?;
    req.name = req.name.trim().to_string();
    req.description = req.description.trim().to_string();
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: FacilityRequest) -> Result<Facility> {
    let req = normalize(req)?;
    let photo = merge_image(req.remove_image, req.photo.clone(), None);
    let facility = storage.create_facility(req, photo).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(facility.id),
        Some(&facility.name),
    );
    Ok(facility)
}

/// `remove_image` 为 true 时清除照片，否则未提交的照片保持不变
pub(crate) async fn update(storage: &dyn Storage, id: i64, req: FacilityRequest) -> Result<Facility> {
    let current = found(storage.get_facility_by_id(id).await?, NOT_FOUND)?;
    let req = normalize(req)?;
    let photo = merge_image(req.remove_image, req.photo.clone(), current.photo.as_deref());
    let facility = found(storage.update_facility(id, req, photo).await?, NOT_FOUND)?;
    if current.photo != facility.photo {
        remove_stored_file(current.photo.as_deref());
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(facility.id),
        Some(&facility.name),
    );
    Ok(facility)
}

pub(crate) async fn delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let current = found(storage.get_facility_by_id(id).await?, NOT_FOUND)?;
    if !storage.delete_facility(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    remove_stored_file(current.photo.as_deref());
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&current.name));
    Ok(())
}

impl FacilityService {
    pub async fn list_facilities(
        &self,
        query: FacilityListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_facilities_with_pagination(query).await,
            "Facilities retrieved successfully",
        )
    }

    pub async fn get_facility(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = storage.get_facility_by_id(id).await.and_then(|f| found(f, NOT_FOUND));
        respond(result, "Facility retrieved successfully")
    }

    pub async fn create_facility(
        &self,
        body: FacilityRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_created(create(storage.as_ref(), body).await, "Facility created successfully.")
    }

    pub async fn update_facility(
        &self,
        id: i64,
        body: FacilityRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(update(storage.as_ref(), id, body).await, "Facility updated successfully.")
    }

    pub async fn delete_facility(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(delete(storage.as_ref(), id).await, "Facility deleted successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(photo: Option<&str>, remove_image: bool) -> FacilityRequest {
        FacilityRequest {
            name: "Laboratorium IPA".into(),
            description: "Dilengkapi mikroskop dan alat praktikum.".into(),
            photo: photo.map(str::to_string),
            remove_image,
        }
    }

    #[tokio::test]
    async fn test_photo_kept_replaced_and_removed() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let facility = create(&storage, request(Some("facilities/1-a.jpg"), false)).await.unwrap();

        let kept = update(&storage, facility.id, request(None, false)).await.unwrap();
        assert_eq!(kept.photo.as_deref(), Some("facilities/1-a.jpg"));

        let replaced = update(&storage, facility.id, request(Some("facilities/2-b.jpg"), false))
            .await
            .unwrap();
        assert_eq!(replaced.photo.as_deref(), Some("facilities/2-b.jpg"));

        let removed = update(&storage, facility.id, request(None, true)).await.unwrap();
        assert!(removed.photo.is_none());
    }

    #[tokio::test]
    async fn test_update_missing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(
            update(&storage, 7, request(None, false)).await.unwrap_err().code(),
            "E008"
        );
    }
}
