use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::contacts::{
    entities::Contact,
    requests::{ContactListParams, ContactRequest},
};
use crate::services::{define_service, found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

define_service!(ContactService);

// 公开页面展示最新一条联系信息
const CONTENT_TYPE: &str = "contact";
const NOT_FOUND: &str = "Contact not found";

fn normalize(mut req: ContactRequest) -> Result<ContactRequest> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();
    req.phone = req.phone.filter(|p| !p.trim().is_empty());
    req.address = req.address.filter(|a| !a.trim().is_empty());
    req.validate().map_err(invalid)?;
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: ContactRequest) -> Result<Contact> {
    let contact = storage.create_contact(normalize(req)?).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(contact.id),
        Some(&contact.name),
    );
    Ok(contact)
}

pub(crate) async fn update(storage: &dyn Storage, id: i64, req: ContactRequest) -> Result<Contact> {
    let req = normalize(req)?;
    let contact = found(storage.update_contact(id, req).await?, NOT_FOUND)?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(contact.id),
        Some(&contact.name),
    );
    Ok(contact)
}

pub(crate) async fn delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let current = found(storage.get_contact_by_id(id).await?, NOT_FOUND)?;
    if !storage.delete_contact(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&current.name));
    Ok(())
}

impl ContactService {
    pub async fn list_contacts(
        &self,
        query: ContactListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_contacts_with_pagination(query).await,
            "Contacts retrieved successfully",
        )
    }

    pub async fn get_contact(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = storage.get_contact_by_id(id).await.and_then(|c| found(c, NOT_FOUND));
        respond(result, "Contact retrieved successfully")
    }

    pub async fn create_contact(
        &self,
        body: ContactRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_created(create(storage.as_ref(), body).await, "Contact created successfully.")
    }

    pub async fn update_contact(
        &self,
        id: i64,
        body: ContactRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(update(storage.as_ref(), id, body).await, "Contact updated successfully.")
    }

    pub async fn delete_contact(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(delete(storage.as_ref(), id).await, "Contact deleted successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(name: &str) -> ContactRequest {
        ContactRequest {
            name: name.into(),
            email: " Info@SMPN1.sch.id ".into(),
            phone: Some(String::new()),
            address: None,
            message: "Kantor buka Senin sampai Jumat.".into(),
        }
    }

    #[tokio::test]
    async fn test_latest_contact_follows_writes() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let first = create(&storage, request("SMP Negeri 1")).await.unwrap();
        assert_eq!(first.email, "info@smpn1.sch.id");
        assert!(first.phone.is_none());

        let second = create(&storage, request("SMP Negeri 1 Bandung")).await.unwrap();
        assert_eq!(storage.latest_contact().await.unwrap().unwrap().id, second.id);

        delete(&storage, second.id).await.unwrap();
        assert_eq!(storage.latest_contact().await.unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_validation_and_missing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(create(&storage, request("X")).await.unwrap_err().code(), "E007");
        assert_eq!(
            update(&storage, 3, request("SMP Negeri 2")).await.unwrap_err().code(),
            "E008"
        );
    }
}
