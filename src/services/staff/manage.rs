use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CONTENT_TYPE, StaffService};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::staff::{entities::Staff, requests::StaffRequest};
use crate::models::{BulkDeleteResponse, IdsRequest};
use crate::services::files::remove_stored_file;
use crate::services::{found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;
use crate::utils::slug::{slugify, unique_slug};

fn normalize(mut req: StaffRequest) -> StaffRequest {
    req.name = req.name.trim().to_string();
    req.position = req.position.trim().to_string();
    req.email = req.email.trim().to_lowercase();
    req.phone = req.phone.filter(|p| !p.trim().is_empty());
    req.homeroom_class = req.homeroom_class.filter(|c| !c.trim().is_empty());
    req
}

async fn staff_slug(storage: &dyn Storage, name: &str, exclude_id: Option<i64>) -> Result<String> {
    unique_slug(&slugify(name), |candidate| async move {
        storage.staff_slug_exists(&candidate, exclude_id).await
    })
    .await
}

pub(crate) async fn create(storage: &dyn Storage, req: StaffRequest) -> Result<Staff> {
    let req = normalize(req);
    req.validate().map_err(invalid)?;
    if storage.staff_email_taken(&req.email, None).await? {
        return Err(invalid("This email address is already registered."));
    }
    let slug = staff_slug(storage, &req.name, None).await?;
    let staff = storage.create_staff(req, slug).await?;

    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(staff.id),
        Some(&staff.name),
    );
    Ok(staff)
}

/// 更新教职工，姓名变化时重新生成 slug
pub(crate) async fn update(storage: &dyn Storage, staff_id: i64, req: StaffRequest) -> Result<Staff> {
    let req = normalize(req);
    req.validate().map_err(invalid)?;
    let current = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    if storage.staff_email_taken(&req.email, Some(staff_id)).await? {
        return Err(invalid("This email address is already registered."));
    }

    let slug = if current.name != req.name {
        staff_slug(storage, &req.name, Some(staff_id)).await?
    } else {
        current.slug
    };
    let photo_replaced = current.photo.is_some() && req.photo != current.photo;
    let staff = found(
        storage.update_staff(staff_id, req, slug).await?,
        "Staff member not found",
    )?;
    if photo_replaced {
        remove_stored_file(current.photo.as_deref());
    }

    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(staff.id),
        Some(&staff.name),
    );
    Ok(staff)
}

pub(crate) async fn delete(storage: &dyn Storage, staff_id: i64) -> Result<()> {
    let staff = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    if !storage.delete_staff(staff_id).await? {
        return Err(SchoolSysError::not_found("Staff member not found"));
    }
    remove_stored_file(staff.photo.as_deref());
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "deleted",
        Some(staff_id),
        Some(&staff.name),
    );
    Ok(())
}

pub(crate) async fn delete_many(storage: &dyn Storage, ids: &[i64]) -> Result<BulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one staff member."));
    }
    let deleted = storage.delete_staff_many(ids).await?;
    if deleted > 0 {
        ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", None, None);
    }
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

pub async fn create_staff(
    service: &StaffService,
    body: StaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create(storage.as_ref(), body).await,
        "Staff member created successfully.",
    )
}

pub async fn update_staff(
    service: &StaffService,
    staff_id: i64,
    body: StaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update(storage.as_ref(), staff_id, body).await,
        "Staff member updated successfully.",
    )
}

pub async fn delete_staff(
    service: &StaffService,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_empty(
        delete(storage.as_ref(), staff_id).await,
        "Staff member deleted successfully.",
    )
}

pub async fn bulk_delete_staff(
    service: &StaffService,
    body: IdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = delete_many(storage.as_ref(), &body.ids).await;
    let message = match &result {
        Ok(r) => format!("Successfully deleted {} staff members.", r.deleted),
        Err(_) => String::new(),
    };
    respond(result, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::staff_request;

    #[tokio::test]
    async fn test_slug_unique_and_regenerated_on_rename() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let first = create(&storage, staff_request("Ahmad Fauzi", "Guru", "Akademik"))
            .await
            .unwrap();
        assert_eq!(first.slug, "ahmad-fauzi");

        let mut second = staff_request("Ahmad Fauzi", "Guru", "Akademik");
        second.email = "fauzi2@school.sch.id".into();
        let second = create(&storage, second).await.unwrap();
        assert_eq!(second.slug, "ahmad-fauzi-1");

        let mut renamed = staff_request("Ahmad Fauzan", "Guru", "Akademik");
        renamed.email = first.email.clone().unwrap_or_default();
        let renamed = update(&storage, first.id, renamed).await.unwrap();
        assert_eq!(renamed.slug, "ahmad-fauzan");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_without_write() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create(&storage, staff_request("Sari", "Staf", "Tata Usaha"))
            .await
            .unwrap();
        let mut dup = staff_request("Sari Dewi", "Staf", "Tata Usaha");
        dup.email = " SARI@school.sch.id ".into();
        let err = create(&storage, dup).await.unwrap_err();
        assert_eq!(err.message(), "This email address is already registered.");
        assert_eq!(storage.list_all_staff().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_delete_counts_existing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let staff = create(&storage, staff_request("Budi", "Guru", "Akademik"))
            .await
            .unwrap();
        let result = delete_many(&storage, &[staff.id, 999]).await.unwrap();
        assert_eq!((result.deleted, result.total), (1, 2));
    }
}
