use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::staff::{
    entities::{PositionHistory, Staff},
    requests::PositionHistoryRequest,
};
use crate::models::{BulkDeleteResponse, IdsRequest};
use crate::services::{found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

// 履历显示在公开的校长与教职工详情页
const CONTENT_TYPE: &str = "position_history";

async fn validated(
    storage: &dyn Storage,
    mut req: PositionHistoryRequest,
) -> Result<(PositionHistoryRequest, Staff)> {
    req.title = req.title.trim().to_string();
    req.validate().map_err(invalid)?;
    let staff = found(storage.get_staff_by_id(req.staff_id).await?, "Staff member not found")?;
    Ok((req, staff))
}

pub(crate) async fn create_history(
    storage: &dyn Storage,
    req: PositionHistoryRequest,
) -> Result<PositionHistory> {
    let (req, staff) = validated(storage, req).await?;
    let history = storage.create_position_history(req).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(history.id),
        Some(&staff.name),
    );
    Ok(history)
}

pub(crate) async fn update_history(
    storage: &dyn Storage,
    history_id: i64,
    req: PositionHistoryRequest,
) -> Result<PositionHistory> {
    let (req, staff) = validated(storage, req).await?;
    let history = found(
        storage.update_position_history(history_id, req).await?,
        "Position history not found",
    )?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(history.id),
        Some(&staff.name),
    );
    Ok(history)
}

pub(crate) async fn delete_history(storage: &dyn Storage, history_id: i64) -> Result<()> {
    if !storage.delete_position_history(history_id).await? {
        return Err(SchoolSysError::not_found("Position history not found"));
    }
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(history_id), None);
    Ok(())
}

pub(crate) async fn delete_histories(storage: &dyn Storage, ids: &[i64]) -> Result<BulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one position history record."));
    }
    let deleted = storage.delete_position_histories(ids).await?;
    if deleted > 0 {
        ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", None, None);
    }
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

pub async fn create(
    service: &StaffService,
    body: PositionHistoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create_history(storage.as_ref(), body).await,
        "Position history added successfully.",
    )
}

pub async fn update(
    service: &StaffService,
    history_id: i64,
    body: PositionHistoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update_history(storage.as_ref(), history_id, body).await,
        "Position history updated successfully.",
    )
}

pub async fn delete(
    service: &StaffService,
    history_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_empty(
        delete_history(storage.as_ref(), history_id).await,
        "Position history deleted successfully.",
    )
}

pub async fn bulk_delete(
    service: &StaffService,
    body: IdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = delete_histories(storage.as_ref(), &body.ids).await;
    let message = match &result {
        Ok(r) => format!("Successfully deleted {} position history records.", r.deleted),
        Err(_) => String::new(),
    };
    respond(result, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::received;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    fn history(staff_id: i64, start: i32, end: Option<i32>) -> PositionHistoryRequest {
        PositionHistoryRequest {
            staff_id,
            title: "Wakil Kepala Sekolah".into(),
            start_year: start,
            end_year: end,
        }
    }

    #[tokio::test]
    async fn test_history_lifecycle() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let staff = create_staff(&storage, "Hendra", "Guru", "Akademik").await;

        assert!(create_history(&storage, history(staff.id, 2020, Some(2019))).await.is_err());
        assert!(create_history(&storage, history(999, 2020, None)).await.is_err());

        let first = create_history(&storage, history(staff.id, 2015, Some(2020)))
            .await
            .unwrap();
        let second = create_history(&storage, history(staff.id, 2020, None))
            .await
            .unwrap();
        let updated = update_history(&storage, first.id, history(staff.id, 2014, Some(2020)))
            .await
            .unwrap();
        assert_eq!(updated.start_year, 2014);

        let result = delete_histories(&storage, &[first.id, second.id]).await.unwrap();
        assert_eq!(result.deleted, 2);
        assert!(storage.list_position_history(staff.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_changes_publish_content_event() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let staff = create_staff(&storage, "Lestari Handayani", "Kepala Sekolah", "Kepala Sekolah").await;
        let mut events = ContentEventBus::get().subscribe();

        let entry = create_history(&storage, history(staff.id, 2018, None)).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "created", Some("Lestari Handayani")));

        update_history(&storage, entry.id, history(staff.id, 2019, None)).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "updated", Some("Lestari Handayani")));

        delete_history(&storage, entry.id).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "deleted", None));
        assert_eq!(delete_history(&storage, entry.id).await.unwrap_err().code(), "E008");
    }
}
