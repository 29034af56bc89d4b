use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CONTENT_TYPE, SubjectService};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::subjects::{
    entities::Subject,
    requests::{SubjectListParams, SubjectRequest},
    responses::SubjectDetailResponse,
};
use crate::models::{BulkDeleteResponse, IdsRequest};
use crate::services::{found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

async fn validated(
    storage: &dyn Storage,
    mut req: SubjectRequest,
    exclude_id: Option<i64>,
) -> Result<SubjectRequest> {
    req.name = req.name.trim().to_string();
    req.validate().map_err(invalid)?;
    req.code = req.normalized_code();
    if let Some(code) = req.code.as_deref()
        && storage.subject_code_taken(code, exclude_id).await?
    {
        return Err(invalid(format!("Subject code '{code}' already exists")));
    }
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: SubjectRequest) -> Result<Subject> {
    let req = validated(storage, req, None).await?;
    let subject = storage.create_subject(req).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(subject.id),
        Some(&subject.name),
    );
    Ok(subject)
}

pub(crate) async fn update(
    storage: &dyn Storage,
    subject_id: i64,
    req: SubjectRequest,
) -> Result<Subject> {
    found(storage.get_subject_by_id(subject_id).await?, "Subject not found")?;
    let req = validated(storage, req, Some(subject_id)).await?;
    let subject = found(storage.update_subject(subject_id, req).await?, "Subject not found")?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(subject.id),
        Some(&subject.name),
    );
    Ok(subject)
}

pub(crate) async fn delete(storage: &dyn Storage, subject_id: i64) -> Result<()> {
    let subject = found(storage.get_subject_by_id(subject_id).await?, "Subject not found")?;
    if !storage.delete_subject(subject_id).await? {
        return Err(SchoolSysError::not_found("Subject not found"));
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "deleted",
        Some(subject.id),
        Some(&subject.name),
    );
    Ok(())
}

pub(crate) async fn delete_many(storage: &dyn Storage, ids: &[i64]) -> Result<BulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one subject."));
    }
    let deleted = storage.delete_subjects(ids).await?;
    if deleted > 0 {
        ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", None, None);
    }
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

pub(crate) async fn detail(storage: &dyn Storage, subject_id: i64) -> Result<SubjectDetailResponse> {
    let subject = found(storage.get_subject_by_id(subject_id).await?, "Subject not found")?;
    Ok(SubjectDetailResponse {
        staff: storage.list_subject_staff(subject.id).await?,
        subject,
    })
}

pub async fn list_subjects(
    service: &SubjectService,
    query: SubjectListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        storage.list_subjects_with_pagination(query).await,
        "Subjects retrieved successfully",
    )
}

pub async fn get_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        detail(storage.as_ref(), subject_id).await,
        "Subject retrieved successfully",
    )
}

pub async fn create_subject(
    service: &SubjectService,
    body: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create(storage.as_ref(), body).await,
        "Subject created successfully.",
    )
}

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    body: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update(storage.as_ref(), subject_id, body).await,
        "Subject updated successfully.",
    )
}

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_empty(
        delete(storage.as_ref(), subject_id).await,
        "Subject deleted successfully.",
    )
}

pub async fn bulk_delete_subjects(
    service: &SubjectService,
    body: IdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        delete_many(storage.as_ref(), &body.ids).await,
        "Subjects deleted successfully.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::received;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn subject(name: &str, code: Option<&str>) -> SubjectRequest {
        SubjectRequest {
            name: name.into(),
            code: code.map(Into::into),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_code_message() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = create(&storage, subject("Matematika", Some("MTK"))).await.unwrap();
        let err = create(&storage, subject("Matematika Lanjut", Some("mtk")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Subject code 'mtk' already exists");

        // 更新自身时不冲突
        let updated = update(&storage, math.id, subject("Matematika Wajib", Some("MTK")))
            .await
            .unwrap();
        assert_eq!(updated.name, "Matematika Wajib");

        // 空代码视为未填写
        let ipa = create(&storage, subject("IPA", Some(" "))).await.unwrap();
        assert_eq!(ipa.code, None);
    }

    #[tokio::test]
    async fn test_update_and_delete_publish_content_event() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let art = create(&storage, subject("Seni Rupa", None)).await.unwrap();
        let mut events = ContentEventBus::get().subscribe();

        update(&storage, art.id, subject(" Seni Budaya ", Some("SBD"))).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "updated", Some("Seni Budaya")));

        delete(&storage, art.id).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "deleted", Some("Seni Budaya")));
        assert_eq!(delete(&storage, art.id).await.unwrap_err().code(), "E008");

        assert!(delete_many(&storage, &[]).await.is_err());
    }
}
