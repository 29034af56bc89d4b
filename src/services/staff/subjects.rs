use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::{CONTENT_TYPE, StaffService};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::staff::{entities::Staff, requests::AssignSubjectsRequest};
use crate::models::subjects::entities::Subject;
use crate::services::{found, invalid, respond, respond_empty};
use crate::storage::Storage;

pub(crate) const NOT_ELIGIBLE: &str =
    "Only teachers/guru from academic division can be assigned to subjects.";

/// 只有学术部门的任课教师可以分配科目
pub(crate) async fn eligible_staff(storage: &dyn Storage, staff_id: i64) -> Result<Staff> {
    let staff = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    if !staff.is_academic_teacher() {
        return Err(invalid(NOT_ELIGIBLE));
    }
    Ok(staff)
}

// 所有科目 ID 必须存在
pub(crate) async fn ensure_subjects_exist(storage: &dyn Storage, subject_ids: &[i64]) -> Result<()> {
    let known: HashSet<i64> = storage
        .list_all_subjects()
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    if subject_ids.iter().any(|id| !known.contains(id)) {
        return Err(invalid("The selected subject is invalid."));
    }
    Ok(())
}

pub(crate) async fn assign(
    storage: &dyn Storage,
    staff_id: i64,
    subject_ids: &[i64],
) -> Result<Vec<Subject>> {
    let staff = eligible_staff(storage, staff_id).await?;
    ensure_subjects_exist(storage, subject_ids).await?;
    storage.sync_staff_subjects(staff.id, subject_ids).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "subjects_updated",
        Some(staff.id),
        Some(&staff.name),
    );
    storage.list_staff_subjects(staff.id).await
}

pub(crate) async fn remove(storage: &dyn Storage, staff_id: i64, subject_id: i64) -> Result<()> {
    let staff = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    if storage.remove_staff_subject(staff_id, subject_id).await? {
        ContentEventBus::get().content_updated(
            CONTENT_TYPE,
            "subjects_updated",
            Some(staff.id),
            Some(&staff.name),
        );
        Ok(())
    } else {
        Err(SchoolSysError::not_found(
            "Subject is not assigned to this staff member.",
        ))
    }
}

pub async fn assign_subjects(
    service: &StaffService,
    staff_id: i64,
    body: AssignSubjectsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        assign(storage.as_ref(), staff_id, &body.subject_ids).await,
        "Subjects assigned successfully.",
    )
}

pub async fn remove_subject(
    service: &StaffService,
    staff_id: i64,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_empty(
        remove(storage.as_ref(), staff_id, subject_id).await,
        "Subject removed from staff member successfully.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::received;
    use crate::models::subjects::requests::SubjectRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    async fn subject(storage: &SeaOrmStorage, name: &str) -> Subject {
        storage
            .create_subject(SubjectRequest {
                name: name.into(),
                code: None,
                description: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_only_academic_teachers_get_subjects() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = subject(&storage, "Matematika").await;
        let clerk = create_staff(&storage, "Joko", "Staf TU", "Tata Usaha").await;
        let teacher = create_staff(&storage, "Rina", "Guru Matematika", "Akademik").await;

        let err = assign(&storage, clerk.id, &[math.id]).await.unwrap_err();
        assert_eq!(err.message(), NOT_ELIGIBLE);

        let subjects = assign(&storage, teacher.id, &[math.id]).await.unwrap();
        assert_eq!(subjects.len(), 1);

        assert!(assign(&storage, teacher.id, &[math.id, 999]).await.is_err());

        remove(&storage, teacher.id, math.id).await.unwrap();
        assert!(remove(&storage, teacher.id, math.id).await.is_err());
    }

    #[tokio::test]
    async fn test_subject_changes_publish_content_event() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let physics = subject(&storage, "Fisika").await;
        let teacher = create_staff(&storage, "Wahyu Pratama", "Guru Fisika", "Akademik").await;
        let mut events = ContentEventBus::get().subscribe();

        assign(&storage, teacher.id, &[physics.id]).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "subjects_updated", Some("Wahyu Pratama")));

        remove(&storage, teacher.id, physics.id).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "subjects_updated", Some("Wahyu Pratama")));
    }
}
