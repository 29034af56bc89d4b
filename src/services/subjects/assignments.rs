use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CONTENT_TYPE, SubjectService};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::PaginationQuery;
use crate::models::staff::entities::Staff;
use crate::models::subjects::{
    requests::{
        AssignStaffRequest, BulkAssignmentRequest, StaffAssignment, SubjectAssignmentParams,
        SubjectListParams,
    },
    responses::{AssignmentOverviewResponse, BulkAssignmentResult},
};
use crate::services::staff::subjects::NOT_ELIGIBLE;
use crate::services::{error_response, found, invalid, respond, respond_empty};
use crate::storage::Storage;

const TEACHERS_PER_PAGE: u64 = 10;
const SUBJECTS_PER_PAGE: i64 = 15;

/// 同步科目的任课教师，所有教师必须符合条件
pub(crate) async fn assign(
    storage: &dyn Storage,
    subject_id: i64,
    staff_ids: &[i64],
) -> Result<Vec<Staff>> {
    let subject = found(storage.get_subject_by_id(subject_id).await?, "Subject not found")?;
    let mut staff_ids = staff_ids.to_vec();
    staff_ids.sort_unstable();
    staff_ids.dedup();
    let staff = storage.list_staff_by_ids(&staff_ids).await?;
    if staff.len() != staff_ids.len() {
        return Err(invalid("Some selected staff members do not exist."));
    }
    if let Some(ineligible) = staff.iter().find(|s| !s.is_academic_teacher()) {
        return Err(invalid(format!("{}: {NOT_ELIGIBLE}", ineligible.name)));
    }
    storage.sync_subject_staff(subject_id, &staff_ids).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "staff_updated",
        Some(subject.id),
        Some(&subject.name),
    );
    storage.list_subject_staff(subject_id).await
}

pub(crate) async fn remove(storage: &dyn Storage, subject_id: i64, staff_id: i64) -> Result<()> {
    let subject = found(storage.get_subject_by_id(subject_id).await?, "Subject not found")?;
    if !storage.remove_subject_staff(subject_id, staff_id).await? {
        return Err(SchoolSysError::not_found(
            "Staff member is not assigned to this subject.",
        ));
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "staff_updated",
        Some(subject.id),
        Some(&subject.name),
    );
    Ok(())
}

pub(crate) async fn overview(
    storage: &dyn Storage,
    params: SubjectAssignmentParams,
) -> Result<AssignmentOverviewResponse> {
    let teachers = storage
        .list_eligible_teachers(
            params.staff_search,
            params.staff_page.unwrap_or(1).max(1) as u64,
            TEACHERS_PER_PAGE,
        )
        .await?;
    let subjects = storage
        .list_subjects_with_pagination(SubjectListParams {
            pagination: PaginationQuery {
                page: params.subject_page.unwrap_or(1),
                size: SUBJECTS_PER_PAGE,
            },
            search: params.subject_search,
        })
        .await?;
    Ok(AssignmentOverviewResponse {
        teachers: teachers.items,
        teachers_pagination: teachers.pagination,
        subjects: subjects.items,
        subjects_pagination: subjects.pagination,
    })
}

async fn apply_assignment(
    storage: &dyn Storage,
    assignment: &StaffAssignment,
    result: &mut BulkAssignmentResult,
) -> Result<()> {
    let Some(staff) = storage.get_staff_by_id(assignment.staff_id).await? else {
        result.errors.push(format!("Staff with ID {} not found", assignment.staff_id));
        result.skipped += 1;
        return Ok(());
    };
    if !staff.is_academic_teacher() {
        result.errors.push(format!(
            "Staff {} is not eligible for subject assignments",
            staff.name
        ));
        result.skipped += 1;
        return Ok(());
    }

    let mut current: Vec<i64> = storage
        .list_staff_subjects(staff.id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    let mut wanted = assignment.subject_ids.clone();
    current.sort_unstable();
    wanted.sort_unstable();
    wanted.dedup();

    if current != wanted {
        storage.sync_staff_subjects(staff.id, &wanted).await?;
        result.changed += 1;
    }
    result.processed += 1;
    Ok(())
}

/// 逐条处理分配，单条失败不影响其他条目
pub(crate) async fn bulk_apply(
    storage: &dyn Storage,
    assignments: &[StaffAssignment],
) -> Result<BulkAssignmentResult> {
    let mut result = BulkAssignmentResult {
        total: assignments.len() as i64,
        ..Default::default()
    };
    for assignment in assignments {
        if let Err(e) = apply_assignment(storage, assignment, &mut result).await {
            tracing::warn!(
                "Subject assignment for staff {} failed: {}",
                assignment.staff_id,
                e
            );
            result.errors.push(format!(
                "Failed to update staff {}: {}",
                assignment.staff_id,
                e.message()
            ));
            result.skipped += 1;
        }
    }
    if result.changed > 0 {
        ContentEventBus::get().content_updated(CONTENT_TYPE, "assignments_updated", None, None);
    }
    if !result.errors.is_empty() {
        tracing::warn!(
            "Bulk assignment completed with {} errors, {} changed",
            result.errors.len(),
            result.changed
        );
    }
    Ok(result)
}

pub async fn assign_staff(
    service: &SubjectService,
    subject_id: i64,
    body: AssignStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        assign(storage.as_ref(), subject_id, &body.staff_ids).await,
        "Staff assigned successfully.",
    )
}

pub async fn remove_staff(
    service: &SubjectService,
    subject_id: i64,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_empty(
        remove(storage.as_ref(), subject_id, staff_id).await,
        "Staff removed from subject successfully.",
    )
}

pub async fn overview_handler(
    service: &SubjectService,
    query: SubjectAssignmentParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        overview(storage.as_ref(), query).await,
        "Subject assignments retrieved successfully",
    )
}

pub async fn bulk_update(
    service: &SubjectService,
    body: BulkAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if body.assignments.is_empty() {
        return Ok(error_response(&invalid("No assignments provided.")));
    }
    match bulk_apply(storage.as_ref(), &body.assignments).await {
        Ok(result) => {
            let message = result.summary_message();
            respond(Ok(result), &message)
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::received;
    use crate::models::subjects::requests::SubjectRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    async fn subject(storage: &SeaOrmStorage, name: &str) -> i64 {
        storage
            .create_subject(SubjectRequest {
                name: name.into(),
                code: None,
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_bulk_apply_counts() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = subject(&storage, "Matematika").await;
        let art = subject(&storage, "Seni Budaya").await;
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let same = create_staff(&storage, "Tono", "Guru", "Akademik").await;
        let clerk = create_staff(&storage, "Joko", "Staf", "Tata Usaha").await;
        storage.sync_staff_subjects(same.id, &[math]).await.unwrap();

        let result = bulk_apply(
            &storage,
            &[
                StaffAssignment { staff_id: teacher.id, subject_ids: vec![art, math] },
                StaffAssignment { staff_id: same.id, subject_ids: vec![math] },
                StaffAssignment { staff_id: clerk.id, subject_ids: vec![math] },
                StaffAssignment { staff_id: 999, subject_ids: vec![] },
            ],
        )
        .await
        .unwrap();

        assert_eq!(result.total, 4);
        assert_eq!(result.processed, 2);
        assert_eq!(result.changed, 1);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.summary_message(),
            "Subject assignments updated successfully. Changed: 1, Processed: 2, Skipped: 2. Errors encountered: 2 issues."
        );
    }

    #[tokio::test]
    async fn test_assign_staff_requires_eligibility() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = subject(&storage, "Matematika").await;
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let clerk = create_staff(&storage, "Joko", "Staf", "Tata Usaha").await;

        assert!(assign(&storage, math, &[teacher.id, clerk.id]).await.is_err());
        assert!(storage.list_subject_staff(math).await.unwrap().is_empty());

        let staff = assign(&storage, math, &[teacher.id]).await.unwrap();
        assert_eq!(staff.len(), 1);
    }

    #[tokio::test]
    async fn test_assignment_changes_publish_content_event() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let chemistry = subject(&storage, "Kimia Terapan").await;
        let teacher = create_staff(&storage, "Yusuf Hakim", "Guru", "Akademik").await;
        let mut events = ContentEventBus::get().subscribe();

        assign(&storage, chemistry, &[teacher.id]).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "staff_updated", Some("Kimia Terapan")));

        remove(&storage, chemistry, teacher.id).await.unwrap();
        assert!(received(&mut events, CONTENT_TYPE, "staff_updated", Some("Kimia Terapan")));
        assert!(remove(&storage, chemistry, teacher.id).await.is_err());

        let result = bulk_apply(
            &storage,
            &[StaffAssignment { staff_id: teacher.id, subject_ids: vec![chemistry] }],
        )
        .await
        .unwrap();
        assert_eq!(result.changed, 1);
        assert!(received(&mut events, CONTENT_TYPE, "assignments_updated", None));
    }
}
