use std::collections::HashSet;

use crate::drive::{self, DriveClient};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::users::entities::UserRole;
use crate::models::work_items::{
    entities::{TeacherSubjectWork, WorkItem, percentage},
    requests::{TeacherWorkItemRequest, WorkItemRequest},
    responses::{AdminWorkOverview, TeacherWithSubjects, WorkItemCompletion, WorkItemStats},
};
use crate::services::{found, invalid};
use crate::storage::Storage;

use super::{NOT_FOUND, WORK_ITEM_CONTENT};

const NAME_TAKEN: &str = "The name has already been taken.";

async fn ensure_name_free(storage: &dyn Storage, name: &str, exclude_id: Option<i64>) -> Result<()> {
    if storage.work_item_name_taken(name, exclude_id).await? {
        return Err(invalid(NAME_TAKEN));
    }
    Ok(())
}

// 每位任课教师对每个文档类型都应提交一次
async fn compute_stats(storage: &dyn Storage, total_teachers: i64) -> Result<WorkItemStats> {
    let items = storage.list_work_items().await?;
    let works = storage.list_teacher_subject_works().await?;
    let work_ids: Vec<i64> = works.iter().map(|w| w.id).collect();
    let with_files: HashSet<i64> = storage
        .list_work_files(&work_ids)
        .await?
        .into_iter()
        .map(|f| f.teacher_subject_work_id)
        .collect();
    let completed: Vec<&TeacherSubjectWork> =
        works.iter().filter(|w| with_files.contains(&w.id)).collect();

    let total_work_items = items.len() as i64;
    let total_expected_submissions = total_teachers * total_work_items;
    let completed_submissions = completed.len() as i64;

    let work_item_stats = items
        .iter()
        .map(|item| {
            let completion_count =
                completed.iter().filter(|w| w.work_item_id == item.id).count() as i64;
            WorkItemCompletion {
                work_item: item.name.clone(),
                completion_count,
                total_teachers,
                completion_rate: percentage(completion_count, total_teachers),
            }
        })
        .collect();

    Ok(WorkItemStats {
        total_teachers,
        total_work_items,
        total_expected_submissions,
        completed_submissions,
        overall_completion_rate: percentage(completed_submissions, total_expected_submissions),
        work_item_stats,
    })
}

pub(crate) async fn stats(storage: &dyn Storage) -> Result<WorkItemStats> {
    let total_teachers = storage.list_teachers_with_subjects().await?.len() as i64;
    compute_stats(storage, total_teachers).await
}

pub(crate) async fn overview(storage: &dyn Storage) -> Result<AdminWorkOverview> {
    let teachers: Vec<TeacherWithSubjects> = storage
        .list_teachers_with_subjects()
        .await?
        .into_iter()
        .map(|(staff, subjects)| TeacherWithSubjects { staff, subjects })
        .collect();
    let stats = compute_stats(storage, teachers.len() as i64).await?;
    Ok(AdminWorkOverview {
        work_items: storage.list_work_items().await?,
        teachers,
        stats,
    })
}

pub(crate) async fn create(storage: &dyn Storage, req: WorkItemRequest, role: &UserRole) -> Result<WorkItem> {
    req.validate().map_err(invalid)?;
    ensure_name_free(storage, &req.name, None).await?;
    let item = storage
        .create_work_item(&req.name, req.is_required, role.as_str())
        .await?;
    tracing::info!("Work item '{}' created by {}", item.name, role.as_str());
    Ok(item)
}

pub(crate) async fn update(storage: &dyn Storage, id: i64, req: WorkItemRequest) -> Result<WorkItem> {
    req.validate().map_err(invalid)?;
    found(storage.get_work_item(id).await?, NOT_FOUND)?;
    ensure_name_free(storage, &req.name, Some(id)).await?;
    let item = found(
        storage.update_work_item(id, &req.name, req.is_required).await?,
        NOT_FOUND,
    )?;
    ContentEventBus::get().content_updated(
        WORK_ITEM_CONTENT,
        "updated",
        Some(item.id),
        Some(&item.name),
    );
    Ok(item)
}

pub(crate) async fn create_for_teacher(storage: &dyn Storage, req: TeacherWorkItemRequest) -> Result<WorkItem> {
    req.validate().map_err(invalid)?;
    ensure_name_free(storage, &req.name, None).await?;
    storage
        .create_work_item(&req.name, false, UserRole::TEACHER)
        .await
}

// 删除文档类型前先清理各教师目录下的 Drive 文件与文件夹
async fn destroy_with_files(storage: &dyn Storage, client: &dyn DriveClient, item: &WorkItem) -> Result<()> {
    let works = storage.list_works_for_item(item.id).await?;
    let work_ids: Vec<i64> = works.iter().map(|w| w.id).collect();
    for file in storage.list_work_files(&work_ids).await? {
        drive::delete_quietly(client, &file.file_path).await;
    }
    for work in &works {
        drive::delete_quietly(client, &work.gdrive_folder_id).await;
    }
    storage.delete_work_item(item.id).await?;
    ContentEventBus::get().content_updated(
        WORK_ITEM_CONTENT,
        "deleted",
        Some(item.id),
        Some(&item.name),
    );
    tracing::info!(
        "Deleted work item '{}' with {} teacher folders",
        item.name,
        works.len()
    );
    Ok(())
}

pub(crate) async fn destroy(storage: &dyn Storage, client: &dyn DriveClient, id: i64) -> Result<()> {
    let item = found(storage.get_work_item(id).await?, NOT_FOUND)?;
    destroy_with_files(storage, client, &item).await
}

/// 教师只能删除自己创建的可选文档类型
pub(crate) async fn destroy_for_teacher(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
) -> Result<()> {
    let item = found(storage.get_work_item(id).await?, NOT_FOUND)?;
    if item.is_required {
        return Err(SchoolSysError::authorization("Cannot delete required work items"));
    }
    if item.created_by_role != UserRole::TEACHER {
        return Err(SchoolSysError::authorization(
            "You can only delete work items you created",
        ));
    }
    destroy_with_files(storage, client, &item).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::events::received;
    use crate::models::subjects::requests::SubjectRequest;
    use crate::models::work_items::requests::NewWorkFile;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    fn item_request(name: &str, is_required: bool) -> WorkItemRequest {
        WorkItemRequest {
            name: name.into(),
            is_required,
        }
    }

    #[tokio::test]
    async fn test_stats_count_works_with_files() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let rina = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let budi = create_staff(&storage, "Budi", "Guru", "Akademik").await;
        let subject = storage
            .create_subject(SubjectRequest {
                name: "Matematika".into(),
                code: Some("MTK".into()),
                description: None,
            })
            .await
            .unwrap();
        storage.sync_staff_subjects(rina.id, &[subject.id]).await.unwrap();
        storage.sync_staff_subjects(budi.id, &[subject.id]).await.unwrap();

        let prota = create(&storage, item_request("Prota", true), &UserRole::Headmaster)
            .await
            .unwrap();
        create(&storage, item_request("Prosem", true), &UserRole::Headmaster)
            .await
            .unwrap();
        let err = create(&storage, item_request("prota", false), &UserRole::Headmaster)
            .await
            .unwrap_err();
        assert_eq!(err.message(), NAME_TAKEN);

        let work = storage
            .upsert_teacher_subject_work(rina.id, subject.id, prota.id, "Prota", "folder")
            .await
            .unwrap();
        storage
            .create_work_file(NewWorkFile {
                teacher_subject_work_id: work.id,
                file_name: "prota.pdf".into(),
                file_url: "https://drive.google.com/file/d/abc/view".into(),
                file_path: "abc".into(),
                file_size: 10,
                mime_type: "application/pdf".into(),
            })
            .await
            .unwrap();

        let stats = stats(&storage).await.unwrap();
        assert_eq!(stats.total_teachers, 2);
        assert_eq!(stats.total_expected_submissions, 4);
        assert_eq!(stats.completed_submissions, 1);
        assert_eq!(stats.overall_completion_rate, 25.0);
        let prota_stats = stats
            .work_item_stats
            .iter()
            .find(|s| s.work_item == "Prota")
            .unwrap();
        assert_eq!(prota_stats.completion_rate, 50.0);
    }

    #[tokio::test]
    async fn test_teacher_can_only_delete_own_optional_items() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-work-{}", uuid::Uuid::new_v4())),
        );
        let required = create(&storage, item_request("Modul Ajar", true), &UserRole::Headmaster)
            .await
            .unwrap();
        let optional = create_for_teacher(
            &storage,
            TeacherWorkItemRequest {
                name: "Catatan Harian".into(),
            },
        )
        .await
        .unwrap();
        assert!(!optional.is_required);
        assert_eq!(optional.created_by_role, "teacher");

        let err = destroy_for_teacher(&storage, &client, required.id)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Cannot delete required work items");

        destroy_for_teacher(&storage, &client, optional.id).await.unwrap();
        assert!(storage.get_work_item(optional.id).await.unwrap().is_none());

        let renamed = update(&storage, required.id, item_request("Modul", false))
            .await
            .unwrap();
        assert_eq!((renamed.name.as_str(), renamed.is_required), ("Modul", false));
    }

    #[tokio::test]
    async fn test_item_changes_publish_content_event() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-work-{}", uuid::Uuid::new_v4())),
        );
        let item = create(&storage, item_request("Jurnal Mengajar", true), &UserRole::Headmaster)
            .await
            .unwrap();
        let mut events = ContentEventBus::get().subscribe();

        update(&storage, item.id, item_request("Jurnal Kelas", true)).await.unwrap();
        assert!(received(&mut events, WORK_ITEM_CONTENT, "updated", Some("Jurnal Kelas")));

        destroy(&storage, &client, item.id).await.unwrap();
        assert!(received(&mut events, WORK_ITEM_CONTENT, "deleted", Some("Jurnal Kelas")));
    }
}
