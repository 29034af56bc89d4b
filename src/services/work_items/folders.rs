use std::collections::HashMap;

use crate::drive::{self, DriveClient};
use crate::errors::Result;
use crate::events::ContentEventBus;
use crate::models::google_drive::responses::DriveFileMetadata;
use crate::models::staff::entities::Staff;
use crate::models::work_items::{
    entities::{TeacherWorkFile, percentage},
    requests::{AccessAction, InitializeFoldersRequest, NewWorkFile, WorkLookupQuery},
    responses::{
        InitializeFoldersResponse, SubjectProgress, TrackAccessResponse, WorkFolder,
        WorkItemProgress, WorkLookupResponse,
    },
};
use crate::services::{found, invalid};
use crate::storage::Storage;
use crate::utils::drive_url::{sanitize_folder_name, unique_file_name, view_url};
use crate::utils::multipart::UploadedFile;

use super::{StaffScope, WORK_FILE_CONTENT};

pub(crate) const FILE_NOT_FOUND: &str = "File not found";

async fn existing_teacher(storage: &dyn Storage, teacher_id: i64) -> Result<Staff> {
    storage
        .get_staff_by_id(teacher_id)
        .await?
        .ok_or_else(|| invalid("The selected teacher id is invalid."))
}

/// 创建 "{科目} ({代码})/{教师}/{文档类型}" 目录树并记录每个文档类型的文件夹
pub(crate) async fn initialize_folders(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    scope: StaffScope,
    req: InitializeFoldersRequest,
) -> Result<InitializeFoldersResponse> {
    let teacher = existing_teacher(storage, req.teacher_id).await?;
    let subject = storage
        .get_subject_by_id(req.subject_id)
        .await?
        .ok_or_else(|| invalid("The selected subject id is invalid."))?;
    scope.check(teacher.id, "You can only initialize your own folders")?;

    let subject_folder_id =
        drive::ensure_folder_path(client, &[&sanitize_folder_name(&subject.folder_name())]).await?;
    let teacher_folder_id = client
        .ensure_folder(&sanitize_folder_name(&teacher.name), Some(&subject_folder_id))
        .await?;

    let mut work_item_folders = Vec::new();
    for item in storage.list_work_items().await? {
        let folder_id = client
            .ensure_folder(&sanitize_folder_name(&item.name), Some(&teacher_folder_id))
            .await?;
        storage
            .upsert_teacher_subject_work(teacher.id, subject.id, item.id, &item.name, &folder_id)
            .await?;
        work_item_folders.push(WorkFolder {
            work_item_id: item.id,
            name: item.name,
            folder_id,
        });
    }

    tracing::info!(
        "Initialized {} work folders for {} / {}",
        work_item_folders.len(),
        teacher.name,
        subject.name
    );
    Ok(InitializeFoldersResponse {
        subject_folder_id,
        teacher_folder_id,
        work_item_folders,
    })
}

pub(crate) async fn upload_file(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    scope: StaffScope,
    file: UploadedFile,
) -> Result<TeacherWorkFile> {
    let work_id = file
        .fields
        .get("teacher_subject_work_id")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| invalid("The teacher subject work id field is required."))?;
    let work = storage
        .get_teacher_subject_work(work_id)
        .await?
        .ok_or_else(|| invalid("The selected teacher subject work id is invalid."))?;
    scope.check(work.staff_id, "You can only upload to your own folders")?;

    let file_name = unique_file_name(&file.original_name, chrono::Utc::now().timestamp());
    let file_size = file.size();
    let mime_type = file.content_type.clone();
    let meta = client
        .upload(&work.gdrive_folder_id, &file_name, &mime_type, file.data)
        .await?;
    if let Err(e) = client.make_public(&meta.id).await {
        tracing::warn!("Failed to make work file {} public: {}", meta.id, e);
    }

    let record = storage
        .create_work_file(NewWorkFile {
            teacher_subject_work_id: work.id,
            file_name,
            file_url: meta.web_view_link.clone().unwrap_or_else(|| view_url(&meta.id)),
            file_path: meta.id,
            file_size,
            mime_type,
        })
        .await?;
    tracing::info!("Uploaded work file {} to folder {}", record.file_name, work.folder_name);
    ContentEventBus::get().content_updated(
        WORK_FILE_CONTENT,
        "created",
        Some(record.id),
        Some(&record.file_name),
    );
    Ok(record)
}

pub(crate) async fn delete_file(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    scope: StaffScope,
    id: i64,
) -> Result<()> {
    let file = found(storage.get_work_file(id).await?, FILE_NOT_FOUND)?;
    if let Some(work) = storage
        .get_teacher_subject_work(file.teacher_subject_work_id)
        .await?
    {
        scope.check(work.staff_id, "You can only delete your own files")?;
    }
    drive::delete_quietly(client, &file.file_path).await;
    storage.delete_work_file(id).await?;
    ContentEventBus::get().content_updated(
        WORK_FILE_CONTENT,
        "deleted",
        Some(file.id),
        Some(&file.file_name),
    );
    Ok(())
}

pub(crate) async fn file_metadata(client: &dyn DriveClient, file_url: &str) -> Result<DriveFileMetadata> {
    let file_id = drive::file_id_from_url(file_url.trim())
        .ok_or_else(|| invalid("Invalid Google Drive URL"))?;
    client.metadata(&file_id).await
}

pub(crate) async fn lookup(
    storage: &dyn Storage,
    scope: StaffScope,
    query: WorkLookupQuery,
) -> Result<WorkLookupResponse> {
    existing_teacher(storage, query.teacher_id).await?;
    if storage.get_subject_by_id(query.subject_id).await?.is_none() {
        return Err(invalid("The selected subject id is invalid."));
    }
    if storage.get_work_item(query.work_item_id).await?.is_none() {
        return Err(invalid("The selected work item id is invalid."));
    }
    let work = found(
        storage
            .find_teacher_subject_work(query.teacher_id, query.subject_id, query.work_item_id)
            .await?,
        "Teacher subject work record not found. Please initialize folders first.",
    )?;
    scope.check(work.staff_id, "You can only access your own work folders")?;
    Ok(WorkLookupResponse {
        teacher_subject_work_id: work.id,
        gdrive_folder_id: work.gdrive_folder_id,
    })
}

/// 教师每个任教科目的完成情况：有文件的文档类型视为完成
pub(crate) async fn teacher_progress(storage: &dyn Storage, teacher: &Staff) -> Result<Vec<SubjectProgress>> {
    let subjects = storage.list_staff_subjects(teacher.id).await?;
    let items = storage.list_work_items().await?;
    let works = storage.list_works_for_staff(teacher.id).await?;
    let work_ids: Vec<i64> = works.iter().map(|w| w.id).collect();

    let mut files_by_work: HashMap<i64, Vec<TeacherWorkFile>> = HashMap::new();
    for file in storage.list_work_files(&work_ids).await? {
        files_by_work
            .entry(file.teacher_subject_work_id)
            .or_default()
            .push(file);
    }

    let mut progress = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let mut work_items = Vec::with_capacity(items.len());
        let mut completed = 0;
        for item in &items {
            let work = works
                .iter()
                .find(|w| w.subject_id == subject.id && w.work_item_id == item.id);
            let files = work
                .and_then(|w| files_by_work.get(&w.id))
                .cloned()
                .unwrap_or_default();
            if !files.is_empty() {
                completed += 1;
            }
            work_items.push(WorkItemProgress {
                work_item: item.clone(),
                teacher_subject_work_id: work.map(|w| w.id),
                has_folder: work.is_some(),
                files_count: files.len() as i64,
                files,
                folder_url: work
                    .filter(|w| !w.gdrive_folder_id.is_empty())
                    .map(|w| w.folder_url()),
            });
        }
        let total = items.len() as i64;
        progress.push(SubjectProgress {
            subject,
            total_work_items: total,
            completed_work_items: completed,
            completion_percentage: percentage(completed, total),
            work_items,
        });
    }
    Ok(progress)
}

pub(crate) async fn track_access(
    storage: &dyn Storage,
    scope: StaffScope,
    id: i64,
    action: AccessAction,
) -> Result<TrackAccessResponse> {
    let file = found(storage.get_work_file(id).await?, FILE_NOT_FOUND)?;
    if let Some(work) = storage
        .get_teacher_subject_work(file.teacher_subject_work_id)
        .await?
    {
        scope.check(work.staff_id, "You can only access your own files")?;
    }
    let tracked = found(
        storage
            .track_work_file_access(id, action == AccessAction::Download)
            .await?,
        FILE_NOT_FOUND,
    )?;
    tracing::debug!("Tracked {:?} of work file {}", action, tracked.id);
    Ok(TrackAccessResponse {
        views: tracked.views,
        downloads: tracked.downloads,
        last_accessed: tracked.last_accessed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::events::received;
    use crate::models::subjects::requests::SubjectRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    fn pdf(work_id: i64) -> UploadedFile {
        UploadedFile {
            original_name: "Prota Kelas 7.pdf".into(),
            extension: ".pdf".into(),
            content_type: "application/pdf".into(),
            data: b"%PDF-1.4 test".to_vec(),
            fields: HashMap::from([("teacher_subject_work_id".to_string(), work_id.to_string())]),
        }
    }

    #[tokio::test]
    async fn test_folders_upload_progress_and_access() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-work-{}", uuid::Uuid::new_v4())),
        );
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
        let prota = storage.create_work_item("Prota", true, "headmaster").await.unwrap();
        storage.create_work_item("Prosem", true, "headmaster").await.unwrap();

        let request = || InitializeFoldersRequest {
            teacher_id: rina.id,
            subject_id: subject.id,
        };
        let err = initialize_folders(&storage, &client, StaffScope::Own(budi.id), request())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E013");

        let folders = initialize_folders(&storage, &client, StaffScope::Own(rina.id), request())
            .await
            .unwrap();
        assert_eq!(folders.work_item_folders.len(), 2);

        let work = lookup(
            &storage,
            StaffScope::All,
            WorkLookupQuery {
                teacher_id: rina.id,
                subject_id: subject.id,
                work_item_id: prota.id,
            },
        )
        .await
        .unwrap();

        let mut events = ContentEventBus::get().subscribe();
        let file = upload_file(&storage, &client, StaffScope::Own(rina.id), pdf(work.teacher_subject_work_id))
            .await
            .unwrap();
        assert_eq!(file.views, 1);
        assert!(received(&mut events, WORK_FILE_CONTENT, "created", Some(&file.file_name)));
        assert!(file.file_name.ends_with(".pdf"));

        let progress = teacher_progress(&storage, &rina).await.unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].completed_work_items, 1);
        assert_eq!(progress[0].completion_percentage, 50.0);

        let tracked = track_access(&storage, StaffScope::All, file.id, AccessAction::Download)
            .await
            .unwrap();
        assert_eq!((tracked.views, tracked.downloads), (2, 1));

        let err = delete_file(&storage, &client, StaffScope::Own(budi.id), file.id)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "You can only delete your own files");
        delete_file(&storage, &client, StaffScope::Own(rina.id), file.id)
            .await
            .unwrap();
        assert!(storage.get_work_file(file.id).await.unwrap().is_none());
        assert!(received(&mut events, WORK_FILE_CONTENT, "deleted", Some(&file.file_name)));
    }

    #[tokio::test]
    async fn test_metadata_rejects_unknown_urls() {
        let client = LocalDriveClient::new(std::env::temp_dir().join("schoolsys-work-meta"));
        let err = file_metadata(&client, "https://example.com/file.pdf")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid Google Drive URL");
    }
}
