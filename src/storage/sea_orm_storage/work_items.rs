use super::SeaOrmStorage;
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teacher_subject_works::{
    ActiveModel as WorkActiveModel, Column as WorkColumn, Entity as TeacherSubjectWorks,
};
use crate::entity::teacher_work_files::{
    ActiveModel as FileActiveModel, Column as FileColumn, Entity as TeacherWorkFiles,
};
use crate::entity::work_items::{ActiveModel, Column, Entity as WorkItems};
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    staff::entities::Staff,
    subjects::entities::Subject,
    work_items::{
        entities::{TeacherSubjectWork, TeacherWorkFile, WorkItem},
        requests::NewWorkFile,
    },
};
use crate::utils::sql::equals_ci;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 文档类型：必填在前，再按名称
    pub async fn list_work_items_impl(&self) -> Result<Vec<WorkItem>> {
        let items = WorkItems::find()
            .order_by_desc(Column::IsRequired)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文档类型失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_work_item()).collect())
    }

    pub async fn get_work_item_impl(&self, id: i64) -> Result<Option<WorkItem>> {
        let result = WorkItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文档类型失败: {e}")))?;

        Ok(result.map(|m| m.into_work_item()))
    }

    pub async fn work_item_name_taken_impl(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = WorkItems::find().filter(equals_ci(Column::Name, name.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查文档类型失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_work_item_impl(
        &self,
        name: &str,
        is_required: bool,
        created_by_role: &str,
    ) -> Result<WorkItem> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(name.trim().to_string()),
            is_required: Set(is_required),
            created_by_role: Set(created_by_role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建文档类型失败: {e}")))?;

        Ok(result.into_work_item())
    }

    pub async fn update_work_item_impl(
        &self,
        id: i64,
        name: &str,
        is_required: bool,
    ) -> Result<Option<WorkItem>> {
        if self.get_work_item_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(name.trim().to_string()),
            is_required: Set(is_required),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新文档类型失败: {e}")))?;

        Ok(Some(result.into_work_item()))
    }

    pub async fn delete_work_item_impl(&self, id: i64) -> Result<bool> {
        let result = WorkItems::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除文档类型失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 拥有任教科目的教师及其科目
    pub async fn list_teachers_with_subjects_impl(&self) -> Result<Vec<(Staff, Vec<Subject>)>> {
        let rows = StaffEntity::find()
            .find_with_related(Subjects)
            .order_by_asc(StaffColumn::Name)
            .order_by_asc(SubjectColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教师科目失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter(|(_, subjects)| !subjects.is_empty())
            .map(|(staff, subjects)| {
                (
                    staff.into_staff(),
                    subjects.into_iter().map(|s| s.into_subject()).collect(),
                )
            })
            .collect())
    }

    pub async fn list_teacher_subject_works_impl(&self) -> Result<Vec<TeacherSubjectWork>> {
        let rows = TeacherSubjectWorks::find()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档目录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_teacher_subject_work()).collect())
    }

    pub async fn list_works_for_staff_impl(&self, staff_id: i64) -> Result<Vec<TeacherSubjectWork>> {
        let rows = TeacherSubjectWorks::find()
            .filter(WorkColumn::StaffId.eq(staff_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档目录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_teacher_subject_work()).collect())
    }

    pub async fn list_works_for_item_impl(&self, work_item_id: i64) -> Result<Vec<TeacherSubjectWork>> {
        let rows = TeacherSubjectWorks::find()
            .filter(WorkColumn::WorkItemId.eq(work_item_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档目录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_teacher_subject_work()).collect())
    }

    pub async fn get_teacher_subject_work_impl(&self, id: i64) -> Result<Option<TeacherSubjectWork>> {
        let result = TeacherSubjectWorks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档目录失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_subject_work()))
    }

    pub async fn find_teacher_subject_work_impl(
        &self,
        staff_id: i64,
        subject_id: i64,
        work_item_id: i64,
    ) -> Result<Option<TeacherSubjectWork>> {
        let result = TeacherSubjectWorks::find()
            .filter(WorkColumn::StaffId.eq(staff_id))
            .filter(WorkColumn::SubjectId.eq(subject_id))
            .filter(WorkColumn::WorkItemId.eq(work_item_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档目录失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_subject_work()))
    }

    /// 创建或更新 教师-科目-文档类型 的 Drive 文件夹记录
    pub async fn upsert_teacher_subject_work_impl(
        &self,
        staff_id: i64,
        subject_id: i64,
        work_item_id: i64,
        folder_name: &str,
        gdrive_folder_id: &str,
    ) -> Result<TeacherSubjectWork> {
        let now = chrono::Utc::now().timestamp();
        let existing = self
            .find_teacher_subject_work_impl(staff_id, subject_id, work_item_id)
            .await?;

        let result = match existing {
            Some(work) => WorkActiveModel {
                id: Set(work.id),
                folder_name: Set(folder_name.to_string()),
                gdrive_folder_id: Set(gdrive_folder_id.to_string()),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&self.db)
            .await,
            None => WorkActiveModel {
                staff_id: Set(staff_id),
                subject_id: Set(subject_id),
                work_item_id: Set(work_item_id),
                folder_name: Set(folder_name.to_string()),
                gdrive_folder_id: Set(gdrive_folder_id.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await,
        }
        .map_err(|e| SchoolSysError::database_operation(format!("保存教学文档目录失败: {e}")))?;

        Ok(result.into_teacher_subject_work())
    }

    /// 目录下的文件（最新上传在前）
    pub async fn list_work_files_impl(&self, work_ids: &[i64]) -> Result<Vec<TeacherWorkFile>> {
        if work_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = TeacherWorkFiles::find()
            .filter(FileColumn::TeacherSubjectWorkId.is_in(work_ids.iter().copied()))
            .order_by_desc(FileColumn::UploadedAt)
            .order_by_desc(FileColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_teacher_work_file()).collect())
    }

    pub async fn get_work_file_impl(&self, id: i64) -> Result<Option<TeacherWorkFile>> {
        let result = TeacherWorkFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_work_file()))
    }

    pub async fn create_work_file_impl(&self, file: NewWorkFile) -> Result<TeacherWorkFile> {
        let now = chrono::Utc::now().timestamp();
        let model = FileActiveModel {
            teacher_subject_work_id: Set(file.teacher_subject_work_id),
            file_name: Set(file.file_name),
            file_url: Set(file.file_url),
            file_path: Set(file.file_path),
            file_size: Set(file.file_size),
            mime_type: Set(file.mime_type),
            uploaded_at: Set(now),
            last_accessed: Set(Some(now)),
            views: Set(1),
            downloads: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("保存教学文档失败: {e}")))?;

        Ok(result.into_teacher_work_file())
    }

    pub async fn delete_work_file_impl(&self, id: i64) -> Result<bool> {
        let result = TeacherWorkFiles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除教学文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 记录访问：浏览次数 +1，下载时下载次数也 +1
    pub async fn track_work_file_access_impl(
        &self,
        id: i64,
        download: bool,
    ) -> Result<Option<TeacherWorkFile>> {
        let Some(existing) = TeacherWorkFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教学文档失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let views = existing.views + 1;
        let downloads = existing.downloads + i32::from(download);
        let mut model: FileActiveModel = existing.into();
        model.views = Set(views);
        model.downloads = Set(downloads);
        model.last_accessed = Set(Some(now));
        model.updated_at = Set(now);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("记录访问失败: {e}")))?;

        Ok(Some(result.into_teacher_work_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subjects::requests::SubjectRequest;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    #[tokio::test]
    async fn test_upsert_work_and_track_access() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let subject = storage
            .create_subject_impl(SubjectRequest {
                name: "Matematika".into(),
                code: Some("MTK".into()),
                description: None,
            })
            .await
            .unwrap();
        let item = storage.create_work_item_impl("Prota", true, "admin").await.unwrap();

        let first = storage
            .upsert_teacher_subject_work_impl(teacher.id, subject.id, item.id, "Prota", "f1")
            .await
            .unwrap();
        let second = storage
            .upsert_teacher_subject_work_impl(teacher.id, subject.id, item.id, "Prota", "f2")
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.gdrive_folder_id, "f2");

        let file = storage
            .create_work_file_impl(NewWorkFile {
                teacher_subject_work_id: second.id,
                file_name: "prota.pdf".into(),
                file_url: "https://drive.google.com/file/d/abc/view".into(),
                file_path: "abc".into(),
                file_size: 2048,
                mime_type: "application/pdf".into(),
            })
            .await
            .unwrap();

        storage.track_work_file_access_impl(file.id, false).await.unwrap();
        let tracked = storage
            .track_work_file_access_impl(file.id, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tracked.views, 3);
        assert_eq!(tracked.downloads, 1);
        assert!(tracked.last_accessed.is_some());
    }

    #[tokio::test]
    async fn test_teachers_with_subjects_skips_unassigned() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let rina = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        create_staff(&storage, "Tono", "Guru", "Akademik").await;
        let subject = storage
            .create_subject_impl(SubjectRequest {
                name: "IPA".into(),
                code: None,
                description: None,
            })
            .await
            .unwrap();
        storage.sync_staff_subjects_impl(rina.id, &[subject.id]).await.unwrap();

        let teachers = storage.list_teachers_with_subjects_impl().await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].0.name, "Rina");
        assert_eq!(teachers[0].1.len(), 1);
        assert!(storage.work_item_name_taken_impl("IPA", None).await.is_ok());
    }
}
