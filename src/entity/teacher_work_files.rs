//! 教师上传的教学文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_work_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_subject_work_id: i64,
    pub file_name: String,
    pub file_url: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: i64,
    pub last_accessed: Option<i64>,
    pub views: i32,
    pub downloads: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher_subject_works::Entity",
        from = "Column::TeacherSubjectWorkId",
        to = "super::teacher_subject_works::Column::Id",
        on_delete = "Cascade"
    )]
    TeacherSubjectWork,
}

impl Related<super::teacher_subject_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjectWork.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_work_file(self) -> crate::models::work_items::entities::TeacherWorkFile {
        crate::models::work_items::entities::TeacherWorkFile {
            id: self.id,
            teacher_subject_work_id: self.teacher_subject_work_id,
            file_name: self.file_name,
            file_url: self.file_url,
            file_path: self.file_path,
            file_size: self.file_size,
            mime_type: self.mime_type,
            uploaded_at: super::to_datetime(self.uploaded_at),
            last_accessed: self.last_accessed.map(super::to_datetime),
            views: self.views,
            downloads: self.downloads,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
