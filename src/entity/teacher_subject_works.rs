//! 教师-科目-文档类型 目录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_subject_works")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub staff_id: i64,
    pub subject_id: i64,
    pub work_item_id: i64,
    pub folder_name: String,
    pub gdrive_folder_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::Id",
        on_delete = "Cascade"
    )]
    Staff,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::work_items::Entity",
        from = "Column::WorkItemId",
        to = "super::work_items::Column::Id",
        on_delete = "Cascade"
    )]
    WorkItem,
    #[sea_orm(has_many = "super::teacher_work_files::Entity")]
    Files,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::work_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkItem.def()
    }
}

impl Related<super::teacher_work_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_subject_work(
        self,
    ) -> crate::models::work_items::entities::TeacherSubjectWork {
        crate::models::work_items::entities::TeacherSubjectWork {
            id: self.id,
            staff_id: self.staff_id,
            subject_id: self.subject_id,
            work_item_id: self.work_item_id,
            folder_name: self.folder_name,
            gdrive_folder_id: self.gdrive_folder_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
