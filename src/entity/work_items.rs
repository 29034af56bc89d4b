//! 教学文档类型实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub is_required: bool,
    // 创建者角色：admin 或 teacher
    pub created_by_role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::teacher_subject_works::Entity")]
    TeacherSubjectWorks,
}

impl Related<super::teacher_subject_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjectWorks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_work_item(self) -> crate::models::work_items::entities::WorkItem {
        crate::models::work_items::entities::WorkItem {
            id: self.id,
            name: self.name,
            is_required: self.is_required,
            created_by_role: self.created_by_role,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
