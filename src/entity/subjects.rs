//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staff_subjects::Entity")]
    StaffSubjects,
    #[sea_orm(has_many = "super::teacher_subject_works::Entity")]
    TeacherSubjectWorks,
}

impl Related<super::staff_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffSubjects.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        super::staff_subjects::Relation::Staff.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::staff_subjects::Relation::Subject.def().rev())
    }
}

impl Related<super::teacher_subject_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjectWorks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        crate::models::subjects::entities::Subject {
            id: self.id,
            name: self.name,
            code: self.code,
            description: self.description,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
