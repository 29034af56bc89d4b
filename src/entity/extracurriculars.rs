//! 课外活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "extracurriculars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::extracurricular_students::Entity")]
    ExtracurricularStudents,
}

impl Related<super::extracurricular_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtracurricularStudents.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::extracurricular_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::extracurricular_students::Relation::Extracurricular.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_extracurricular(
        self,
    ) -> crate::models::extracurriculars::entities::Extracurricular {
        crate::models::extracurriculars::entities::Extracurricular {
            id: self.id,
            name: self.name,
            description: self.description,
            photo: self.photo,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
