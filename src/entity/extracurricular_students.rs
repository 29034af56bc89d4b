//! 课外活动成员关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "extracurricular_students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub extracurricular_id: i64,
    pub student_id: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::extracurriculars::Entity",
        from = "Column::ExtracurricularId",
        to = "super::extracurriculars::Column::Id",
        on_delete = "Cascade"
    )]
    Extracurricular,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::extracurriculars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extracurricular.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
