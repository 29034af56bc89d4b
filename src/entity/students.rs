//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homeroom_teacher_id: Option<i64>,
    #[sea_orm(unique)]
    pub nisn: String,
    pub name: String,
    pub gender: String,
    // YYYY-MM-DD
    pub birth_date: String,
    pub birth_place: Option<String>,
    pub religion: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub class: String,
    pub entry_year: i32,
    pub graduation_year: Option<i32>,
    pub status: String,
    pub photo: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::HomeroomTeacherId",
        to = "super::staff::Column::Id",
        on_delete = "SetNull"
    )]
    HomeroomTeacher,
    #[sea_orm(has_many = "super::extracurricular_students::Entity")]
    ExtracurricularStudents,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeroomTeacher.def()
    }
}

impl Related<super::extracurricular_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtracurricularStudents.def()
    }
}

impl Related<super::extracurriculars::Entity> for Entity {
    fn to() -> RelationDef {
        super::extracurricular_students::Relation::Extracurricular.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::extracurricular_students::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Gender, Student, StudentStatus};

        Student {
            id: self.id,
            nisn: self.nisn,
            name: self.name,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Male),
            birth_date: self.birth_date,
            birth_place: self.birth_place,
            religion: self.religion,
            address: self.address,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            class: self.class,
            homeroom_teacher_id: self.homeroom_teacher_id,
            entry_year: self.entry_year,
            graduation_year: self.graduation_year,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            photo: self.photo,
            notes: self.notes,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
