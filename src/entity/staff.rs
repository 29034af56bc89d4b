//! 教职工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub position: String,
    pub division: String,
    pub homeroom_class: Option<String>,
    pub photo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::position_histories::Entity")]
    PositionHistories,
    #[sea_orm(has_many = "super::staff_subjects::Entity")]
    StaffSubjects,
    #[sea_orm(has_many = "super::teacher_subject_works::Entity")]
    TeacherSubjectWorks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::position_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PositionHistories.def()
    }
}

impl Related<super::staff_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffSubjects.def()
    }
}

// 经由 staff_subjects 关联科目
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::staff_subjects::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::staff_subjects::Relation::Staff.def().rev())
    }
}

impl Related<super::teacher_subject_works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjectWorks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_staff(self) -> crate::models::staff::entities::Staff {
        crate::models::staff::entities::Staff {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            slug: self.slug,
            position: self.position,
            division: self.division,
            homeroom_class: self.homeroom_class,
            photo: self.photo,
            email: self.email,
            phone: self.phone,
            bio: self.bio,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
