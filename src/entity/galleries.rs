//! 相册实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "galleries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub is_published: bool,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gallery_items::Entity")]
    GalleryItems,
}

impl Related<super::gallery_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_gallery(self) -> crate::models::galleries::entities::Gallery {
        crate::models::galleries::entities::Gallery {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            featured_image: self.featured_image,
            is_published: self.is_published,
            sort_order: self.sort_order,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
