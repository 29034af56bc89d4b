//! 相册条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gallery_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub gallery_id: i64,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub mime_type: Option<String>,
    pub file_path: Option<String>,
    // JSON 文本
    pub metadata: Option<String>,
    pub sort_order: i32,
    pub is_featured: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::galleries::Entity",
        from = "Column::GalleryId",
        to = "super::galleries::Column::Id",
        on_delete = "Cascade"
    )]
    Gallery,
}

impl Related<super::galleries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gallery.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_gallery_item(self) -> crate::models::galleries::entities::GalleryItem {
        crate::models::galleries::entities::GalleryItem {
            id: self.id,
            gallery_id: self.gallery_id,
            title: self.title,
            caption: self.caption,
            mime_type: self.mime_type,
            file_path: self.file_path,
            metadata: super::parse_json(self.metadata),
            sort_order: self.sort_order,
            is_featured: self.is_featured,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
