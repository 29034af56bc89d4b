use super::entities::{Gallery, GalleryItem, GalleryItemType};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 条目展示结构
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryItemView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub item: GalleryItem,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub item_type: GalleryItemType,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub view_url: Option<String>,
    pub download_url: Option<String>,
}

impl From<GalleryItem> for GalleryItemView {
    fn from(item: GalleryItem) -> Self {
        Self {
            item_type: item.item_type(),
            file_url: item.file_url(),
            thumbnail_url: item.thumbnail_url(),
            view_url: item.view_url(),
            download_url: item.download_url(),
            item,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryWithCount {
    #[serde(flatten)]
    #[ts(flatten)]
    pub gallery: Gallery,
    pub items_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<GalleryWithCount>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub gallery: Gallery,
    pub items: Vec<GalleryItemView>,
}

impl GalleryDetailResponse {
    pub fn new(gallery: Gallery, items: Vec<GalleryItem>) -> Self {
        Self {
            gallery,
            items: items.into_iter().map(GalleryItemView::from).collect(),
        }
    }
}

// 相册 Drive 文件夹中的文件
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryDriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub file_type: GalleryItemType,
    pub size: Option<i64>,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub view_url: String,
    pub created_time: Option<String>,
}

// 上传条目文件的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryUploadResponse {
    pub file_id: String,
    pub file_url: String,
    pub file_name: String,
    pub mime_type: String,
    pub thumbnail_url: Option<String>,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct FeaturedImageResponse {
    pub featured_image_url: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryFolderResponse {
    pub folder_id: String,
    pub folder_name: String,
}
