use crate::models::common::PaginationQuery;
use crate::models::posts::requests::PublishStatus;
use crate::utils::validate::{check_length, check_max};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub status: Option<PublishStatus>,
}

// 表单提交的相册条目；已有条目带数字ID，新条目可能带前端临时ID（如 item_123）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryItemInput {
    pub id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub mime_type: Option<String>,
    pub file_path: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub sort_order: Option<i32>,
    pub metadata: Option<serde_json::Value>,
    // 被替换的旧文件地址
    pub old_file_path: Option<String>,
}

impl GalleryItemInput {
    /// 数字ID（或数字字符串）视为已有条目
    pub fn existing_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        check_max(self.title.as_deref(), 255, "Item title cannot exceed 255 characters.")?;
        check_max(self.file_path.as_deref(), 500, "Item file path cannot exceed 500 characters.")?;
        check_max(
            self.old_file_path.as_deref(),
            500,
            "Item file path cannot exceed 500 characters.",
        )?;
        if self.sort_order.is_some_and(|s| s < 0) {
            return Err("Item sort order must be at least 0.".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryRequest {
    pub title: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    pub sort_order: Option<i32>,
    // 为 None 时更新操作不改动条目
    pub items: Option<Vec<GalleryItemInput>>,
}

impl GalleryRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.title, 1, 255, "Gallery title is required and cannot exceed 255 characters.")?;
        check_max(
            self.featured_image.as_deref(),
            500,
            "Featured image URL cannot exceed 500 characters.",
        )?;
        if self.sort_order.is_some_and(|s| s < 0) {
            return Err("Sort order must be at least 0.".into());
        }
        for item in self.items.iter().flatten() {
            item.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryOrder {
    pub id: i64,
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct ReorderGalleriesRequest {
    pub galleries: Vec<GalleryOrder>,
}

impl ReorderGalleriesRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.galleries.is_empty() {
            return Err("The galleries field is required.".into());
        }
        if self.galleries.iter().any(|g| g.sort_order < 0) {
            return Err("Sort order must be at least 0.".into());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct DeleteDriveFileRequest {
    pub file_id: String,
}

// 存储层使用的相册数据
#[derive(Debug, Clone)]
pub struct GalleryChanges {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub is_published: bool,
    pub sort_order: i32,
}

// 存储层使用的相册条目数据
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItemData {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub mime_type: Option<String>,
    pub file_path: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub sort_order: i32,
    pub is_featured: bool,
}

// 相册更新时对条目的增删改计划
#[derive(Debug, Clone, Default)]
pub struct GalleryItemPlan {
    pub updates: Vec<(i64, GalleryItemData)>,
    pub creates: Vec<GalleryItemData>,
    pub deletes: Vec<i64>,
    // 需要从 Drive 删除的文件路径
    pub drive_deletions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: serde_json::Value) -> GalleryItemInput {
        GalleryItemInput {
            id: Some(id),
            title: None,
            caption: None,
            mime_type: None,
            file_path: None,
            is_featured: false,
            sort_order: None,
            metadata: None,
            old_file_path: None,
        }
    }

    #[test]
    fn test_existing_id_detection() {
        assert_eq!(input(serde_json::json!(12)).existing_id(), Some(12));
        assert_eq!(input(serde_json::json!("34")).existing_id(), Some(34));
        assert_eq!(input(serde_json::json!("item_1700000000")).existing_id(), None);
    }
}
