use crate::utils::drive_url;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct Gallery {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    // 封面图（Drive 链接）
    pub featured_image: Option<String>,
    pub is_published: bool,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Gallery {
    /// Drive 中的相册文件夹名称
    pub fn folder_name(&self) -> String {
        drive_url::sanitize_folder_name(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
#[serde(rename_all = "lowercase")]
pub enum GalleryItemType {
    Image,
    Video,
    Other,
}

impl GalleryItemType {
    pub fn from_mime(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some(m) if m.starts_with("image/") => GalleryItemType::Image,
            Some(m) if m.starts_with("video/") => GalleryItemType::Video,
            _ => GalleryItemType::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gallery.ts")]
pub struct GalleryItem {
    pub id: i64,
    pub gallery_id: i64,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub mime_type: Option<String>,
    pub file_path: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub sort_order: i32,
    pub is_featured: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl GalleryItem {
    pub fn item_type(&self) -> GalleryItemType {
        GalleryItemType::from_mime(self.mime_type.as_deref())
    }

    /// 展示用地址，能识别 Drive 文件时转换为 lh3 链接
    pub fn file_url(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        if path.contains("lh3.googleusercontent.com") {
            return Some(path.to_string());
        }
        Some(
            drive_url::extract_file_id(path)
                .map(|id| drive_url::lh3_url(&id))
                .unwrap_or_else(|| path.to_string()),
        )
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        if self.item_type() != GalleryItemType::Image {
            return None;
        }
        Some(
            drive_url::extract_file_id(path)
                .map(|id| drive_url::thumbnail_url(&id))
                .unwrap_or_else(|| path.to_string()),
        )
    }

    pub fn view_url(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        Some(
            drive_url::extract_file_id(path)
                .map(|id| drive_url::view_url(&id))
                .unwrap_or_else(|| path.to_string()),
        )
    }

    pub fn download_url(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        drive_url::extract_file_id(path).map(|id| drive_url::download_url(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(mime: Option<&str>, path: Option<&str>) -> GalleryItem {
        GalleryItem {
            id: 1,
            gallery_id: 1,
            title: None,
            caption: None,
            mime_type: mime.map(String::from),
            file_path: path.map(String::from),
            metadata: None,
            sort_order: 0,
            is_featured: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_item_type_by_mime() {
        assert_eq!(item(Some("image/png"), None).item_type(), GalleryItemType::Image);
        assert_eq!(item(Some("video/mp4"), None).item_type(), GalleryItemType::Video);
        assert_eq!(item(None, None).item_type(), GalleryItemType::Other);
    }

    #[test]
    fn test_presentation_urls() {
        let id = "1AbCdEfGhIjKlMnOpQrStUvWxYz";
        let image = item(
            Some("image/jpeg"),
            Some(&format!("https://drive.google.com/file/d/{id}/view")),
        );
        assert_eq!(
            image.file_url().unwrap(),
            format!("https://lh3.googleusercontent.com/d/{id}")
        );
        assert_eq!(
            image.thumbnail_url().unwrap(),
            format!("https://lh3.googleusercontent.com/d/{id}=w600-h400-c")
        );
        let video = item(Some("video/mp4"), Some(id));
        assert!(video.thumbnail_url().is_none());
        assert_eq!(
            video.download_url().unwrap(),
            format!("https://drive.google.com/uc?id={id}&export=download")
        );
        assert!(item(Some("image/png"), None).file_url().is_none());
    }
}
