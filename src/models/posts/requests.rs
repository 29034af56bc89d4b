use super::entities::PostCategory;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max};
use serde::Deserialize;
use ts_rs::TS;

// 发布状态筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Draft,
}

impl PublishStatus {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishStatus::Published)
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
pub struct PostListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<PostCategory>,
    pub search: Option<String>,
    pub status: Option<PublishStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
pub struct PostRequest {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: PostCategory,
    pub image: Option<String>,
    // 为 true 时清除已有图片
    #[serde(default)]
    pub remove_image: bool,
    // 自定义发布时间，缺省为当前时间
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub is_published: bool,
}

impl PostRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.title, 1, 255, "Title is required and cannot exceed 255 characters.")?;
        check_max(self.excerpt.as_deref(), 500, "Excerpt cannot exceed 500 characters.")?;
        if self.content.trim().is_empty() {
            return Err("Content is required.".into());
        }
        Ok(())
    }
}

// 切换发布状态
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
pub struct TogglePublishRequest {
    pub is_published: bool,
}

// 存储层使用的文章数据
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: PostCategory,
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_rules() {
        let mut request = PostRequest {
            title: "Penerimaan Siswa Baru".into(),
            excerpt: None,
            content: "<p>Pendaftaran dibuka.</p>".into(),
            category: PostCategory::Announcements,
            image: None,
            remove_image: false,
            created_at: None,
            is_published: true,
        };
        assert!(request.validate().is_ok());
        request.content = " ".into();
        assert_eq!(request.validate().unwrap_err(), "Content is required.");
        request.content = "ok".into();
        request.excerpt = Some("x".repeat(501));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_status_filter_parsing() {
        let status: PublishStatus = serde_json::from_str("\"draft\"").unwrap();
        assert!(!status.is_published());
    }
}
