pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::Path;

use crate::config::AppConfig;
use crate::models::files::entities::{FileCategory, is_safe_stored_name};

/// 本地照片存储，不依赖数据库
pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn handle_upload(
        &self,
        category: String,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(category, payload).await
    }

    pub async fn serve(&self, category: String, name: String) -> ActixResult<HttpResponse> {
        download::serve_upload(category, name).await
    }

    pub async fn serve_drive(
        &self,
        path: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::serve_drive_file(path, request).await
    }
}

/// 解析 `{category}/{name}` 形式的相对路径
pub(crate) fn parse_stored_path(path: &str) -> Option<(FileCategory, &str)> {
    let (category, name) = path.split_once('/')?;
    let category = category.parse::<FileCategory>().ok()?;
    is_safe_stored_name(name).then_some((category, name))
}

/// 提交的图片字段与现有图片合并：显式移除、替换或保留
pub(crate) fn merge_image(
    remove: bool,
    submitted: Option<String>,
    current: Option<&str>,
) -> Option<String> {
    if remove {
        return None;
    }
    submitted
        .filter(|path| !path.trim().is_empty())
        .or_else(|| current.map(str::to_string))
}

/// 删除被替换的照片，失败只记录日志
pub(crate) fn remove_stored_file(path: Option<&str>) {
    let Some(path) = path else { return };
    remove_stored_file_in(Path::new(&AppConfig::get().upload.dir), path);
}

fn remove_stored_file_in(dir: &Path, path: &str) {
    let Some((category, name)) = parse_stored_path(path) else {
        tracing::debug!("Skipping removal of non-local photo path: {}", path);
        return;
    };
    let full_path = dir.join(category.as_str()).join(name);
    if full_path.exists()
        && let Err(e) = std::fs::remove_file(&full_path)
    {
        tracing::warn!("Failed to remove photo {}: {}", full_path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_path() {
        assert_eq!(
            parse_stored_path("staff/1700000000-ab.jpg"),
            Some((FileCategory::Staff, "1700000000-ab.jpg"))
        );
        assert!(parse_stored_path("staff/../x.jpg").is_none());
        assert!(parse_stored_path("https://example.com/a.jpg").is_none());
        assert!(parse_stored_path("unknown/a.jpg").is_none());
    }

    #[test]
    fn test_merge_image() {
        assert_eq!(merge_image(true, Some("posts/2.jpg".into()), Some("posts/1.jpg")), None);
        assert_eq!(
            merge_image(false, Some("posts/2.jpg".into()), Some("posts/1.jpg")).as_deref(),
            Some("posts/2.jpg")
        );
        assert_eq!(
            merge_image(false, Some(" ".into()), Some("posts/1.jpg")).as_deref(),
            Some("posts/1.jpg")
        );
    }

    #[test]
    fn test_remove_stored_file() {
        let dir = std::env::temp_dir().join(format!("schoolsys-upload-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("posts")).unwrap();
        let file = dir.join("posts").join("1-a.png");
        std::fs::write(&file, b"x").unwrap();

        remove_stored_file_in(&dir, "posts/1-a.png");
        assert!(!file.exists());
        // 不存在的文件静默跳过
        remove_stored_file_in(&dir, "posts/1-a.png");

        std::fs::remove_dir_all(dir).ok();
    }
}
