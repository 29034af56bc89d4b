//! 本地目录模拟的 Drive 存储
//!
//! 文件夹ID与文件ID都是相对于根目录的路径，公开地址由
//! `/api/v1/files/drive/{id}` 提供。

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::DriveClient;
use crate::errors::{Result, SchoolSysError};
use crate::models::files::entities::is_safe_stored_name;
use crate::models::google_drive::responses::{ConnectionTestResponse, DriveFileMetadata};
use crate::utils::file_magic::mime_for_extension;
use crate::utils::slug::slugify;

pub const LOCAL_DRIVE_URL_PREFIX: &str = "/api/v1/files/drive/";

pub struct LocalDriveClient {
    root: PathBuf,
}

/// 相对路径的每一段都必须是安全文件名
pub fn is_safe_relative_path(path: &str) -> bool {
    !path.is_empty() && path.split('/').all(is_safe_stored_name)
}

impl LocalDriveClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 将ID解析为根目录下的路径
    pub fn resolve(&self, id: &str) -> Result<PathBuf> {
        if !is_safe_relative_path(id) {
            return Err(SchoolSysError::validation(format!("Invalid file id: {id}")));
        }
        Ok(self.root.join(id))
    }

    fn child_id(parent_id: Option<&str>, name: &str) -> String {
        match parent_id {
            Some(parent) => format!("{parent}/{name}"),
            None => name.to_string(),
        }
    }

    fn folder_slug(name: &str) -> String {
        let slug = slugify(name);
        if slug.is_empty() { "folder".into() } else { slug }
    }

    fn describe(&self, id: &str, path: &Path) -> Result<DriveFileMetadata> {
        let meta = fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        let modified = meta
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());
        Ok(DriveFileMetadata {
            id: id.to_string(),
            name,
            size: Some(meta.len() as i64),
            mime_type: mime_for_extension(&extension).to_string(),
            created_time: modified.clone(),
            modified_time: modified,
            web_view_link: Some(self.public_url(id)),
        })
    }
}

#[async_trait]
impl DriveClient for LocalDriveClient {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn find_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Option<String>> {
        let id = Self::child_id(parent_id, &Self::folder_slug(name));
        Ok(self.resolve(&id)?.is_dir().then_some(id))
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let id = Self::child_id(parent_id, &Self::folder_slug(name));
        fs::create_dir_all(self.resolve(&id)?)?;
        Ok(id)
    }

    // 本地目录名由名称生成，改名只影响展示名，目录保持不变
    async fn rename(&self, file_id: &str, _new_name: &str) -> Result<()> {
        self.resolve(file_id)?;
        Ok(())
    }

    async fn upload(
        &self,
        folder_id: &str,
        file_name: &str,
        _mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFileMetadata> {
        let folder = self.resolve(folder_id)?;
        fs::create_dir_all(&folder)?;
        let id = Self::child_id(Some(folder_id), file_name);
        let path = self.resolve(&id)?;
        fs::write(&path, data)?;
        self.describe(&id, &path)
    }

    async fn make_public(&self, _file_id: &str) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let path = self.resolve(file_id)?;
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    async fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFileMetadata>> {
        let folder = self.resolve(folder_id)?;
        if !folder.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(folder)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let id = Self::child_id(Some(folder_id), name);
            files.push(self.describe(&id, &path)?);
        }
        files.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
        Ok(files)
    }

    async fn metadata(&self, file_id: &str) -> Result<DriveFileMetadata> {
        let path = self.resolve(file_id)?;
        if !path.is_file() {
            return Err(SchoolSysError::not_found(format!("File not found: {file_id}")));
        }
        self.describe(file_id, &path)
    }

    async fn about(&self) -> Result<ConnectionTestResponse> {
        Ok(ConnectionTestResponse {
            email: None,
            storage_usage_percent: None,
        })
    }

    fn public_url(&self, file_id: &str) -> String {
        format!("{LOCAL_DRIVE_URL_PREFIX}{file_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_client() -> LocalDriveClient {
        let dir = std::env::temp_dir().join(format!("schoolsys-drive-{}", uuid::Uuid::new_v4()));
        LocalDriveClient::new(dir)
    }

    #[tokio::test]
    async fn test_folder_upload_list_delete() {
        let client = temp_client();
        let folder = super::super::ensure_folder_path(&client, &["Galleries", "Pentas Seni 2024"])
            .await
            .unwrap();
        assert_eq!(folder, "galleries/pentas-seni-2024");

        let file = client
            .upload(&folder, "foto-1700000000.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
            .await
            .unwrap();
        assert_eq!(file.id, "galleries/pentas-seni-2024/foto-1700000000.jpg");
        assert_eq!(file.size, Some(3));
        assert_eq!(file.mime_type, "image/jpeg");

        let listed = client.list_folder(&folder).await.unwrap();
        assert_eq!(listed.len(), 1);

        client.delete(&file.id).await.unwrap();
        assert!(client.list_folder(&folder).await.unwrap().is_empty());

        std::fs::remove_dir_all(client.root()).ok();
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let client = temp_client();
        assert!(client.resolve("../etc/passwd").is_err());
        assert!(client.metadata("galleries/../../x").await.is_err());
        assert!(!is_safe_relative_path("a//b"));
    }
}
