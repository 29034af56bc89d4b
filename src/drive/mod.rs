//! Google Drive 文件存储
//!
//! [`DriveClient`] 抽象了业务需要的 Drive v3 操作，`GoogleDriveClient` 通过
//! OAuth 令牌访问真实 API，未配置 Drive 时使用写入本地目录的 `LocalDriveClient`。

pub mod google;
pub mod local;
pub mod token;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::google_drive::responses::{ConnectionTestResponse, DriveFileMetadata};
use crate::storage::Storage;
use crate::utils::drive_url;

pub use google::GoogleDriveClient;
pub use local::LocalDriveClient;
pub use token::DriveTokenManager;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[async_trait]
pub trait DriveClient: Send + Sync {
    /// 后端名称，用于日志
    fn backend(&self) -> &'static str;

    /// 在 `parent_id` 下按名称查找文件夹，`None` 表示根目录
    async fn find_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Option<String>>;

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String>;

    async fn ensure_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        match self.find_folder(name, parent_id).await? {
            Some(id) => Ok(id),
            None => self.create_folder(name, parent_id).await,
        }
    }

    async fn rename(&self, file_id: &str, new_name: &str) -> Result<()>;

    async fn upload(
        &self,
        folder_id: &str,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFileMetadata>;

    /// 设置任何人可读
    async fn make_public(&self, file_id: &str) -> Result<()>;

    async fn delete(&self, file_id: &str) -> Result<()>;

    /// 文件夹内的文件，最新在前
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFileMetadata>>;

    async fn metadata(&self, file_id: &str) -> Result<DriveFileMetadata>;

    async fn about(&self) -> Result<ConnectionTestResponse>;

    /// 文件的公开访问地址
    fn public_url(&self, file_id: &str) -> String;
}

/// 逐级确保文件夹路径存在，返回最后一级的ID
pub async fn ensure_folder_path(client: &dyn DriveClient, segments: &[&str]) -> Result<String> {
    let mut parent: Option<String> = None;
    for segment in segments {
        let id = client.ensure_folder(segment, parent.as_deref()).await?;
        parent = Some(id);
    }
    parent.ok_or_else(|| crate::errors::SchoolSysError::validation("Folder path is empty"))
}

/// 逐级查找文件夹路径，任一级不存在时返回 None
pub async fn find_folder_path(
    client: &dyn DriveClient,
    segments: &[&str],
) -> Result<Option<String>> {
    let mut parent: Option<String> = None;
    for segment in segments {
        match client.find_folder(segment, parent.as_deref()).await? {
            Some(id) => parent = Some(id),
            None => return Ok(None),
        }
    }
    Ok(parent)
}

/// 删除 Drive 文件，失败只记录日志
pub async fn delete_quietly(client: &dyn DriveClient, file_id: &str) {
    if let Err(e) = client.delete(file_id).await {
        tracing::warn!(
            "Failed to delete {} file {}: {}",
            client.backend(),
            file_id,
            e
        );
    }
}

/// 业务记录中的文件地址是否指向 Drive（含本地后端地址）
pub fn is_drive_url(url: &str) -> bool {
    drive_url::is_google_drive_url(url) || url.starts_with(local::LOCAL_DRIVE_URL_PREFIX)
}

/// 从文件地址解析 Drive 文件ID
pub fn file_id_from_url(url: &str) -> Option<String> {
    match url.strip_prefix(local::LOCAL_DRIVE_URL_PREFIX) {
        Some(id) => Some(id.to_string()),
        None => drive_url::extract_file_id(url),
    }
}

/// 按文件地址删除，无法识别的地址跳过
pub async fn delete_url_quietly(client: &dyn DriveClient, url: &str) {
    match file_id_from_url(url) {
        Some(file_id) => delete_quietly(client, &file_id).await,
        None => tracing::debug!("Skipping deletion of non-Drive path: {}", url),
    }
}

/// 按配置选择 Drive 后端
pub fn create_drive_client(
    storage: Arc<dyn Storage>,
) -> Result<(Arc<dyn DriveClient>, Arc<DriveTokenManager>)> {
    let config = AppConfig::get();
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            config.google_drive.request_timeout,
        ))
        .build()?;
    let tokens = Arc::new(DriveTokenManager::new(
        storage,
        http.clone(),
        config.google_drive.clone(),
    ));

    if config.google_drive_configured() {
        tracing::info!("Using Google Drive file storage");
        let client = GoogleDriveClient::new(http, tokens.clone(), config.google_drive.clone());
        Ok((Arc::new(client), tokens))
    } else {
        tracing::warn!("Google Drive is not configured, falling back to local file storage");
        let client = LocalDriveClient::new(format!("{}/drive", config.upload.dir));
        Ok((Arc::new(client), tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_from_url() {
        let id = "1AbCdEfGhIjKlMnOpQrStUvWxYz";
        assert_eq!(
            file_id_from_url(&format!("https://lh3.googleusercontent.com/d/{id}")).as_deref(),
            Some(id)
        );
        assert_eq!(
            file_id_from_url("/api/v1/files/drive/galleries/pentas/a-1.jpg").as_deref(),
            Some("galleries/pentas/a-1.jpg")
        );
        assert!(file_id_from_url("posts/1-a.jpg").is_none());
        assert!(is_drive_url("https://drive.google.com/file/d/x/view"));
        assert!(!is_drive_url("blob:http://localhost/abc"));
    }
}
