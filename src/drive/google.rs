//! Google Drive v3 客户端

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::{DriveClient, DriveTokenManager, FOLDER_MIME_TYPE};
use crate::config::GoogleDriveConfig;
use crate::errors::{Result, SchoolSysError};
use crate::models::google_drive::responses::{ConnectionTestResponse, DriveFileMetadata};
use crate::utils::drive_url;

const FILE_FIELDS: &str = "id,name,mimeType,size,createdTime,modifiedTime,webViewLink";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFileResource {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    size: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
    web_view_link: Option<String>,
}

impl From<DriveFileResource> for DriveFileMetadata {
    fn from(file: DriveFileResource) -> Self {
        Self {
            id: file.id,
            name: file.name,
            size: file.size.and_then(|s| s.parse().ok()),
            mime_type: file.mime_type,
            created_time: file.created_time,
            modified_time: file.modified_time,
            web_view_link: file.web_view_link,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFileResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutResource {
    user: Option<AboutUser>,
    storage_quota: Option<StorageQuota>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutUser {
    email_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorageQuota {
    limit: Option<String>,
    usage: Option<String>,
}

/// 转义 Drive 查询字符串中的单引号与反斜杠
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// 组装 multipart/related 上传体
fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    mime_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

pub struct GoogleDriveClient {
    http: reqwest::Client,
    tokens: Arc<DriveTokenManager>,
    config: GoogleDriveConfig,
}

impl GoogleDriveClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<DriveTokenManager>,
        config: GoogleDriveConfig,
    ) -> Self {
        Self {
            http,
            tokens,
            config,
        }
    }

    fn root_folder(&self) -> &str {
        if self.config.folder_id.is_empty() {
            "root"
        } else {
            &self.config.folder_id
        }
    }

    async fn request(&self, method: Method, url: String) -> Result<RequestBuilder> {
        let token = self.tokens.fresh_access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SchoolSysError::external_service(format!(
            "Google Drive {action} failed ({status}): {body}"
        )))
    }
}

#[async_trait]
impl DriveClient for GoogleDriveClient {
    fn backend(&self) -> &'static str {
        "google_drive"
    }

    async fn find_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Option<String>> {
        let parent = parent_id.unwrap_or(self.root_folder());
        let query = format!(
            "name = '{}' and mimeType = '{}' and '{}' in parents and trashed = false",
            escape_query(name),
            FOLDER_MIME_TYPE,
            escape_query(parent)
        );
        let builder = self
            .request(Method::GET, format!("{}/files", self.config.api_base))
            .await?
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")]);
        let list: FileList = self.send(builder, "folder lookup").await?.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let parent = parent_id.unwrap_or(self.root_folder());
        let builder = self
            .request(Method::POST, format!("{}/files", self.config.api_base))
            .await?
            .query(&[("fields", "id")])
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME_TYPE,
                "parents": [parent],
            }));
        let folder: DriveFileResource = self.send(builder, "folder creation").await?.json().await?;
        debug!("Created Google Drive folder '{}' ({})", name, folder.id);
        Ok(folder.id)
    }

    async fn rename(&self, file_id: &str, new_name: &str) -> Result<()> {
        let builder = self
            .request(
                Method::PATCH,
                format!("{}/files/{}", self.config.api_base, file_id),
            )
            .await?
            .json(&json!({ "name": new_name }));
        self.send(builder, "rename").await?;
        Ok(())
    }

    async fn upload(
        &self,
        folder_id: &str,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFileMetadata> {
        let boundary = format!("schoolsys-{}", Uuid::new_v4().simple());
        let metadata = json!({ "name": file_name, "parents": [folder_id] });
        let body = multipart_related_body(&boundary, &metadata, mime_type, &data);

        let builder = self
            .request(Method::POST, format!("{}/files", self.config.upload_base))
            .await?
            .query(&[("uploadType", "multipart"), ("fields", FILE_FIELDS)])
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body);
        let file: DriveFileResource = self.send(builder, "upload").await?.json().await?;
        Ok(file.into())
    }

    async fn make_public(&self, file_id: &str) -> Result<()> {
        let builder = self
            .request(
                Method::POST,
                format!("{}/files/{}/permissions", self.config.api_base, file_id),
            )
            .await?
            .json(&json!({ "role": "reader", "type": "anyone" }));
        self.send(builder, "permission update").await?;
        Ok(())
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let builder = self
            .request(
                Method::DELETE,
                format!("{}/files/{}", self.config.api_base, file_id),
            )
            .await?;
        self.send(builder, "delete").await?;
        Ok(())
    }

    async fn list_folder(&self, folder_id: &str) -> Result<Vec<DriveFileMetadata>> {
        let query = format!(
            "'{}' in parents and trashed = false and mimeType != '{}'",
            escape_query(folder_id),
            FOLDER_MIME_TYPE
        );
        let fields = format!("files({FILE_FIELDS})");
        let builder = self
            .request(Method::GET, format!("{}/files", self.config.api_base))
            .await?
            .query(&[
                ("q", query.as_str()),
                ("fields", fields.as_str()),
                ("orderBy", "createdTime desc"),
                ("pageSize", "1000"),
            ]);
        let list: FileList = self.send(builder, "listing").await?.json().await?;
        Ok(list.files.into_iter().map(Into::into).collect())
    }

    async fn metadata(&self, file_id: &str) -> Result<DriveFileMetadata> {
        let builder = self
            .request(
                Method::GET,
                format!("{}/files/{}", self.config.api_base, file_id),
            )
            .await?
            .query(&[("fields", FILE_FIELDS)]);
        let file: DriveFileResource = self.send(builder, "metadata lookup").await?.json().await?;
        Ok(file.into())
    }

    async fn about(&self) -> Result<ConnectionTestResponse> {
        let builder = self
            .request(Method::GET, format!("{}/about", self.config.api_base))
            .await?
            .query(&[("fields", "user(emailAddress),storageQuota(limit,usage)")]);
        let about: AboutResource = self.send(builder, "connection test").await?.json().await?;

        let storage_usage_percent = about.storage_quota.and_then(|quota| {
            let limit: f64 = quota.limit?.parse().ok()?;
            let usage: f64 = quota.usage?.parse().ok()?;
            (limit > 0.0).then(|| (usage / limit * 10000.0).round() / 100.0)
        });
        Ok(ConnectionTestResponse {
            email: about.user.and_then(|u| u.email_address),
            storage_usage_percent,
        })
    }

    fn public_url(&self, file_id: &str) -> String {
        drive_url::lh3_url(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_query() {
        assert_eq!(escape_query("Kid's Day"), "Kid\\'s Day");
        assert_eq!(escape_query(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_multipart_related_body_layout() {
        let body = multipart_related_body(
            "b1",
            &json!({ "name": "foto.jpg" }),
            "image/jpeg",
            b"DATA",
        );
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--b1\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n"));
        assert!(text.contains("{\"name\":\"foto.jpg\"}"));
        assert!(text.contains("Content-Type: image/jpeg\r\n\r\nDATA\r\n--b1--\r\n"));
    }

    #[test]
    fn test_file_resource_size_parsed() {
        let file: DriveFileResource = serde_json::from_str(
            r#"{"id":"abc","name":"a.pdf","mimeType":"application/pdf","size":"2048"}"#,
        )
        .unwrap();
        let meta: DriveFileMetadata = file.into();
        assert_eq!(meta.size, Some(2048));
        assert_eq!(meta.mime_type, "application/pdf");
    }
}
