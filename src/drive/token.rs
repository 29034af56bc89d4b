//! Google OAuth 令牌管理

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::GoogleDriveConfig;
use crate::errors::{Result, SchoolSysError};
use crate::models::google_drive::{
    entities::{DRIVE_SERVICE_NAME, GoogleDriveToken},
    requests::NewDriveToken,
};
use crate::storage::Storage;

// 令牌接口未返回 expires_in 时的默认有效期（秒）
const DEFAULT_EXPIRES_IN: i64 = 3600;

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

pub struct DriveTokenManager {
    storage: Arc<dyn Storage>,
    http: reqwest::Client,
    config: GoogleDriveConfig,
    // 同一时间只允许一个刷新请求
    refresh_lock: Mutex<()>,
}

impl DriveTokenManager {
    pub fn new(storage: Arc<dyn Storage>, http: reqwest::Client, config: GoogleDriveConfig) -> Self {
        Self {
            storage,
            http,
            config,
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn active_token(&self) -> Result<Option<GoogleDriveToken>> {
        self.storage.get_active_drive_token(DRIVE_SERVICE_NAME).await
    }

    /// 没有可用令牌或缺少 refresh token 时需要重新授权
    pub async fn needs_setup(&self) -> Result<bool> {
        Ok(match self.active_token().await? {
            Some(token) => token.refresh_token.as_deref().unwrap_or_default().is_empty(),
            None => true,
        })
    }

    /// 写入新的访问令牌，未提供 refresh token 时沿用旧值
    pub async fn create_or_update(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        token_data: Option<serde_json::Value>,
    ) -> Result<GoogleDriveToken> {
        let expires_at =
            Utc::now() + Duration::seconds(expires_in.unwrap_or(DEFAULT_EXPIRES_IN));
        self.storage
            .save_drive_token(
                DRIVE_SERVICE_NAME,
                NewDriveToken {
                    access_token,
                    refresh_token,
                    expires_at: Some(expires_at),
                    token_data,
                },
            )
            .await
    }

    /// 返回有效的访问令牌，临近过期时先刷新
    pub async fn fresh_access_token(&self) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;
        let token = self.active_token().await?.ok_or_else(|| {
            SchoolSysError::external_service(
                "Google Drive token not found. Please complete the Google Drive setup first.",
            )
        })?;
        if !token.is_expired_at(Utc::now()) {
            return Ok(token.access_token);
        }
        info!("Google Drive access token expired, refreshing");
        Ok(self.refresh_locked(token).await?.access_token)
    }

    /// 强制刷新
    pub async fn refresh(&self) -> Result<GoogleDriveToken> {
        let _guard = self.refresh_lock.lock().await;
        let token = self.active_token().await?.ok_or_else(|| {
            SchoolSysError::not_found("No active Google Drive token found.")
        })?;
        self.refresh_locked(token).await
    }

    async fn refresh_locked(&self, token: GoogleDriveToken) -> Result<GoogleDriveToken> {
        let refresh_token = token
            .refresh_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                SchoolSysError::external_service(
                    "Google Drive refresh token is missing. Please re-authorize Google Drive.",
                )
            })?;

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            if body.contains("invalid_grant") {
                warn!("Google Drive refresh token was revoked, deactivating token {}", token.id);
                self.storage.deactivate_drive_token(token.id).await?;
                return Err(SchoolSysError::external_service(
                    "Google Drive authorization has expired or been revoked. Please re-authorize Google Drive.",
                ));
            }
            return Err(SchoolSysError::external_service(format!(
                "Failed to refresh Google Drive token ({status}): {body}"
            )));
        }

        let raw: serde_json::Value = serde_json::from_str(&body)?;
        let parsed: TokenEndpointResponse = serde_json::from_value(raw.clone())?;
        let saved = self
            .create_or_update(
                parsed.access_token,
                parsed.refresh_token,
                parsed.expires_in,
                Some(raw),
            )
            .await?;
        info!("Google Drive access token refreshed, expires at {:?}", saved.expires_at);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn manager(storage: Arc<dyn Storage>) -> DriveTokenManager {
        DriveTokenManager::new(
            storage,
            reqwest::Client::new(),
            GoogleDriveConfig {
                enabled: true,
                client_id: "client".into(),
                client_secret: "secret".into(),
                folder_id: String::new(),
                token_url: "http://127.0.0.1:9/token".into(),
                api_base: "http://127.0.0.1:9/drive/v3".into(),
                upload_base: "http://127.0.0.1:9/upload/drive/v3".into(),
                request_timeout: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_needs_setup_without_token() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
        let tokens = manager(storage);
        assert!(tokens.needs_setup().await.unwrap());
        assert!(tokens.fresh_access_token().await.is_err());
    }

    #[tokio::test]
    async fn test_fresh_token_returned_without_refresh() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
        let tokens = manager(storage);
        tokens
            .create_or_update(
                "ya29.access-token".into(),
                Some("1//refresh-token".into()),
                Some(3600),
                None,
            )
            .await
            .unwrap();

        assert!(!tokens.needs_setup().await.unwrap());
        assert_eq!(
            tokens.fresh_access_token().await.unwrap(),
            "ya29.access-token"
        );
    }

    #[tokio::test]
    async fn test_update_keeps_refresh_token() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
        let tokens = manager(storage);
        tokens
            .create_or_update("first-access".into(), Some("kept-refresh".into()), None, None)
            .await
            .unwrap();
        let updated = tokens
            .create_or_update("second-access".into(), None, Some(60), None)
            .await
            .unwrap();

        assert_eq!(updated.access_token, "second-access");
        assert_eq!(updated.refresh_token.as_deref(), Some("kept-refresh"));
    }
}
