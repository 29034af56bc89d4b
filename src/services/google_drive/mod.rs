use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use crate::config::{AppConfig, GoogleDriveConfig};
use crate::drive::{DriveClient, DriveTokenManager};
use crate::errors::Result;
use crate::models::google_drive::{
    entities::{GoogleDriveToken, TokenStatus, classify_expiry},
    requests::UpdateTokenRequest,
    responses::{
        ConnectionTestResponse, DriveConfigSummary, TokenDashboardResponse, TokenDetails,
        TokenRefreshResponse,
    },
};
use crate::services::{drive_client, drive_tokens, error_response, invalid, respond};

// 令牌的有效期未知时按 Google 默认一小时处理
const MANUAL_TOKEN_EXPIRES_IN: i64 = 3600;

pub struct GoogleDriveService;

fn preview(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(format!("{}...", value.chars().take(20).collect::<String>()))
}

fn config_summary(config: &GoogleDriveConfig) -> DriveConfigSummary {
    DriveConfigSummary {
        google_drive_configured: !config.client_id.is_empty() && !config.client_secret.is_empty(),
        client_id_preview: preview(&config.client_id),
        folder_id: Some(config.folder_id.clone()).filter(|id| !id.is_empty()),
    }
}

fn token_details(token: &GoogleDriveToken) -> TokenDetails {
    let token_data_keys = token
        .token_data
        .as_ref()
        .and_then(|data| data.as_object())
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    TokenDetails {
        service_name: token.service_name.clone(),
        expires_at: token.expires_at,
        is_active: token.is_active,
        created_at: token.created_at,
        updated_at: token.updated_at,
        access_token_preview: token.access_token_preview(),
        has_refresh_token: token.refresh_token.as_deref().is_some_and(|t| !t.is_empty()),
        token_data_keys,
    }
}

pub(crate) async fn dashboard(
    tokens: &DriveTokenManager,
    config: &GoogleDriveConfig,
    now: DateTime<Utc>,
) -> Result<TokenDashboardResponse> {
    let Some(token) = tokens.active_token().await? else {
        return Ok(TokenDashboardResponse {
            token: None,
            status: TokenStatus::NoToken,
            status_message: "No Google Drive token found".to_string(),
            can_refresh: false,
            time_until_expiry: None,
            config: config_summary(config),
        });
    };

    let hours = token
        .expires_at
        .map(|expires_at| (expires_at - now).num_seconds() as f64 / 3600.0);
    let (mut status, mut status_message) = classify_expiry(hours);

    let can_refresh = match tokens.fresh_access_token().await {
        Ok(access_token) => !access_token.is_empty(),
        Err(e) => {
            tracing::warn!("Google Drive token check failed: {}", e);
            if status == TokenStatus::Healthy {
                status = TokenStatus::Error;
                status_message = format!("Token refresh failed: {}", e.message());
            }
            false
        }
    };

    Ok(TokenDashboardResponse {
        token: Some(token_details(&token)),
        status,
        status_message,
        can_refresh,
        time_until_expiry: hours,
        config: config_summary(config),
    })
}

pub(crate) async fn test_connection(client: &dyn DriveClient) -> Result<(ConnectionTestResponse, String)> {
    let about = client.about().await?;
    let mut message = format!(
        "Google Drive connection test successful! Connected as: {}",
        about.email.as_deref().unwrap_or("unknown")
    );
    if let Some(percent) = about.storage_usage_percent {
        message.push_str(&format!(" | Storage: {percent}% used"));
    }
    Ok((about, message))
}

pub(crate) async fn update_token(tokens: &DriveTokenManager, req: UpdateTokenRequest) -> Result<GoogleDriveToken> {
    req.validate().map_err(invalid)?;
    let token = tokens
        .create_or_update(
            req.access_token.trim().to_string(),
            Some(req.refresh_token.trim().to_string()),
            Some(MANUAL_TOKEN_EXPIRES_IN),
            None,
        )
        .await?;
    tracing::info!("Google Drive token {} updated manually", token.id);
    Ok(token)
}

impl GoogleDriveService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let tokens = drive_tokens(request)?;
        let config = AppConfig::get();
        respond(
            dashboard(&tokens, &config.google_drive, Utc::now()).await,
            "Google Drive status retrieved successfully",
        )
    }

    pub async fn refresh(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let tokens = drive_tokens(request)?;
        match tokens.refresh().await {
            Ok(token) => {
                let message = match token.expires_at {
                    Some(at) => format!(
                        "Google Drive token refreshed successfully! New expiration: {}",
                        at.format("%Y-%m-%d %H:%M:%S")
                    ),
                    None => "Google Drive token refreshed successfully!".to_string(),
                };
                respond(
                    Ok(TokenRefreshResponse {
                        expires_at: token.expires_at,
                    }),
                    &message,
                )
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn test_connection(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let client = drive_client(request)?;
        match test_connection(client.as_ref()).await {
            Ok((about, message)) => respond(Ok(about), &message),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_token(&self, body: UpdateTokenRequest, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let tokens = drive_tokens(request)?;
        respond(
            update_token(&tokens, body).await.map(|token| token_details(&token)),
            "Google Drive token updated successfully!",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::sync::Arc;

    fn config() -> GoogleDriveConfig {
        GoogleDriveConfig {
            enabled: true,
            client_id: "1234567890-abcdefghijklmnop.apps.googleusercontent.com".into(),
            client_secret: "secret".into(),
            folder_id: String::new(),
            token_url: "http://127.0.0.1:9/token".into(),
            api_base: "http://127.0.0.1:9/drive/v3".into(),
            upload_base: "http://127.0.0.1:9/upload/drive/v3".into(),
            request_timeout: 1,
        }
    }

    async fn manager() -> DriveTokenManager {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await);
        DriveTokenManager::new(storage, reqwest::Client::new(), config())
    }

    #[tokio::test]
    async fn test_dashboard_without_token() {
        let tokens = manager().await;
        let status = dashboard(&tokens, &config(), Utc::now()).await.unwrap();
        assert_eq!(status.status, TokenStatus::NoToken);
        assert!(!status.can_refresh);
        assert_eq!(
            status.config.client_id_preview.as_deref(),
            Some("1234567890-abcdefghi...")
        );
        assert!(status.config.folder_id.is_none());
    }

    #[tokio::test]
    async fn test_manual_update_sets_one_hour_expiry() {
        let tokens = manager().await;
        let err = update_token(
            &tokens,
            UpdateTokenRequest {
                access_token: "short".into(),
                refresh_token: "1//0g-refresh-token".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E007");

        let token = update_token(
            &tokens,
            UpdateTokenRequest {
                access_token: "ya29.a0AfH6SMB-manual-token".into(),
                refresh_token: "1//0g-refresh-token".into(),
            },
        )
        .await
        .unwrap();
        assert!(token.is_active);

        let status = dashboard(&tokens, &config(), Utc::now()).await.unwrap();
        assert_eq!(status.status, TokenStatus::Critical);
        assert!(status.can_refresh);
        let details = status.token.unwrap();
        assert!(details.has_refresh_token);
        assert_eq!(details.access_token_preview.as_deref(), Some("ya29.a0AfH6SMB-manua..."));
    }

    #[tokio::test]
    async fn test_connection_message_includes_account() {
        let client = LocalDriveClient::new(std::env::temp_dir().join("schoolsys-drive-test"));
        let (_, message) = test_connection(&client).await.unwrap();
        assert!(message.starts_with("Google Drive connection test successful!"));
    }
}
