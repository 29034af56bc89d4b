use super::entities::TokenStatus;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct TokenDetails {
    pub service_name: String,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub access_token_preview: Option<String>,
    pub has_refresh_token: bool,
    pub token_data_keys: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct DriveConfigSummary {
    pub google_drive_configured: bool,
    pub client_id_preview: Option<String>,
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct TokenDashboardResponse {
    pub token: Option<TokenDetails>,
    pub status: TokenStatus,
    pub status_message: String,
    pub can_refresh: bool,
    pub time_until_expiry: Option<f64>,
    pub config: DriveConfigSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct TokenRefreshResponse {
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct ConnectionTestResponse {
    pub email: Option<String>,
    pub storage_usage_percent: Option<f64>,
}

// Drive 文件元数据
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct DriveFileMetadata {
    pub id: String,
    pub name: String,
    pub size: Option<i64>,
    pub mime_type: String,
    pub created_time: Option<String>,
    pub modified_time: Option<String>,
    pub web_view_link: Option<String>,
}
