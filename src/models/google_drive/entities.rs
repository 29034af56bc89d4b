use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DRIVE_SERVICE_NAME: &str = "google_drive";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct GoogleDriveToken {
    pub id: i64,
    pub service_name: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub token_data: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GoogleDriveToken {
    /// 五分钟内过期即视为已过期；未知过期时间视为有效
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - Duration::minutes(5) <= now,
            None => false,
        }
    }

    pub fn access_token_preview(&self) -> Option<String> {
        if self.access_token.is_empty() {
            return None;
        }
        let preview: String = self.access_token.chars().take(20).collect();
        Some(format!("{preview}..."))
    }
}

// 令牌健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    NoToken,
    Unknown,
    Expired,
    Critical,
    Warning,
    Info,
    Healthy,
    Error,
}

/// 根据剩余小时数计算状态与提示文案
pub fn classify_expiry(hours_until_expiry: Option<f64>) -> (TokenStatus, String) {
    let Some(hours) = hours_until_expiry else {
        return (TokenStatus::Unknown, "Token expiry date unknown".to_string());
    };
    if hours < 0.0 {
        (
            TokenStatus::Expired,
            format!("Token expired {} hours ago", hours.abs().floor()),
        )
    } else if hours < 1.0 {
        (
            TokenStatus::Critical,
            format!("Token expires in {} minutes", (hours * 60.0).round()),
        )
    } else if hours < 6.0 {
        (
            TokenStatus::Warning,
            format!("Token expires in {:.1} hours", hours),
        )
    } else if hours < 24.0 {
        (TokenStatus::Info, format!("Token expires in {:.1} hours", hours))
    } else {
        (TokenStatus::Healthy, "Token is healthy".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in_minutes: Option<i64>) -> GoogleDriveToken {
        let now = Utc::now();
        GoogleDriveToken {
            id: 1,
            service_name: DRIVE_SERVICE_NAME.into(),
            access_token: "ya29.a0AfH6SMBx-very-long-access-token".into(),
            refresh_token: Some("1//0g-refresh".into()),
            expires_at: expires_in_minutes.map(|m| now + Duration::minutes(m)),
            token_data: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        assert!(token(Some(4)).is_expired_at(now));
        assert!(!token(Some(30)).is_expired_at(now));
        assert!(!token(None).is_expired_at(now));
    }

    #[test]
    fn test_preview() {
        assert_eq!(
            token(None).access_token_preview().unwrap(),
            "ya29.a0AfH6SMBx-very..."
        );
    }

    #[test]
    fn test_classify_expiry() {
        assert_eq!(classify_expiry(None).0, TokenStatus::Unknown);
        assert_eq!(classify_expiry(Some(-2.5)).0, TokenStatus::Expired);
        let (status, message) = classify_expiry(Some(0.5));
        assert_eq!(status, TokenStatus::Critical);
        assert_eq!(message, "Token expires in 30 minutes");
        assert_eq!(classify_expiry(Some(3.0)).0, TokenStatus::Warning);
        assert_eq!(classify_expiry(Some(12.0)).0, TokenStatus::Info);
        assert_eq!(classify_expiry(Some(48.0)).0, TokenStatus::Healthy);
    }
}
