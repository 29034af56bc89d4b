use serde::Deserialize;
use ts_rs::TS;

// 手动更新令牌
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/google_drive.ts")]
pub struct UpdateTokenRequest {
    pub access_token: String,
    pub refresh_token: String,
}

impl UpdateTokenRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token.trim().chars().count() < 10 {
            return Err("The access token must be at least 10 characters.".into());
        }
        if self.refresh_token.trim().chars().count() < 10 {
            return Err("The refresh token must be at least 10 characters.".into());
        }
        Ok(())
    }
}

// 存储层使用的令牌数据
#[derive(Debug, Clone)]
pub struct NewDriveToken {
    pub access_token: String,
    // 为空时沿用旧的 refresh token
    pub refresh_token: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub token_data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        let request = UpdateTokenRequest {
            access_token: "short".into(),
            refresh_token: "1//0g-long-refresh-token".into(),
        };
        assert!(request.validate().is_err());
    }
}
