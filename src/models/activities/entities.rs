use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const ACTIVITY_LOGIN: &str = "login";
pub const ACTIVITY_LOGOUT: &str = "logout";
pub const ACTIVITY_REGISTRATION: &str = "registration";

/// 系统活动页面展示的活动类型
pub const SESSION_ACTIVITY_TYPES: [&str; 3] =
    [ACTIVITY_LOGIN, ACTIVITY_LOGOUT, ACTIVITY_REGISTRATION];

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct UserActivity {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserActivity {
    fn metadata_str(&self, key: &str) -> &str {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
    }

    /// 面向管理员的动作描述
    pub fn action_description(&self) -> String {
        let browser = self.metadata_str("browser");
        let platform = self.metadata_str("platform");
        match self.activity_type.as_str() {
            ACTIVITY_LOGIN => format!("Logged in via {browser} on {platform}"),
            ACTIVITY_LOGOUT => format!("Logged out from {browser} on {platform}"),
            ACTIVITY_REGISTRATION => format!("Account created via {browser} on {platform}"),
            _ => self.description.clone(),
        }
    }
}

// 待写入的活动记录
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: i64,
    pub activity_type: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
}

/// 从 User-Agent 中识别浏览器
pub fn detect_browser(user_agent: &str) -> &'static str {
    if user_agent.contains("Edg/") || user_agent.contains("Edge") {
        "Edge"
    } else if user_agent.contains("OPR/") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    }
}

/// 从 User-Agent 中识别平台
pub fn detect_platform(user_agent: &str) -> &'static str {
    if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("iPhone") || user_agent.contains("iPad") {
        "iOS"
    } else if user_agent.contains("Macintosh") {
        "macOS"
    } else if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const EDGE_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const FIREFOX_ANDROID: &str = "Mozilla/5.0 (Android 14; Mobile; rv:121.0) Gecko/121.0 Firefox/121.0";

    #[test]
    fn test_detect_browser_and_platform() {
        assert_eq!(detect_browser(CHROME_WIN), "Chrome");
        assert_eq!(detect_browser(EDGE_WIN), "Edge");
        assert_eq!(detect_browser(SAFARI_IPHONE), "Safari");
        assert_eq!(detect_platform(SAFARI_IPHONE), "iOS");
        assert_eq!(detect_platform(FIREFOX_ANDROID), "Android");
        assert_eq!(detect_platform(""), "Unknown");
    }

    #[test]
    fn test_action_description() {
        let activity = UserActivity {
            id: 1,
            user_id: 1,
            activity_type: ACTIVITY_LOGIN.into(),
            description: "User logged in".into(),
            ip_address: None,
            user_agent: None,
            metadata: serde_json::json!({"browser": "Firefox", "platform": "Linux"}),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(activity.action_description(), "Logged in via Firefox on Linux");
    }
}
