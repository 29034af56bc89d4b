use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const CONTENT_CHANNEL: &str = "content-updates";
pub const CONTENT_EVENT_NAME: &str = "content.updated";

// 公开内容变更事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/events.ts")]
pub struct ContentUpdated {
    // 内容类型，如 gallery、post
    pub content_type: String,
    // created / updated / deleted / published / unpublished
    pub action: String,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ContentUpdated {
    pub fn new(
        content_type: impl Into<String>,
        action: impl Into<String>,
        id: Option<i64>,
        title: Option<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            action: action.into(),
            id,
            title,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn channel(&self) -> &'static str {
        CONTENT_CHANNEL
    }

    pub fn event_name(&self) -> &'static str {
        CONTENT_EVENT_NAME
    }
}
