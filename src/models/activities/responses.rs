use super::entities::UserActivity;
use crate::models::users::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

// 活动列表项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub action: String,
    pub activity_type: String,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ActivityView {
    pub fn new(activity: UserActivity, user: &User) -> Self {
        Self {
            action: activity.action_description(),
            id: activity.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            activity_type: activity.activity_type,
            ip_address: activity.ip_address,
            created_at: activity.created_at,
        }
    }
}
