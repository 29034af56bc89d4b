use crate::models::activities::responses::ActivityView;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardMetrics {
    pub total_users: i64,
    pub active_users: i64,
    pub users_by_role: BTreeMap<String, i64>,
    // 近 7 天登录次数
    pub recent_login_count: i64,
    pub total_staff: i64,
    pub total_students: i64,
    pub total_classes: i64,
    pub total_subjects: i64,
    pub total_posts: i64,
    pub total_galleries: i64,
    pub total_extracurriculars: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub recent_activity: Vec<ActivityView>,
}
