use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct SchoolClass {
    // 班级ID
    pub id: i64,
    // 班级名称，由年级与班号组成，如 7A
    pub name: String,
    // 年级（7/8/9）
    pub grade_level: String,
    // 班号
    pub class_section: String,
    pub description: Option<String>,
    // 容量
    pub capacity: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub const GRADE_LEVELS: [&str; 3] = ["7", "8", "9"];

/// 由年级与班号生成班级名称
pub fn class_name(grade_level: &str, class_section: &str) -> String {
    format!("{}{}", grade_level.trim(), class_section.trim())
}
