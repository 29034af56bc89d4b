//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod contacts;
pub mod extracurricular_students;
pub mod extracurriculars;
pub mod facilities;
pub mod galleries;
pub mod gallery_items;
pub mod google_drive_tokens;
pub mod pages;
pub mod position_histories;
pub mod posts;
pub mod school_classes;
pub mod staff;
pub mod staff_subjects;
pub mod students;
pub mod subjects;
pub mod teacher_subject_works;
pub mod teacher_work_files;
pub mod user_activities;
pub mod users;
pub mod work_items;

use chrono::{DateTime, Utc};

// 数据库中的时间统一保存为秒级时间戳
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

// JSON 文本列解析失败时按空值处理
pub(crate) fn parse_json(text: Option<String>) -> Option<serde_json::Value> {
    text.and_then(|t| serde_json::from_str(&t).ok())
}
