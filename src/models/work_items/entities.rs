use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教学文档类型（如 Prota、Prosem）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItem {
    pub id: i64,
    pub name: String,
    pub is_required: bool,
    // 创建者角色
    pub created_by_role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 教师-科目-文档类型 对应的 Drive 文件夹
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TeacherSubjectWork {
    pub id: i64,
    pub staff_id: i64,
    pub subject_id: i64,
    pub work_item_id: i64,
    pub folder_name: String,
    pub gdrive_folder_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherSubjectWork {
    pub fn folder_url(&self) -> String {
        format!(
            "https://drive.google.com/drive/folders/{}",
            self.gdrive_folder_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TeacherWorkFile {
    pub id: i64,
    pub teacher_subject_work_id: i64,
    pub file_name: String,
    pub file_url: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub last_accessed: Option<chrono::DateTime<chrono::Utc>>,
    pub views: i32,
    pub downloads: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 百分比，保留一位小数；分母为 0 时返回 0
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(4, 4), 100.0);
    }
}
