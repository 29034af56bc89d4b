use super::entities::GRADE_LEVELS;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max};
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub grade_level: Option<String>,
}

// 班级选项查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassOptionsQuery {
    pub grade_level: Option<String>,
}

// 创建/更新班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassRequest {
    pub grade_level: String,
    pub class_section: String,
    pub description: Option<String>,
    pub capacity: i32,
}

impl ClassRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !GRADE_LEVELS.contains(&self.grade_level.trim()) {
            return Err("Grade level must be 7, 8, or 9.".into());
        }
        check_length(
            &self.class_section,
            1,
            10,
            "Class section is required and cannot exceed 10 characters.",
        )?;
        check_max(
            self.description.as_deref(),
            255,
            "Description cannot exceed 255 characters.",
        )?;
        if self.capacity < 1 {
            return Err("Capacity must be at least 1 student.".into());
        }
        if self.capacity > 50 {
            return Err("Capacity cannot exceed 50 students.".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(grade: &str, capacity: i32) -> ClassRequest {
        ClassRequest {
            grade_level: grade.into(),
            class_section: "A".into(),
            description: None,
            capacity,
        }
    }

    #[test]
    fn test_grade_and_capacity_rules() {
        assert!(request("7", 32).validate().is_ok());
        assert_eq!(
            request("10", 32).validate().unwrap_err(),
            "Grade level must be 7, 8, or 9."
        );
        assert_eq!(
            request("8", 0).validate().unwrap_err(),
            "Capacity must be at least 1 student."
        );
        assert_eq!(
            request("9", 51).validate().unwrap_err(),
            "Capacity cannot exceed 50 students."
        );
    }
}
