use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max};
use serde::Deserialize;
use ts_rs::TS;

// 科目列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建/更新科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectRequest {
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
}

impl SubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.name, 1, 255, "Subject name is required and cannot exceed 255 characters.")?;
        check_max(self.code.as_deref(), 20, "Subject code cannot exceed 20 characters.")?;
        Ok(())
    }

    // 空字符串视为未填写
    pub fn normalized_code(&self) -> Option<String> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

// 为科目分配教师（同步）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct AssignStaffRequest {
    pub staff_ids: Vec<i64>,
}

// 科目分配总览查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectAssignmentParams {
    pub staff_search: Option<String>,
    pub subject_search: Option<String>,
    pub staff_page: Option<i64>,
    pub subject_page: Option<i64>,
}

// 单个教师的科目分配
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct StaffAssignment {
    pub staff_id: i64,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

// 批量更新科目分配
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct BulkAssignmentRequest {
    pub assignments: Vec<StaffAssignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        let request = SubjectRequest {
            name: "Matematika".into(),
            code: Some("  ".into()),
            description: None,
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.normalized_code(), None);
    }

    #[test]
    fn test_code_length() {
        let request = SubjectRequest {
            name: "IPA".into(),
            code: Some("X".repeat(21)),
            description: None,
        };
        assert!(request.validate().is_err());
    }
}
