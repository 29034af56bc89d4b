use super::entities::Subject;
use crate::models::common::PaginationInfo;
use crate::models::staff::entities::Staff;
use serde::Serialize;
use ts_rs::TS;

// 带任课教师数量的科目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectWithCount {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub staff_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<SubjectWithCount>,
    pub pagination: PaginationInfo,
}

// 科目详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectDetailResponse {
    pub subject: Subject,
    pub staff: Vec<Staff>,
}

// 教师及其已分配科目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct TeacherAssignment {
    pub staff: Staff,
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct AssignmentOverviewResponse {
    pub teachers: Vec<TeacherAssignment>,
    pub teachers_pagination: PaginationInfo,
    pub subjects: Vec<SubjectWithCount>,
    pub subjects_pagination: PaginationInfo,
}

// 批量分配结果
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct BulkAssignmentResult {
    pub processed: i64,
    pub changed: i64,
    pub skipped: i64,
    pub errors: Vec<String>,
    pub total: i64,
}

impl BulkAssignmentResult {
    pub fn summary_message(&self) -> String {
        if self.changed == 0 {
            return "No changes detected in subject assignments.".to_string();
        }
        let mut message = format!(
            "Subject assignments updated successfully. Changed: {}, Processed: {}",
            self.changed, self.processed
        );
        if self.skipped > 0 {
            message.push_str(&format!(", Skipped: {}", self.skipped));
        }
        if !self.errors.is_empty() {
            message.push_str(&format!(
                ". Errors encountered: {} issues.",
                self.errors.len()
            ));
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_changes() {
        let result = BulkAssignmentResult {
            processed: 3,
            skipped: 1,
            errors: vec!["Staff Rina is not eligible for subject assignments".into()],
            total: 4,
            ..Default::default()
        };
        assert_eq!(
            result.summary_message(),
            "No changes detected in subject assignments."
        );
    }

    #[test]
    fn test_summary_with_skips_and_errors() {
        let result = BulkAssignmentResult {
            processed: 4,
            changed: 2,
            skipped: 1,
            errors: vec!["Staff with ID 9 not found".into()],
            total: 5,
        };
        assert_eq!(
            result.summary_message(),
            "Subject assignments updated successfully. Changed: 2, Processed: 4, Skipped: 1. Errors encountered: 1 issues."
        );
    }
}
