use super::entities::SchoolClass;
use crate::models::common::PaginationInfo;
use crate::models::staff::entities::Staff;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 班级概要（含人数与班主任）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: SchoolClass,
    pub student_count: i64,
    pub available_capacity: i64,
    pub is_full: bool,
    pub homeroom_teacher: Option<Staff>,
}

impl ClassSummary {
    pub fn new(class: SchoolClass, student_count: i64, homeroom_teacher: Option<Staff>) -> Self {
        let capacity = class.capacity as i64;
        Self {
            class,
            student_count,
            available_capacity: capacity - student_count,
            is_full: student_count >= capacity,
            homeroom_teacher,
        }
    }
}

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ClassSummary>,
}

// 班级详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetailResponse {
    pub class: ClassSummary,
    pub students: Vec<Student>,
}

// 批量删除班级结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassBulkDeleteResponse {
    pub deleted: i64,
    pub errors: Vec<String>,
    pub total: i64,
}

// 班级统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassStatistics {
    pub total_classes: i64,
    pub classes_with_teachers: i64,
    pub total_capacity: i64,
    pub total_students: i64,
}

// 班级下拉选项
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassOption {
    pub id: i64,
    pub name: String,
    pub grade_level: String,
    pub class_section: String,
    pub capacity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_capacity() {
        let class = SchoolClass {
            id: 1,
            name: "7A".into(),
            grade_level: "7".into(),
            class_section: "A".into(),
            description: None,
            capacity: 30,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let summary = ClassSummary::new(class, 30, None);
        assert_eq!(summary.available_capacity, 0);
        assert!(summary.is_full);
    }
}
