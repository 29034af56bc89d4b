use crate::models::staff::entities::Staff;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

// 单个班级的班主任情况
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomClassStat {
    pub class: String,
    pub student_count: i64,
    pub assigned_teacher: Option<Staff>,
    pub has_teacher: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomOverviewResponse {
    pub teachers: Vec<Staff>,
    pub class_stats: Vec<HomeroomClassStat>,
    pub available_classes: Vec<String>,
    pub unassigned_classes: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomAssignmentResponse {
    pub staff: Staff,
    pub class_name: String,
    pub students_updated: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomClassDetails {
    pub class_name: String,
    pub students: Vec<Student>,
    pub assigned_teacher: Option<Staff>,
    pub total_students: i64,
    pub students_with_homeroom: i64,
}
