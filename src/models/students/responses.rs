use super::entities::Student;
use crate::models::common::PaginationInfo;
use crate::models::extracurriculars::entities::Extracurricular;
use crate::models::staff::entities::Staff;
use serde::Serialize;
use ts_rs::TS;

// 学生列表项（附带班主任）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub homeroom_teacher: Option<Staff>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<StudentSummary>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub homeroom_teacher: Option<Staff>,
    pub extracurriculars: Vec<Extracurricular>,
}
