use super::entities::{PositionHistory, Staff};
use crate::models::common::PaginationInfo;
use crate::models::subjects::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

// 教职工列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListResponse {
    pub items: Vec<Staff>,
    pub pagination: PaginationInfo,
}

// 教职工详情（含任教科目与职务履历）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffDetailResponse {
    pub staff: Staff,
    pub is_academic_teacher: bool,
    pub subjects: Vec<Subject>,
    pub position_history: Vec<PositionHistory>,
}
