use super::entities::Facility;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/facility.ts")]
pub struct FacilityListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Facility>,
}
