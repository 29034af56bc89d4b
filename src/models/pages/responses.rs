use super::entities::Page;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct PageListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Page>,
}
