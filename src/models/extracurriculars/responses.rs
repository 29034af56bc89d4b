use super::entities::Extracurricular;
use crate::models::common::PaginationInfo;
use crate::models::students::entities::Student;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct ExtracurricularWithCount {
    #[serde(flatten)]
    #[ts(flatten)]
    pub extracurricular: Extracurricular,
    pub students_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct ExtracurricularListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ExtracurricularWithCount>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct ExtracurricularDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub extracurricular: Extracurricular,
    pub students: Vec<Student>,
}
