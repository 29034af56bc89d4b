use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::errors::Result;
use crate::models::staff::{
    requests::StaffListParams,
    responses::{StaffDetailResponse, StaffListResponse},
};
use crate::services::{found, invalid, respond};
use crate::storage::Storage;

pub(crate) async fn list(storage: &dyn Storage, query: StaffListParams) -> Result<StaffListResponse> {
    let divisions = query.division_filter().map_err(invalid)?;
    storage.list_staff_with_pagination(query, divisions).await
}

pub(crate) async fn detail(storage: &dyn Storage, staff_id: i64) -> Result<StaffDetailResponse> {
    let staff = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    Ok(StaffDetailResponse {
        is_academic_teacher: staff.is_academic_teacher(),
        subjects: storage.list_staff_subjects(staff.id).await?,
        position_history: storage.list_position_history(staff.id).await?,
        staff,
    })
}

pub async fn list_staff(
    service: &StaffService,
    query: StaffListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(list(storage.as_ref(), query).await, "Staff retrieved successfully")
}

pub async fn get_staff(
    service: &StaffService,
    staff_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        detail(storage.as_ref(), staff_id).await,
        "Staff member retrieved successfully",
    )
}
