pub mod manage;
pub mod position_history;
pub mod query;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::IdsRequest;
use crate::models::staff::requests::{
    AssignSubjectsRequest, PositionHistoryRequest, StaffListParams, StaffRequest,
};

crate::services::define_service!(StaffService);

pub(crate) const CONTENT_TYPE: &str = "staff";

impl StaffService {
    pub async fn list_staff(
        &self,
        query: StaffListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_staff(self, query, request).await
    }

    pub async fn get_staff(&self, staff_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        query::get_staff(self, staff_id, request).await
    }

    pub async fn create_staff(
        &self,
        body: StaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_staff(self, body, request).await
    }

    pub async fn update_staff(
        &self,
        staff_id: i64,
        body: StaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_staff(self, staff_id, body, request).await
    }

    pub async fn delete_staff(
        &self,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::delete_staff(self, staff_id, request).await
    }

    pub async fn bulk_delete_staff(
        &self,
        body: IdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::bulk_delete_staff(self, body, request).await
    }

    // 同步任教科目
    pub async fn assign_subjects(
        &self,
        staff_id: i64,
        body: AssignSubjectsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::assign_subjects(self, staff_id, body, request).await
    }

    pub async fn remove_subject(
        &self,
        staff_id: i64,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::remove_subject(self, staff_id, subject_id, request).await
    }

    // 职务履历
    pub async fn create_position_history(
        &self,
        body: PositionHistoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        position_history::create(self, body, request).await
    }

    pub async fn update_position_history(
        &self,
        history_id: i64,
        body: PositionHistoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        position_history::update(self, history_id, body, request).await
    }

    pub async fn delete_position_history(
        &self,
        history_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        position_history::delete(self, history_id, request).await
    }

    pub async fn bulk_delete_position_history(
        &self,
        body: IdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        position_history::bulk_delete(self, body, request).await
    }
}
