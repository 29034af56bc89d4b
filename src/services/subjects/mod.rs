pub mod assignments;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::IdsRequest;
use crate::models::subjects::requests::{
    AssignStaffRequest, BulkAssignmentRequest, SubjectAssignmentParams, SubjectListParams,
    SubjectRequest,
};

crate::services::define_service!(SubjectService);

pub(crate) const CONTENT_TYPE: &str = "subject";

impl SubjectService {
    pub async fn list_subjects(
        &self,
        query: SubjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_subjects(self, query, request).await
    }

    pub async fn get_subject(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::get_subject(self, subject_id, request).await
    }

    pub async fn create_subject(
        &self,
        body: SubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_subject(self, body, request).await
    }

    pub async fn update_subject(
        &self,
        subject_id: i64,
        body: SubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_subject(self, subject_id, body, request).await
    }

    pub async fn delete_subject(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::delete_subject(self, subject_id, request).await
    }

    pub async fn bulk_delete_subjects(
        &self,
        body: IdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::bulk_delete_subjects(self, body, request).await
    }

    pub async fn assign_staff(
        &self,
        subject_id: i64,
        body: AssignStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::assign_staff(self, subject_id, body, request).await
    }

    pub async fn remove_staff(
        &self,
        subject_id: i64,
        staff_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::remove_staff(self, subject_id, staff_id, request).await
    }

    // 科目分配总览
    pub async fn assignment_overview(
        &self,
        query: SubjectAssignmentParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::overview_handler(self, query, request).await
    }

    pub async fn bulk_update_assignments(
        &self,
        body: BulkAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::bulk_update(self, body, request).await
    }
}
