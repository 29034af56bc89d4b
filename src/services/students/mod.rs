pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::IdsRequest;
use crate::models::students::requests::{StudentListParams, StudentRequest};

crate::services::define_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_students(self, query, request).await
    }

    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::get_student(self, student_id, request).await
    }

    pub async fn create_student(
        &self,
        body: StudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_student(self, body, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        body: StudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_student(self, student_id, body, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::delete_student(self, student_id, request).await
    }

    pub async fn bulk_delete_students(
        &self,
        body: IdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::bulk_delete_students(self, body, request).await
    }
}
