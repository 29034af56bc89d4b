use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::Result;
use crate::models::classes::responses::{ClassDetailResponse, ClassSummary};
use crate::services::{found, respond};
use crate::storage::Storage;

pub(crate) async fn detail(storage: &dyn Storage, class_id: i64) -> Result<ClassDetailResponse> {
    let class = found(storage.get_class_by_id(class_id).await?, "Class not found")?;
    let students = storage.list_students_in_class(&class.name).await?;
    let teacher = storage.get_homeroom_teacher_for_class(&class.name).await?;
    Ok(ClassDetailResponse {
        class: ClassSummary::new(class, students.len() as i64, teacher),
        students,
    })
}

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(detail(storage.as_ref(), class_id).await, "Class retrieved successfully")
}
