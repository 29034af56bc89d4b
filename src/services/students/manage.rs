use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{Result, SchoolSysError};
use crate::models::students::{
    entities::Student,
    requests::{StudentListParams, StudentRequest},
    responses::StudentDetailResponse,
};
use crate::models::{BulkDeleteResponse, IdsRequest};
use crate::services::{found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

const NISN_TAKEN: &str = "A student with this NISN already exists.";

/// 校验请求并确定班主任：未指定时使用该班级的班主任
async fn prepare(
    storage: &dyn Storage,
    mut req: StudentRequest,
    exclude_id: Option<i64>,
) -> Result<(StudentRequest, Option<i64>)> {
    req.validate(chrono::Local::now().date_naive()).map_err(invalid)?;
    req.nisn = req.nisn.trim().to_string();
    req.name = req.name.trim().to_string();
    req.class = req.class.trim().to_string();

    if storage.student_nisn_taken(&req.nisn, exclude_id).await? {
        return Err(invalid(NISN_TAKEN));
    }

    for id in &req.extracurricular_ids {
        if storage.get_extracurricular_by_id(*id).await?.is_none() {
            return Err(invalid("The selected extracurricular is invalid."));
        }
    }
    req.extracurricular_ids.sort_unstable();
    req.extracurricular_ids.dedup();

    let homeroom_teacher_id = match req.homeroom_teacher_id {
        Some(id) => {
            if storage.get_staff_by_id(id).await?.is_none() {
                return Err(invalid("The selected homeroom teacher is invalid."));
            }
            Some(id)
        }
        None => storage
            .get_homeroom_teacher_for_class(&req.class)
            .await?
            .map(|staff| staff.id),
    };
    Ok((req, homeroom_teacher_id))
}

pub(crate) async fn create(storage: &dyn Storage, req: StudentRequest) -> Result<Student> {
    let (req, homeroom_teacher_id) = prepare(storage, req, None).await?;
    storage.create_student(req, homeroom_teacher_id).await
}

pub(crate) async fn update(
    storage: &dyn Storage,
    student_id: i64,
    req: StudentRequest,
) -> Result<Student> {
    found(storage.get_student_by_id(student_id).await?, "Student not found")?;
    let (req, homeroom_teacher_id) = prepare(storage, req, Some(student_id)).await?;
    found(
        storage.update_student(student_id, req, homeroom_teacher_id).await?,
        "Student not found",
    )
}

pub(crate) async fn detail(storage: &dyn Storage, student_id: i64) -> Result<StudentDetailResponse> {
    let student = found(storage.get_student_by_id(student_id).await?, "Student not found")?;
    let homeroom_teacher = match student.homeroom_teacher_id {
        Some(id) => storage.get_staff_by_id(id).await?,
        None => None,
    };
    Ok(StudentDetailResponse {
        extracurriculars: storage.list_student_extracurriculars(student.id).await?,
        homeroom_teacher,
        student,
    })
}

pub(crate) async fn delete_many(storage: &dyn Storage, ids: &[i64]) -> Result<BulkDeleteResponse> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Err(invalid("Please select at least one student to delete."));
    }
    if storage.count_existing_students(&ids).await? != ids.len() as u64 {
        return Err(invalid("Some selected students do not exist."));
    }
    let deleted = storage.delete_students(&ids).await?;
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        storage.list_students_with_pagination(query).await,
        "Students retrieved successfully",
    )
}

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        detail(storage.as_ref(), student_id).await,
        "Student retrieved successfully",
    )
}

pub async fn create_student(
    service: &StudentService,
    body: StudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create(storage.as_ref(), body).await,
        "Student created successfully.",
    )
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    body: StudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update(storage.as_ref(), student_id, body).await,
        "Student updated successfully.",
    )
}

pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = match storage.delete_student(student_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(SchoolSysError::not_found("Student not found")),
        Err(e) => Err(e),
    };
    respond_empty(result, "Student deleted successfully.")
}

pub async fn bulk_delete_students(
    service: &StudentService,
    body: IdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = delete_many(storage.as_ref(), &body.ids).await;
    let message = match &result {
        Ok(r) => format!("Successfully deleted {} students.", r.deleted),
        Err(_) => String::new(),
    };
    respond(result, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::{create_staff, staff_request};
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[tokio::test]
    async fn test_duplicate_nisn_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create(&storage, student_request("0011", "Ani", "7A")).await.unwrap();
        let err = create(&storage, student_request("0011", "Ana", "7A"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), NISN_TAKEN);
    }

    #[tokio::test]
    async fn test_homeroom_teacher_defaults_from_class() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let mut req = staff_request("Wati", "Guru", "Akademik");
        req.homeroom_class = Some("8B".into());
        let teacher = storage.create_staff(req, "wati".into()).await.unwrap();

        let student = create(&storage, student_request("0021", "Dodi", "8B")).await.unwrap();
        assert_eq!(student.homeroom_teacher_id, Some(teacher.id));

        let other = create_staff(&storage, "Eka", "Guru", "Akademik").await;
        let mut explicit = student_request("0022", "Dita", "8B");
        explicit.homeroom_teacher_id = Some(other.id);
        let student = create(&storage, explicit).await.unwrap();
        assert_eq!(student.homeroom_teacher_id, Some(other.id));

        let mut missing = student_request("0023", "Dina", "8B");
        missing.homeroom_teacher_id = Some(999);
        assert!(create(&storage, missing).await.is_err());
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_all_existing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let student = create(&storage, student_request("0031", "Eko", "9A")).await.unwrap();
        assert!(delete_many(&storage, &[student.id, 404]).await.is_err());
        let result = delete_many(&storage, &[student.id]).await.unwrap();
        assert_eq!(result.deleted, 1);
    }
}
