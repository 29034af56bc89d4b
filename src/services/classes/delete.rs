use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::{Result, SchoolSysError};
use crate::models::IdsRequest;
use crate::models::classes::{entities::SchoolClass, responses::ClassBulkDeleteResponse};
use crate::services::{error_response, found, invalid, respond, respond_empty};
use crate::storage::Storage;

const HAS_STUDENTS: &str =
    "Cannot delete class with existing students. Please move students to other classes first.";

async fn delete_checked(storage: &dyn Storage, class: &SchoolClass) -> Result<()> {
    if !storage.list_students_in_class(&class.name).await?.is_empty() {
        return Err(invalid(HAS_STUDENTS));
    }
    if !storage.delete_class(class.id).await? {
        return Err(SchoolSysError::not_found("Class not found"));
    }
    Ok(())
}

pub(crate) async fn delete_one(storage: &dyn Storage, class_id: i64) -> Result<String> {
    let class = found(storage.get_class_by_id(class_id).await?, "Class not found")?;
    delete_checked(storage, &class).await?;
    Ok(class.name)
}

/// 逐个删除，有学生的班级记录错误后跳过
pub(crate) async fn delete_many(storage: &dyn Storage, ids: &[i64]) -> Result<ClassBulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one class."));
    }
    let mut classes = Vec::new();
    for id in ids {
        if let Some(class) = storage.get_class_by_id(*id).await? {
            classes.push(class);
        }
    }

    let mut deleted = 0;
    let mut errors = Vec::new();
    for class in &classes {
        match delete_checked(storage, class).await {
            Ok(()) => deleted += 1,
            Err(SchoolSysError::Validation(msg)) => errors.push(format!("Class {}: {msg}", class.name)),
            Err(e) => return Err(e),
        }
    }
    Ok(ClassBulkDeleteResponse {
        deleted,
        errors,
        total: classes.len() as i64,
    })
}

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match delete_one(storage.as_ref(), class_id).await {
        Ok(name) => respond_empty(Ok(()), &format!("Class {name} deleted successfully")),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn bulk_delete_classes(
    service: &ClassService,
    request: &HttpRequest,
    body: IdsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = delete_many(storage.as_ref(), &body.ids).await;
    let message = match &result {
        Ok(r) if r.errors.is_empty() => format!("Deleted {} class(es)", r.deleted),
        Ok(r) => format!("Deleted {} class(es). Errors: {}", r.deleted, r.errors.join(", ")),
        Err(_) => String::new(),
    };
    respond(result, &message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classes::create::{create, tests::class_request};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[tokio::test]
    async fn test_class_with_students_is_kept() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let full = create(&storage, class_request("9", "A")).await.unwrap();
        let empty = create(&storage, class_request("9", "B")).await.unwrap();
        storage
            .create_student(student_request("0201", "Rudi", "9A"), None)
            .await
            .unwrap();

        let err = delete_one(&storage, full.id).await.unwrap_err();
        assert_eq!(err.message(), HAS_STUDENTS);

        let result = delete_many(&storage, &[full.id, empty.id, 404]).await.unwrap();
        assert_eq!(result.deleted, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.errors, vec![format!("Class 9A: {HAS_STUDENTS}")]);
        assert!(storage.get_class_by_id(full.id).await.unwrap().is_some());
    }
}
