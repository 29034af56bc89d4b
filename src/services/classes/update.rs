use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use super::create::validated;
use crate::errors::Result;
use crate::models::classes::{entities::SchoolClass, requests::ClassRequest};
use crate::services::{found, respond};
use crate::storage::Storage;

/// 更新班级，改名由存储层同步到学生与班主任
pub(crate) async fn update(
    storage: &dyn Storage,
    class_id: i64,
    req: ClassRequest,
) -> Result<SchoolClass> {
    found(storage.get_class_by_id(class_id).await?, "Class not found")?;
    let req = validated(storage, req, Some(class_id)).await?;
    found(storage.update_class(class_id, req).await?, "Class not found")
}

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update(storage.as_ref(), class_id, update_data).await,
        "Class updated successfully",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::classes::create::{create, tests::class_request};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::staff_request;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[tokio::test]
    async fn test_rename_cascades_to_students_and_homeroom() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = create(&storage, class_request("8", "B")).await.unwrap();
        let mut teacher = staff_request("Wati", "Guru", "Akademik");
        teacher.homeroom_class = Some("8B".into());
        storage.create_staff(teacher, "wati".into()).await.unwrap();
        storage
            .create_student(student_request("0101", "Ani", "8B"), None)
            .await
            .unwrap();

        let renamed = update(&storage, class.id, class_request("8", "C")).await.unwrap();
        assert_eq!(renamed.name, "8C");
        assert_eq!(storage.list_students_in_class("8C").await.unwrap().len(), 1);
        assert!(
            storage
                .get_homeroom_teacher_for_class("8C")
                .await
                .unwrap()
                .is_some()
        );
    }
}
