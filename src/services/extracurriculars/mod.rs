use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::extracurriculars::{
    entities::Extracurricular,
    requests::{AssignStudentsRequest, ExtracurricularListParams, ExtracurricularRequest},
    responses::ExtracurricularDetailResponse,
};
use crate::models::{BulkDeleteResponse, IdsRequest};
use crate::services::files::remove_stored_file;
use crate::services::{define_service, found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;

define_service!(ExtracurricularService);

const CONTENT_TYPE: &str = "extracurricular";
const NOT_FOUND: &str = "Extracurricular activity not found";

async fn validated(
    storage: &dyn Storage,
    mut req: ExtracurricularRequest,
    exclude_id: Option<i64>,
) -> Result<ExtracurricularRequest> {
    req.validate().map_err(invalid)?;
    req.name = req.name.trim().to_string();
    req.description = req.description.filter(|d| !d.trim().is_empty());
    req.photo = req.photo.filter(|p| !p.trim().is_empty());
    if storage.extracurricular_name_taken(&req.name, exclude_id).await? {
        return Err(invalid(format!(
            "Extracurricular activity '{}' already exists",
            req.name
        )));
    }
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: ExtracurricularRequest) -> Result<Extracurricular> {
    let req = validated(storage, req, None).await?;
    let created = storage.create_extracurricular(req).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(created.id),
        Some(&created.name),
    );
    Ok(created)
}

/// 更新课外活动，照片替换后删除旧文件
pub(crate) async fn update(
    storage: &dyn Storage,
    id: i64,
    req: ExtracurricularRequest,
) -> Result<Extracurricular> {
    let current = found(storage.get_extracurricular_by_id(id).await?, NOT_FOUND)?;
    let req = validated(storage, req, Some(id)).await?;
    let updated = found(storage.update_extracurricular(id, req).await?, NOT_FOUND)?;
    if current.photo != updated.photo {
        remove_stored_file(current.photo.as_deref());
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(updated.id),
        Some(&updated.name),
    );
    Ok(updated)
}

pub(crate) async fn detail(storage: &dyn Storage, id: i64) -> Result<ExtracurricularDetailResponse> {
    let extracurricular = found(storage.get_extracurricular_by_id(id).await?, NOT_FOUND)?;
    Ok(ExtracurricularDetailResponse {
        students: storage.list_extracurricular_students(id).await?,
        extracurricular,
    })
}

pub(crate) async fn delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let current = found(storage.get_extracurricular_by_id(id).await?, NOT_FOUND)?;
    if !storage.delete_extracurricular(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    remove_stored_file(current.photo.as_deref());
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&current.name));
    Ok(())
}

pub(crate) async fn delete_many(storage: &dyn Storage, ids: &[i64]) -> Result<BulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one extracurricular activity."));
    }
    let mut photos = Vec::new();
    for id in ids {
        if let Some(existing) = storage.get_extracurricular_by_id(*id).await? {
            photos.push(existing.photo);
        }
    }
    let deleted = storage.delete_extracurriculars(ids).await?;
    for photo in &photos {
        remove_stored_file(photo.as_deref());
    }
    if deleted > 0 {
        ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", None, None);
    }
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

/// 添加成员，所有学生必须存在，已是成员的忽略
pub(crate) async fn assign_students(
    storage: &dyn Storage,
    id: i64,
    req: AssignStudentsRequest,
) -> Result<u64> {
    req.validate().map_err(invalid)?;
    let extracurricular = found(storage.get_extracurricular_by_id(id).await?, NOT_FOUND)?;
    let mut student_ids = req.student_ids;
    student_ids.sort_unstable();
    student_ids.dedup();
    if storage.count_existing_students(&student_ids).await? != student_ids.len() as u64 {
        return Err(invalid("One or more selected students do not exist."));
    }
    let added = storage.attach_extracurricular_students(id, &student_ids).await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(id),
        Some(&extracurricular.name),
    );
    Ok(added)
}

pub(crate) async fn remove_student(storage: &dyn Storage, id: i64, student_id: i64) -> Result<()> {
    let extracurricular = found(storage.get_extracurricular_by_id(id).await?, NOT_FOUND)?;
    if !storage.detach_extracurricular_student(id, student_id).await? {
        return Err(SchoolSysError::not_found(
            "Student is not a member of this extracurricular activity",
        ));
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(id),
        Some(&extracurricular.name),
    );
    Ok(())
}

impl ExtracurricularService {
    pub async fn list_extracurriculars(
        &self,
        query: ExtracurricularListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_extracurriculars_with_pagination(query).await,
            "Extracurricular activities retrieved successfully",
        )
    }

    pub async fn get_extracurricular(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            detail(storage.as_ref(), id).await,
            "Extracurricular activity retrieved successfully",
        )
    }

    pub async fn create_extracurricular(
        &self,
        body: ExtracurricularRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_created(
            create(storage.as_ref(), body).await,
            "Extracurricular activity created successfully.",
        )
    }

    pub async fn update_extracurricular(
        &self,
        id: i64,
        body: ExtracurricularRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            update(storage.as_ref(), id, body).await,
            "Extracurricular activity updated successfully.",
        )
    }

    pub async fn delete_extracurricular(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(
            delete(storage.as_ref(), id).await,
            "Extracurricular activity deleted successfully.",
        )
    }

    pub async fn bulk_delete_extracurriculars(
        &self,
        body: IdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = delete_many(storage.as_ref(), &body.ids).await;
        let message = match &result {
            Ok(r) => format!("{} extracurricular activities deleted successfully.", r.deleted),
            Err(_) => String::new(),
        };
        respond(result, &message)
    }

    pub async fn assign_students(
        &self,
        id: i64,
        body: AssignStudentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            assign_students(storage.as_ref(), id, body).await,
            "Students assigned successfully.",
        )
    }

    pub async fn remove_student(
        &self,
        id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(
            remove_student(storage.as_ref(), id, student_id).await,
            "Student removed successfully.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    fn request(name: &str) -> ExtracurricularRequest {
        ExtracurricularRequest {
            name: name.into(),
            description: Some("Latihan setiap Jumat".into()),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_unique_name_case_insensitive() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let scouts = create(&storage, request("Pramuka")).await.unwrap();
        let err = create(&storage, request("pramuka ")).await.unwrap_err();
        assert_eq!(err.message(), "Extracurricular activity 'pramuka' already exists");

        // 自身名称不算重复
        let updated = update(&storage, scouts.id, request("Pramuka")).await.unwrap();
        assert_eq!(updated.name, "Pramuka");
    }

    #[tokio::test]
    async fn test_assign_and_remove_students() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let club = create(&storage, request("Paskibra")).await.unwrap();
        let ani = storage
            .create_student(student_request("0401", "Ani", "7A"), None)
            .await
            .unwrap();

        let err = assign_students(&storage, club.id, AssignStudentsRequest { student_ids: vec![ani.id, 999] })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let added = assign_students(
            &storage,
            club.id,
            AssignStudentsRequest { student_ids: vec![ani.id, ani.id] },
        )
        .await
        .unwrap();
        assert_eq!(added, 1);
        assert_eq!(detail(&storage, club.id).await.unwrap().students.len(), 1);

        remove_student(&storage, club.id, ani.id).await.unwrap();
        assert!(remove_student(&storage, club.id, ani.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(delete(&storage, 42).await.unwrap_err().code(), "E008");
        assert!(delete_many(&storage, &[]).await.is_err());
    }
}
