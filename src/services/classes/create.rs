use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::Result;
use crate::models::classes::{
    entities::{SchoolClass, class_name},
    requests::ClassRequest,
};
use crate::services::{invalid, respond_created};
use crate::storage::Storage;

/// 校验请求，并检查生成的班级名称是否已被其他班级使用
pub(crate) async fn validated(
    storage: &dyn Storage,
    mut req: ClassRequest,
    exclude_id: Option<i64>,
) -> Result<ClassRequest> {
    req.validate().map_err(invalid)?;
    req.grade_level = req.grade_level.trim().to_string();
    req.class_section = req.class_section.trim().to_uppercase();

    let name = class_name(&req.grade_level, &req.class_section);
    if let Some(existing) = storage.get_class_by_name(&name).await?
        && Some(existing.id) != exclude_id
    {
        return Err(invalid(format!("Class {name} already exists")));
    }
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: ClassRequest) -> Result<SchoolClass> {
    let req = validated(storage, req, None).await?;
    storage.create_class(req).await
}

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create(storage.as_ref(), class_data).await,
        "Class created successfully",
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    pub(crate) fn class_request(grade: &str, section: &str) -> ClassRequest {
        ClassRequest {
            grade_level: grade.into(),
            class_section: section.into(),
            description: None,
            capacity: 32,
        }
    }

    #[tokio::test]
    async fn test_duplicate_class_name() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = create(&storage, class_request("7", "a")).await.unwrap();
        assert_eq!(class.name, "7A");

        let err = create(&storage, class_request("7", "A")).await.unwrap_err();
        assert_eq!(err.message(), "Class 7A already exists");
    }
}
