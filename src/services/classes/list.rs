use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::{
    entities::GRADE_LEVELS,
    requests::{ClassOptionsQuery, ClassQueryParams},
    responses::ClassOption,
};
use crate::services::{invalid, respond};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        storage.list_classes_with_pagination(query).await,
        "Classes retrieved successfully",
    )
}

pub async fn class_options(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassOptionsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let grade_level = query.grade_level.filter(|g| !g.is_empty());
    if let Some(grade) = grade_level.as_deref()
        && !GRADE_LEVELS.contains(&grade)
    {
        return respond::<Vec<ClassOption>>(Err(invalid("Grade level must be 7, 8, or 9.")), "");
    }

    let result = storage.list_classes(grade_level).await.map(|classes| {
        classes
            .into_iter()
            .map(|c| ClassOption {
                id: c.id,
                name: c.name,
                grade_level: c.grade_level,
                class_section: c.class_section,
                capacity: c.capacity,
            })
            .collect::<Vec<_>>()
    });
    respond(result, "Classes retrieved successfully")
}

pub async fn class_stats(service: &ClassService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        storage.class_statistics().await,
        "Class statistics retrieved successfully",
    )
}
