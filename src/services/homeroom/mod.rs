use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::homeroom::{
    requests::{HomeroomAssignRequest, HomeroomRemoveRequest},
    responses::{
        HomeroomAssignmentResponse, HomeroomClassDetails, HomeroomClassStat,
        HomeroomOverviewResponse,
    },
};
use crate::models::staff::entities::Staff;
use crate::services::{define_service, error_response, found, invalid, respond};
use crate::storage::Storage;

define_service!(HomeroomService);

// 可担任班主任的教师，按姓名排序
async fn teachers(storage: &dyn Storage) -> Result<Vec<Staff>> {
    Ok(storage
        .list_all_staff()
        .await?
        .into_iter()
        .filter(|s| s.is_academic_teacher() || s.homeroom_class.is_some())
        .collect())
}

pub(crate) async fn overview(storage: &dyn Storage) -> Result<HomeroomOverviewResponse> {
    let teachers = teachers(storage).await?;
    let available_classes: Vec<String> = storage
        .list_classes(None)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let counts = storage.count_students_by_class().await?;

    let class_stats: Vec<HomeroomClassStat> = available_classes
        .iter()
        .map(|class| {
            let assigned_teacher = teachers
                .iter()
                .find(|t| t.homeroom_class.as_deref() == Some(class.as_str()))
                .cloned();
            HomeroomClassStat {
                class: class.clone(),
                student_count: counts.get(class).copied().unwrap_or(0),
                has_teacher: assigned_teacher.is_some(),
                assigned_teacher,
            }
        })
        .collect();
    let unassigned_classes = class_stats
        .iter()
        .filter(|s| !s.has_teacher)
        .map(|s| s.class.clone())
        .collect();

    Ok(HomeroomOverviewResponse {
        teachers,
        class_stats,
        available_classes,
        unassigned_classes,
    })
}

/// 分配班主任：教师只能担任一个班级，班级只能有一位班主任
pub(crate) async fn assign(
    storage: &dyn Storage,
    req: HomeroomAssignRequest,
) -> Result<HomeroomAssignmentResponse> {
    req.validate().map_err(invalid)?;
    let class_name = req.class_name.trim().to_string();
    let staff = found(storage.get_staff_by_id(req.staff_id).await?, "Staff member not found")?;

    if let Some(current) = staff.homeroom_class.as_deref()
        && current != class_name
    {
        return Err(invalid(format!(
            "{} is already assigned as homeroom teacher for class {current}. Please remove the existing assignment first.",
            staff.name
        )));
    }
    if let Some(existing) = storage.get_homeroom_teacher_for_class(&class_name).await?
        && existing.id != staff.id
    {
        return Err(invalid(format!(
            "Class {class_name} is already assigned to {}",
            existing.name
        )));
    }

    let students_updated = storage.assign_homeroom(staff.id, &class_name).await?;
    tracing::info!(
        "Assigned {} as homeroom teacher for class {} ({} students)",
        staff.name,
        class_name,
        students_updated
    );
    Ok(HomeroomAssignmentResponse {
        staff,
        class_name,
        students_updated,
    })
}

pub(crate) async fn remove(storage: &dyn Storage, staff_id: i64) -> Result<HomeroomAssignmentResponse> {
    let staff = found(storage.get_staff_by_id(staff_id).await?, "Staff member not found")?;
    let Some(class_name) = staff.homeroom_class.clone() else {
        return Err(invalid("This teacher has no homeroom class assignment"));
    };
    let students_updated = storage.remove_homeroom(staff.id, &class_name).await?;
    Ok(HomeroomAssignmentResponse {
        staff,
        class_name,
        students_updated,
    })
}

pub(crate) async fn bulk_assign(
    storage: &dyn Storage,
    req: HomeroomAssignRequest,
) -> Result<HomeroomAssignmentResponse> {
    req.validate().map_err(invalid)?;
    let class_name = req.class_name.trim().to_string();
    let staff = found(storage.get_staff_by_id(req.staff_id).await?, "Staff member not found")?;
    let students_updated = storage
        .set_class_homeroom_teacher(&class_name, staff.id)
        .await?;
    Ok(HomeroomAssignmentResponse {
        staff,
        class_name,
        students_updated,
    })
}

pub(crate) async fn class_details(storage: &dyn Storage, class_name: &str) -> Result<HomeroomClassDetails> {
    let students = storage.list_students_in_class(class_name).await?;
    let students_with_homeroom = students
        .iter()
        .filter(|s| s.homeroom_teacher_id.is_some())
        .count() as i64;
    Ok(HomeroomClassDetails {
        class_name: class_name.to_string(),
        assigned_teacher: storage.get_homeroom_teacher_for_class(class_name).await?,
        total_students: students.len() as i64,
        students_with_homeroom,
        students,
    })
}

impl HomeroomService {
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(overview(storage.as_ref()).await, "Homeroom overview retrieved successfully")
    }

    pub async fn assign_class(
        &self,
        body: HomeroomAssignRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match assign(storage.as_ref(), body).await {
            Ok(result) => {
                let message = format!(
                    "Successfully assigned {} as homeroom teacher for class {}. Updated {} students.",
                    result.staff.name, result.class_name, result.students_updated
                );
                respond(Ok(result), &message)
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn remove_assignment(
        &self,
        body: HomeroomRemoveRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match remove(storage.as_ref(), body.staff_id).await {
            Ok(result) => {
                let message = format!(
                    "Removed homeroom assignment for {} from class {}. Updated {} students.",
                    result.staff.name, result.class_name, result.students_updated
                );
                respond(Ok(result), &message)
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn bulk_assign_students(
        &self,
        body: HomeroomAssignRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match bulk_assign(storage.as_ref(), body).await {
            Ok(result) => {
                let message = format!(
                    "Successfully assigned {} students from class {} to {}",
                    result.students_updated, result.class_name, result.staff.name
                );
                respond(Ok(result), &message)
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn class_details(
        &self,
        class_name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            class_details(storage.as_ref(), &class_name).await,
            "Class details retrieved successfully",
        )
    }

    pub async fn available_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(teachers(storage.as_ref()).await, "Teachers retrieved successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::ClassRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    fn assign_request(staff_id: i64, class_name: &str) -> HomeroomAssignRequest {
        HomeroomAssignRequest {
            staff_id,
            class_name: class_name.into(),
        }
    }

    #[tokio::test]
    async fn test_assign_conflicts_and_remove() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage
            .create_class(ClassRequest {
                grade_level: "7".into(),
                class_section: "A".into(),
                description: None,
                capacity: 30,
            })
            .await
            .unwrap();
        storage
            .create_student(student_request("0301", "Ani", "7A"), None)
            .await
            .unwrap();
        let rina = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let tono = create_staff(&storage, "Tono", "Guru", "Akademik").await;

        let result = assign(&storage, assign_request(rina.id, "7A")).await.unwrap();
        assert_eq!(result.students_updated, 1);

        let err = assign(&storage, assign_request(tono.id, "7A")).await.unwrap_err();
        assert_eq!(err.message(), "Class 7A is already assigned to Rina");

        let err = assign(&storage, assign_request(rina.id, "7B")).await.unwrap_err();
        assert!(err.message().starts_with("Rina is already assigned"));

        let view = overview(&storage).await.unwrap();
        assert_eq!(view.available_classes, vec!["7A".to_string()]);
        assert!(view.unassigned_classes.is_empty());
        assert_eq!(view.class_stats[0].student_count, 1);

        remove(&storage, rina.id).await.unwrap();
        let err = remove(&storage, rina.id).await.unwrap_err();
        assert_eq!(err.message(), "This teacher has no homeroom class assignment");

        let details = class_details(&storage, "7A").await.unwrap();
        assert_eq!(details.total_students, 1);
        assert_eq!(details.students_with_homeroom, 0);
    }
}
