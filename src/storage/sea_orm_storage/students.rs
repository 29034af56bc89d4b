use super::SeaOrmStorage;
use crate::entity::extracurricular_students::{
    ActiveModel as MembershipActiveModel, Column as MembershipColumn,
    Entity as ExtracurricularStudents,
};
use crate::entity::extracurriculars::{Column as ExtracurricularColumn, Entity as Extracurriculars};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    extracurriculars::entities::Extracurricular,
    students::{
        entities::Student,
        requests::{StudentListParams, StudentRequest},
        responses::{StudentListResponse, StudentSummary},
    },
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

const STUDENTS_PER_PAGE: u64 = 10;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn active_model(req: &StudentRequest, homeroom_teacher_id: Option<i64>) -> ActiveModel {
    ActiveModel {
        homeroom_teacher_id: Set(homeroom_teacher_id),
        nisn: Set(req.nisn.trim().to_string()),
        name: Set(req.name.trim().to_string()),
        gender: Set(req.gender.as_str().to_string()),
        birth_date: Set(req.birth_date.clone()),
        birth_place: Set(optional_text(req.birth_place.clone())),
        religion: Set(optional_text(req.religion.clone())),
        address: Set(optional_text(req.address.clone())),
        parent_name: Set(optional_text(req.parent_name.clone())),
        parent_phone: Set(optional_text(req.parent_phone.clone())),
        class: Set(req.class.trim().to_string()),
        entry_year: Set(req.entry_year),
        graduation_year: Set(req.graduation_year),
        status: Set(req.status.as_str().to_string()),
        photo: Set(optional_text(req.photo.clone())),
        notes: Set(optional_text(req.notes.clone())),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
}

/// 将学生的课外活动同步为给定集合
async fn sync_memberships<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    extracurricular_ids: &[i64],
) -> std::result::Result<(), sea_orm::DbErr> {
    let current: HashSet<i64> = ExtracurricularStudents::find()
        .filter(MembershipColumn::StudentId.eq(student_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| m.extracurricular_id)
        .collect();
    let wanted: HashSet<i64> = extracurricular_ids.iter().copied().collect();

    let removed: Vec<i64> = current.difference(&wanted).copied().collect();
    if !removed.is_empty() {
        ExtracurricularStudents::delete_many()
            .filter(MembershipColumn::StudentId.eq(student_id))
            .filter(MembershipColumn::ExtracurricularId.is_in(removed))
            .exec(conn)
            .await?;
    }

    let now = chrono::Utc::now().timestamp();
    let added: Vec<MembershipActiveModel> = wanted
        .difference(&current)
        .map(|id| MembershipActiveModel {
            extracurricular_id: Set(*id),
            student_id: Set(student_id),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();
    if !added.is_empty() {
        ExtracurricularStudents::insert_many(added).exec(conn).await?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 分页列出学生（最新在前），附带班主任
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find();

        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Nisn, &term))
                    .add(contains_ci(Column::Class, &term)),
            );
        }
        if let Some(gender) = query.gender {
            select = select.filter(Column::Gender.eq(gender.as_str()));
        }
        if let Some(class) = query.class.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(Column::Class.eq(class));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let (students, pagination) = self
            .fetch_page(
                select
                    .order_by_desc(Column::CreatedAt)
                    .order_by_desc(Column::Id),
                query.pagination.page(),
                query.pagination.per_page(STUDENTS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询学生列表失败: {e}")))?;

        let teacher_ids: Vec<i64> = students
            .iter()
            .filter_map(|s| s.homeroom_teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let teachers: HashMap<i64, _> = self
            .list_staff_by_ids_impl(&teacher_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(StudentListResponse {
            items: students
                .into_iter()
                .map(|m| StudentSummary {
                    homeroom_teacher: m
                        .homeroom_teacher_id
                        .and_then(|id| teachers.get(&id).cloned()),
                    student: m.into_student(),
                })
                .collect(),
            pagination,
        })
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn student_nisn_taken_impl(&self, nisn: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Students::find().filter(Column::Nisn.eq(nisn.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查 NISN 失败: {e}")))?;

        Ok(count > 0)
    }

    /// 创建学生并同步课外活动
    pub async fn create_student_impl(
        &self,
        req: StudentRequest,
        homeroom_teacher_id: Option<i64>,
    ) -> Result<Student> {
        let mut model = active_model(&req, homeroom_teacher_id);
        model.created_at = Set(chrono::Utc::now().timestamp());

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let student = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建学生失败: {e}")))?;
        sync_memberships(&txn, student.id, &req.extracurricular_ids)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("同步课外活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(student.into_student())
    }

    /// 更新学生并同步课外活动
    pub async fn update_student_impl(
        &self,
        id: i64,
        req: StudentRequest,
        homeroom_teacher_id: Option<i64>,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = active_model(&req, homeroom_teacher_id);
        model.id = Set(id);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let student = model
            .update(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新学生失败: {e}")))?;
        sync_memberships(&txn, id, &req.extracurricular_ids)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("同步课外活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(student.into_student()))
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_students_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = Students::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("批量删除学生失败: {e}")))?;

        Ok(result.rows_affected)
    }

    pub async fn count_existing_students_impl(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        Students::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计学生失败: {e}")))
    }

    pub async fn list_student_extracurriculars_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Extracurricular>> {
        let Some(student) = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let rows = student
            .find_related(Extracurriculars)
            .order_by_asc(ExtracurricularColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询课外活动失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_extracurricular()).collect())
    }

    /// 班级内的学生（按姓名排序）
    pub async fn list_students_in_class_impl(&self, class_name: &str) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(Column::Class.eq(class_name))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn count_students_by_class_impl(&self) -> Result<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> = Students::find()
            .select_only()
            .column(Column::Class)
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "count")
            .group_by(Column::Class)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计班级人数失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::models::extracurriculars::requests::ExtracurricularRequest;
    use crate::models::students::entities::{Gender, StudentStatus};

    pub(crate) fn student_request(nisn: &str, name: &str, class: &str) -> StudentRequest {
        StudentRequest {
            nisn: nisn.into(),
            name: name.into(),
            gender: Gender::Female,
            birth_date: "2012-01-05".into(),
            birth_place: None,
            religion: None,
            address: None,
            parent_name: None,
            parent_phone: None,
            class: class.into(),
            homeroom_teacher_id: None,
            entry_year: 2024,
            graduation_year: None,
            status: StudentStatus::Active,
            photo: None,
            notes: None,
            extracurricular_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_with_extracurriculars_and_resync() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let scouts = storage
            .create_extracurricular_impl(ExtracurricularRequest {
                name: "Pramuka".into(),
                description: None,
                photo: None,
            })
            .await
            .unwrap();
        let choir = storage
            .create_extracurricular_impl(ExtracurricularRequest {
                name: "Paduan Suara".into(),
                description: None,
                photo: None,
            })
            .await
            .unwrap();

        let mut request = student_request("0012345678", "Sari", "7A");
        request.extracurricular_ids = vec![scouts.id, choir.id];
        let student = storage.create_student_impl(request.clone(), None).await.unwrap();
        assert_eq!(
            storage
                .list_student_extracurriculars_impl(student.id)
                .await
                .unwrap()
                .len(),
            2
        );

        request.extracurricular_ids = vec![choir.id];
        storage
            .update_student_impl(student.id, request, None)
            .await
            .unwrap();
        let current = storage
            .list_student_extracurriculars_impl(student.id)
            .await
            .unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, "Paduan Suara");
    }

    #[tokio::test]
    async fn test_filters_and_class_counts() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage
            .create_student_impl(student_request("1", "Ani", "7A"), None)
            .await
            .unwrap();
        storage
            .create_student_impl(student_request("2", "Budi", "7A"), None)
            .await
            .unwrap();
        storage
            .create_student_impl(student_request("3", "Citra", "8B"), None)
            .await
            .unwrap();

        let result = storage
            .list_students_with_pagination_impl(StudentListParams {
                pagination: PaginationQuery::default(),
                search: None,
                gender: None,
                class: Some("7A".into()),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 2);

        let counts = storage.count_students_by_class_impl().await.unwrap();
        assert_eq!(counts.get("7A"), Some(&2));
        assert_eq!(counts.get("8B"), Some(&1));
        assert!(storage.student_nisn_taken_impl("3", None).await.unwrap());
    }
}
