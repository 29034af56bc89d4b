use super::SeaOrmStorage;
use crate::entity::extracurricular_students::{
    ActiveModel as MembershipActiveModel, Column as MembershipColumn,
    Entity as ExtracurricularStudents,
};
use crate::entity::extracurriculars::{ActiveModel, Column, Entity as Extracurriculars};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    extracurriculars::{
        entities::Extracurricular,
        requests::{ExtracurricularListParams, ExtracurricularRequest},
        responses::{ExtracurricularListResponse, ExtracurricularWithCount},
    },
    students::entities::Student,
};
use crate::utils::sql::{contains_ci, equals_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;

const EXTRACURRICULARS_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    async fn with_student_counts(
        &self,
        rows: Vec<crate::entity::extracurriculars::Model>,
    ) -> Result<Vec<ExtracurricularWithCount>> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let counts = self
            .count_grouped::<ExtracurricularStudents, _>(MembershipColumn::ExtracurricularId, &ids)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计成员失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| ExtracurricularWithCount {
                students_count: counts.get(&m.id).copied().unwrap_or(0),
                extracurricular: m.into_extracurricular(),
            })
            .collect())
    }

    /// 分页列出课外活动，附带成员数量
    pub async fn list_extracurriculars_with_pagination_impl(
        &self,
        query: ExtracurricularListParams,
    ) -> Result<ExtracurricularListResponse> {
        let mut select = Extracurriculars::find();
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }

        let (rows, pagination) = self
            .fetch_page(
                select.order_by_asc(Column::Name),
                query.pagination.page(),
                query.pagination.per_page(EXTRACURRICULARS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询课外活动失败: {e}")))?;

        Ok(ExtracurricularListResponse {
            items: self.with_student_counts(rows).await?,
            pagination,
        })
    }

    pub async fn list_all_extracurriculars_impl(&self) -> Result<Vec<ExtracurricularWithCount>> {
        let rows = Extracurriculars::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询课外活动失败: {e}")))?;

        self.with_student_counts(rows).await
    }

    pub async fn get_extracurricular_by_id_impl(&self, id: i64) -> Result<Option<Extracurricular>> {
        let result = Extracurriculars::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询课外活动失败: {e}")))?;

        Ok(result.map(|m| m.into_extracurricular()))
    }

    pub async fn extracurricular_name_taken_impl(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Extracurriculars::find().filter(equals_ci(Column::Name, name.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查名称失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_extracurricular_impl(
        &self,
        req: ExtracurricularRequest,
    ) -> Result<Extracurricular> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(optional_text(req.description)),
            photo: Set(optional_text(req.photo)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建课外活动失败: {e}")))?;

        Ok(result.into_extracurricular())
    }

    pub async fn update_extracurricular_impl(
        &self,
        id: i64,
        req: ExtracurricularRequest,
    ) -> Result<Option<Extracurricular>> {
        if self.get_extracurricular_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(req.name.trim().to_string()),
            description: Set(optional_text(req.description)),
            photo: Set(optional_text(req.photo)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新课外活动失败: {e}")))?;

        Ok(Some(result.into_extracurricular()))
    }

    pub async fn delete_extracurricular_impl(&self, id: i64) -> Result<bool> {
        let result = Extracurriculars::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除课外活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_extracurriculars_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = Extracurriculars::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSysError::database_operation(format!("批量删除课外活动失败: {e}"))
            })?;

        Ok(result.rows_affected)
    }

    /// 活动成员（按姓名排序）
    pub async fn list_extracurricular_students_impl(&self, id: i64) -> Result<Vec<Student>> {
        let Some(activity) = Extracurriculars::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询课外活动失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let students = activity
            .find_related(Students)
            .order_by_asc(StudentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询活动成员失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 添加成员，已在活动中的学生跳过
    pub async fn attach_extracurricular_students_impl(
        &self,
        id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        let existing: HashSet<i64> = ExtracurricularStudents::find()
            .filter(MembershipColumn::ExtracurricularId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询活动成员失败: {e}")))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        let now = chrono::Utc::now().timestamp();
        let new_ids: HashSet<i64> = student_ids
            .iter()
            .copied()
            .filter(|sid| !existing.contains(sid))
            .collect();
        if new_ids.is_empty() {
            return Ok(0);
        }
        let count = new_ids.len() as u64;
        let rows: Vec<MembershipActiveModel> = new_ids
            .into_iter()
            .map(|student_id| MembershipActiveModel {
                extracurricular_id: Set(id),
                student_id: Set(student_id),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        ExtracurricularStudents::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("添加活动成员失败: {e}")))?;

        Ok(count)
    }

    pub async fn detach_extracurricular_student_impl(&self, id: i64, student_id: i64) -> Result<bool> {
        let result = ExtracurricularStudents::delete_many()
            .filter(MembershipColumn::ExtracurricularId.eq(id))
            .filter(MembershipColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("移除活动成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[tokio::test]
    async fn test_attach_skips_existing_members() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let club = storage
            .create_extracurricular_impl(ExtracurricularRequest {
                name: "Futsal".into(),
                description: None,
                photo: None,
            })
            .await
            .unwrap();
        let a = storage
            .create_student_impl(student_request("1", "Ani", "7A"), None)
            .await
            .unwrap();
        let b = storage
            .create_student_impl(student_request("2", "Budi", "7A"), None)
            .await
            .unwrap();

        assert_eq!(
            storage.attach_extracurricular_students_impl(club.id, &[a.id]).await.unwrap(),
            1
        );
        assert_eq!(
            storage
                .attach_extracurricular_students_impl(club.id, &[a.id, b.id])
                .await
                .unwrap(),
            1
        );

        let all = storage.list_all_extracurriculars_impl().await.unwrap();
        assert_eq!(all[0].students_count, 2);

        assert!(storage.detach_extracurricular_student_impl(club.id, a.id).await.unwrap());
        let members = storage.list_extracurricular_students_impl(club.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Budi");
        assert!(storage.extracurricular_name_taken_impl("futsal", None).await.unwrap());
    }
}
