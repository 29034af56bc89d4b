use super::SeaOrmStorage;
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::entity::staff_subjects::{
    ActiveModel as StaffSubjectActiveModel, Column as StaffSubjectColumn, Entity as StaffSubjects,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::teacher_subject_works::{Column as WorkColumn, Entity as TeacherSubjectWorks};
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    staff::entities::Staff,
    subjects::{
        entities::Subject,
        requests::{SubjectListParams, SubjectRequest},
        responses::{SubjectListResponse, SubjectWithCount},
    },
};
use crate::utils::sql::{contains_ci, equals_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;

const SUBJECTS_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    /// 分页列出科目，附带任课教师数量
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListParams,
    ) -> Result<SubjectListResponse> {
        let mut select = Subjects::find();

        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Code, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }

        let (subjects, pagination) = self
            .fetch_page(
                select.order_by_asc(Column::Name),
                query.pagination.page(),
                query.pagination.per_page(SUBJECTS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询科目列表失败: {e}")))?;

        let ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
        let counts = self
            .count_grouped::<StaffSubjects, _>(StaffSubjectColumn::SubjectId, &ids)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计任课教师失败: {e}")))?;

        Ok(SubjectListResponse {
            items: subjects
                .into_iter()
                .map(|m| SubjectWithCount {
                    staff_count: counts.get(&m.id).copied().unwrap_or(0),
                    subject: m.into_subject(),
                })
                .collect(),
            pagination,
        })
    }

    pub async fn list_all_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 科目代码是否被占用（不区分大小写）
    pub async fn subject_code_taken_impl(&self, code: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Subjects::find().filter(equals_ci(Column::Code, code.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查科目代码失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_subject_impl(&self, req: SubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            code: Set(req.normalized_code()),
            name: Set(req.name.trim().to_string()),
            description: Set(optional_text(req.description)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn update_subject_impl(&self, id: i64, req: SubjectRequest) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            code: Set(req.normalized_code()),
            name: Set(req.name.trim().to_string()),
            description: Set(optional_text(req.description)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新科目失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_subjects_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = Subjects::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("批量删除科目失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 科目的任课教师
    pub async fn list_subject_staff_impl(&self, subject_id: i64) -> Result<Vec<Staff>> {
        let Some(subject) = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询科目失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let staff = subject
            .find_related(StaffEntity)
            .order_by_asc(StaffColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询任课教师失败: {e}")))?;

        Ok(staff.into_iter().map(|m| m.into_staff()).collect())
    }

    async fn subject_staff_ids(&self, subject_id: i64) -> Result<HashSet<i64>> {
        let rows = StaffSubjects::find()
            .filter(StaffSubjectColumn::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询任课教师失败: {e}")))?;

        Ok(rows.into_iter().map(|r| r.staff_id).collect())
    }

    async fn apply_subject_staff(
        &self,
        subject_id: i64,
        current: &HashSet<i64>,
        wanted: &HashSet<i64>,
    ) -> Result<()> {
        let removed: Vec<i64> = current.difference(wanted).copied().collect();
        let now = chrono::Utc::now().timestamp();
        let added: Vec<StaffSubjectActiveModel> = wanted
            .difference(current)
            .map(|staff_id| StaffSubjectActiveModel {
                staff_id: Set(*staff_id),
                subject_id: Set(subject_id),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        if !removed.is_empty() {
            StaffSubjects::delete_many()
                .filter(StaffSubjectColumn::SubjectId.eq(subject_id))
                .filter(StaffSubjectColumn::StaffId.is_in(removed.clone()))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("移除任课教师失败: {e}")))?;
            TeacherSubjectWorks::delete_many()
                .filter(WorkColumn::SubjectId.eq(subject_id))
                .filter(WorkColumn::StaffId.is_in(removed))
                .exec(&txn)
                .await
                .map_err(|e| {
                    SchoolSysError::database_operation(format!("删除教学文档目录失败: {e}"))
                })?;
        }
        if !added.is_empty() {
            StaffSubjects::insert_many(added)
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("添加任课教师失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;
        Ok(())
    }

    /// 同步科目的任课教师
    pub async fn sync_subject_staff_impl(&self, subject_id: i64, staff_ids: &[i64]) -> Result<()> {
        let current = self.subject_staff_ids(subject_id).await?;
        let wanted: HashSet<i64> = staff_ids.iter().copied().collect();
        self.apply_subject_staff(subject_id, &current, &wanted).await
    }

    pub async fn remove_subject_staff_impl(&self, subject_id: i64, staff_id: i64) -> Result<bool> {
        let current = self.subject_staff_ids(subject_id).await?;
        if !current.contains(&staff_id) {
            return Ok(false);
        }
        let mut wanted = current.clone();
        wanted.remove(&staff_id);
        self.apply_subject_staff(subject_id, &current, &wanted).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    fn subject(name: &str, code: Option<&str>) -> SubjectRequest {
        SubjectRequest {
            name: name.into(),
            code: code.map(Into::into),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_code_taken_is_case_insensitive() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = storage
            .create_subject_impl(subject("Matematika", Some("MTK")))
            .await
            .unwrap();

        assert!(storage.subject_code_taken_impl("mtk", None).await.unwrap());
        assert!(!storage.subject_code_taken_impl("MTK", Some(math.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_counts_assigned_staff() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let math = storage
            .create_subject_impl(subject("Matematika", Some("MTK")))
            .await
            .unwrap();
        storage
            .create_subject_impl(subject("Biologi", None))
            .await
            .unwrap();
        let a = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let b = create_staff(&storage, "Tono", "Guru", "Akademik").await;
        storage
            .sync_subject_staff_impl(math.id, &[a.id, b.id])
            .await
            .unwrap();

        let result = storage
            .list_subjects_with_pagination_impl(SubjectListParams {
                pagination: PaginationQuery::default(),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].subject.name, "Biologi");
        assert_eq!(result.items[0].staff_count, 0);
        assert_eq!(result.items[1].staff_count, 2);

        assert!(storage.remove_subject_staff_impl(math.id, a.id).await.unwrap());
        assert!(!storage.remove_subject_staff_impl(math.id, a.id).await.unwrap());
        let staff = storage.list_subject_staff_impl(math.id).await.unwrap();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].id, b.id);
    }
}
