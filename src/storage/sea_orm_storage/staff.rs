//! 教职工与职务履历存储操作

use super::SeaOrmStorage;
use crate::entity::position_histories::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as PositionHistories,
};
use crate::entity::staff::{ActiveModel, Column, Entity as StaffEntity};
use crate::entity::staff_subjects::{
    ActiveModel as StaffSubjectActiveModel, Column as StaffSubjectColumn, Entity as StaffSubjects,
};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teacher_subject_works::{
    Column as WorkColumn, Entity as TeacherSubjectWorks,
};
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    PaginatedResponse,
    staff::{
        entities::{PositionHistory, Staff, StaffDivision},
        requests::{PositionHistoryRequest, StaffListParams, StaffRequest},
        responses::StaffListResponse,
    },
    subjects::{entities::Subject, responses::TeacherAssignment},
};
use crate::utils::sql::{contains_ci, equals_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

const STAFF_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 学术部门任课教师：职务包含 guru/teacher 且部门为 Akademik
pub(super) fn academic_teacher_condition() -> Condition {
    Condition::all()
        .add(
            Condition::any()
                .add(contains_ci(Column::Position, "guru"))
                .add(contains_ci(Column::Position, "teacher")),
        )
        .add(equals_ci(Column::Division, StaffDivision::ACADEMIC))
}

/// 同步 staff_subjects，移除的关联同时删除对应的教学文档目录记录
pub(super) async fn sync_pairs<C: ConnectionTrait>(
    conn: &C,
    staff_id: i64,
    current: &HashSet<i64>,
    wanted: &HashSet<i64>,
) -> std::result::Result<(), sea_orm::DbErr> {
    let removed: Vec<i64> = current.difference(wanted).copied().collect();
    if !removed.is_empty() {
        StaffSubjects::delete_many()
            .filter(StaffSubjectColumn::StaffId.eq(staff_id))
            .filter(StaffSubjectColumn::SubjectId.is_in(removed.clone()))
            .exec(conn)
            .await?;
        TeacherSubjectWorks::delete_many()
            .filter(WorkColumn::StaffId.eq(staff_id))
            .filter(WorkColumn::SubjectId.is_in(removed))
            .exec(conn)
            .await?;
    }

    let now = chrono::Utc::now().timestamp();
    let added: Vec<StaffSubjectActiveModel> = wanted
        .difference(current)
        .map(|subject_id| StaffSubjectActiveModel {
            staff_id: Set(staff_id),
            subject_id: Set(*subject_id),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();
    if !added.is_empty() {
        StaffSubjects::insert_many(added).exec(conn).await?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 分页列出教职工（按姓名排序）
    pub async fn list_staff_with_pagination_impl(
        &self,
        query: StaffListParams,
        divisions: Vec<String>,
    ) -> Result<StaffListResponse> {
        let mut select = StaffEntity::find();

        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Position, &term))
                    .add(contains_ci(Column::Division, &term))
                    .add(contains_ci(Column::Email, &term))
                    .add(contains_ci(Column::Phone, &term)),
            );
        }

        if !divisions.is_empty() {
            select = select.filter(Column::Division.is_in(divisions));
        }

        let (staff, pagination) = self
            .fetch_page(
                select.order_by_asc(Column::Name),
                query.pagination.page(),
                query.pagination.per_page(STAFF_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工列表失败: {e}")))?;

        Ok(StaffListResponse {
            items: staff.into_iter().map(|m| m.into_staff()).collect(),
            pagination,
        })
    }

    /// 全部教职工
    pub async fn list_all_staff_impl(&self) -> Result<Vec<Staff>> {
        let staff = StaffEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(staff.into_iter().map(|m| m.into_staff()).collect())
    }

    pub async fn get_staff_by_id_impl(&self, id: i64) -> Result<Option<Staff>> {
        let result = StaffEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    pub async fn get_staff_by_slug_impl(&self, slug: &str) -> Result<Option<Staff>> {
        let result = StaffEntity::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    /// 账号关联的教职工记录
    pub async fn get_staff_by_user_id_impl(&self, user_id: i64) -> Result<Option<Staff>> {
        let result = StaffEntity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    pub async fn list_staff_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Staff>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let staff = StaffEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(staff.into_iter().map(|m| m.into_staff()).collect())
    }

    pub async fn staff_email_taken_impl(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = StaffEntity::find().filter(equals_ci(Column::Email, email.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查邮箱失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn staff_slug_exists_impl(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = StaffEntity::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查 slug 失败: {e}")))?;

        Ok(count > 0)
    }

    /// 创建教职工
    pub async fn create_staff_impl(&self, req: StaffRequest, slug: String) -> Result<Staff> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            name: Set(req.name.trim().to_string()),
            slug: Set(slug),
            position: Set(req.position.trim().to_string()),
            division: Set(req.division),
            homeroom_class: Set(optional_text(req.homeroom_class)),
            photo: Set(optional_text(req.photo)),
            email: Set(Some(req.email.trim().to_lowercase())),
            phone: Set(optional_text(req.phone)),
            bio: Set(optional_text(req.bio)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建教职工失败: {e}")))?;

        Ok(result.into_staff())
    }

    /// 更新教职工
    pub async fn update_staff_impl(
        &self,
        id: i64,
        req: StaffRequest,
        slug: String,
    ) -> Result<Option<Staff>> {
        if self.get_staff_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            user_id: Set(req.user_id),
            name: Set(req.name.trim().to_string()),
            slug: Set(slug),
            position: Set(req.position.trim().to_string()),
            division: Set(req.division),
            homeroom_class: Set(optional_text(req.homeroom_class)),
            photo: Set(optional_text(req.photo)),
            email: Set(Some(req.email.trim().to_lowercase())),
            phone: Set(optional_text(req.phone)),
            bio: Set(optional_text(req.bio)),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新教职工失败: {e}")))?;

        Ok(Some(result.into_staff()))
    }

    pub async fn delete_staff_impl(&self, id: i64) -> Result<bool> {
        let result = StaffEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除教职工失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_staff_many_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = StaffEntity::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("批量删除教职工失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 教职工任教科目
    pub async fn list_staff_subjects_impl(&self, staff_id: i64) -> Result<Vec<Subject>> {
        let Some(staff) = StaffEntity::find_by_id(staff_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教职工失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let subjects = staff
            .find_related(Subjects)
            .order_by_asc(SubjectColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询任教科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    async fn staff_subject_ids(&self, staff_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
        let rows = StaffSubjects::find()
            .filter(StaffSubjectColumn::StaffId.is_in(staff_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询任教科目失败: {e}")))?;

        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            map.entry(row.staff_id).or_default().push(row.subject_id);
        }
        for ids in map.values_mut() {
            ids.sort_unstable();
        }
        Ok(map)
    }

    /// 同步任教科目
    pub async fn sync_staff_subjects_impl(&self, staff_id: i64, subject_ids: &[i64]) -> Result<()> {
        let current: HashSet<i64> = self
            .staff_subject_ids(&[staff_id])
            .await?
            .remove(&staff_id)
            .unwrap_or_default()
            .into_iter()
            .collect();
        let wanted: HashSet<i64> = subject_ids.iter().copied().collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;
        sync_pairs(&txn, staff_id, &current, &wanted)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("同步任教科目失败: {e}")))?;
        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 移除单个任教科目
    pub async fn remove_staff_subject_impl(&self, staff_id: i64, subject_id: i64) -> Result<bool> {
        let current: HashSet<i64> = self
            .staff_subject_ids(&[staff_id])
            .await?
            .remove(&staff_id)
            .unwrap_or_default()
            .into_iter()
            .collect();
        if !current.contains(&subject_id) {
            return Ok(false);
        }
        let mut wanted = current.clone();
        wanted.remove(&subject_id);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;
        sync_pairs(&txn, staff_id, &current, &wanted)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("移除任教科目失败: {e}")))?;
        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 可分配科目的教师（分页）
    pub async fn list_eligible_teachers_impl(
        &self,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<TeacherAssignment>> {
        let mut select = StaffEntity::find().filter(academic_teacher_condition());
        if let Some(term) = search_term(search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Position, &term)),
            );
        }

        let (staff, pagination) = self
            .fetch_page(select.order_by_asc(Column::Name), page, size)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询教师列表失败: {e}")))?;

        let ids: Vec<i64> = staff.iter().map(|s| s.id).collect();
        let mut subject_ids = self.staff_subject_ids(&ids).await?;

        Ok(PaginatedResponse {
            items: staff
                .into_iter()
                .map(|m| TeacherAssignment {
                    subject_ids: subject_ids.remove(&m.id).unwrap_or_default(),
                    staff: m.into_staff(),
                })
                .collect(),
            pagination,
        })
    }

    /// 职务履历（按开始年份倒序）
    pub async fn list_position_history_impl(&self, staff_id: i64) -> Result<Vec<PositionHistory>> {
        let rows = PositionHistories::find()
            .filter(HistoryColumn::StaffId.eq(staff_id))
            .order_by_desc(HistoryColumn::StartYear)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询职务履历失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_position_history()).collect())
    }

    pub async fn get_position_history_impl(&self, id: i64) -> Result<Option<PositionHistory>> {
        let result = PositionHistories::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询职务履历失败: {e}")))?;

        Ok(result.map(|m| m.into_position_history()))
    }

    pub async fn create_position_history_impl(
        &self,
        req: PositionHistoryRequest,
    ) -> Result<PositionHistory> {
        let now = chrono::Utc::now().timestamp();
        let model = HistoryActiveModel {
            staff_id: Set(req.staff_id),
            title: Set(req.title.trim().to_string()),
            start_year: Set(req.start_year),
            end_year: Set(req.end_year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建职务履历失败: {e}")))?;

        Ok(result.into_position_history())
    }

    pub async fn update_position_history_impl(
        &self,
        id: i64,
        req: PositionHistoryRequest,
    ) -> Result<Option<PositionHistory>> {
        if self.get_position_history_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = HistoryActiveModel {
            id: Set(id),
            staff_id: Set(req.staff_id),
            title: Set(req.title.trim().to_string()),
            start_year: Set(req.start_year),
            end_year: Set(req.end_year),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新职务履历失败: {e}")))?;

        Ok(Some(result.into_position_history()))
    }

    pub async fn delete_position_history_impl(&self, id: i64) -> Result<bool> {
        let result = PositionHistories::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除职务履历失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_position_histories_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = PositionHistories::delete_many()
            .filter(HistoryColumn::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSysError::database_operation(format!("批量删除职务履历失败: {e}"))
            })?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::models::subjects::requests::SubjectRequest;

    pub(crate) fn staff_request(name: &str, position: &str, division: &str) -> StaffRequest {
        StaffRequest {
            name: name.into(),
            position: position.into(),
            division: division.into(),
            email: format!("{}@school.sch.id", name.to_lowercase().replace(' ', ".")),
            phone: None,
            bio: None,
            photo: None,
            homeroom_class: None,
            user_id: None,
        }
    }

    pub(crate) async fn create_staff(
        storage: &SeaOrmStorage,
        name: &str,
        position: &str,
        division: &str,
    ) -> Staff {
        let slug = crate::utils::slug::slugify(name);
        storage
            .create_staff_impl(staff_request(name, position, division), slug)
            .await
            .unwrap()
    }

    async fn create_subject(storage: &SeaOrmStorage, name: &str) -> Subject {
        storage
            .create_subject_impl(SubjectRequest {
                name: name.into(),
                code: None,
                description: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_filters_division() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Rina Marlina", "Guru Matematika", "Akademik").await;
        create_staff(&storage, "Joko", "Staf TU", "Tata Usaha").await;

        let result = storage
            .list_staff_with_pagination_impl(
                StaffListParams {
                    pagination: PaginationQuery::default(),
                    search: Some("matematika".into()),
                    divisions: None,
                },
                Vec::new(),
            )
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Rina Marlina");

        let result = storage
            .list_staff_with_pagination_impl(
                StaffListParams {
                    pagination: PaginationQuery::default(),
                    search: None,
                    divisions: None,
                },
                vec!["Tata Usaha".into()],
            )
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_sync_subjects_removes_work_rows() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let math = create_subject(&storage, "Matematika").await;
        let science = create_subject(&storage, "IPA").await;
        let item = storage
            .create_work_item_impl("Prota", true, "admin")
            .await
            .unwrap();

        storage
            .sync_staff_subjects_impl(teacher.id, &[math.id, science.id])
            .await
            .unwrap();
        storage
            .upsert_teacher_subject_work_impl(teacher.id, math.id, item.id, "Prota", "folder-1")
            .await
            .unwrap();

        storage
            .sync_staff_subjects_impl(teacher.id, &[science.id])
            .await
            .unwrap();

        let subjects = storage.list_staff_subjects_impl(teacher.id).await.unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id, science.id);
        assert!(
            storage
                .list_works_for_staff_impl(teacher.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_eligible_teachers_exclude_non_academic() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Rina", "Guru Matematika", "Akademik").await;
        create_staff(&storage, "Tono", "English Teacher", "akademik").await;
        create_staff(&storage, "Joko", "Guru BK", "Tata Usaha").await;

        let result = storage.list_eligible_teachers_impl(None, 1, 10).await.unwrap();
        let names: Vec<_> = result.items.iter().map(|t| t.staff.name.as_str()).collect();
        assert_eq!(names, vec!["Rina", "Tono"]);
    }
}
