use super::SeaOrmStorage;
use crate::entity::school_classes::{ActiveModel, Column, Entity as SchoolClasses};
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolSysError};
use crate::models::classes::{
    entities::{SchoolClass, class_name},
    requests::{ClassQueryParams, ClassRequest},
    responses::{ClassListResponse, ClassStatistics, ClassSummary},
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

const CLASSES_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    /// 分页列出班级（含人数与班主任）
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassQueryParams,
    ) -> Result<ClassListResponse> {
        let mut select = SchoolClasses::find();

        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }
        if let Some(grade) = query.grade_level.as_deref().filter(|g| !g.is_empty()) {
            select = select.filter(Column::GradeLevel.eq(grade));
        }

        let (classes, pagination) = self
            .fetch_page(
                select
                    .order_by_asc(Column::GradeLevel)
                    .order_by_asc(Column::ClassSection),
                query.pagination.page(),
                query.pagination.per_page(CLASSES_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班级列表失败: {e}")))?;

        let counts = self.count_students_by_class_impl().await?;
        let mut teachers: HashMap<String, _> = self
            .list_homeroom_teachers_impl()
            .await?
            .into_iter()
            .filter_map(|t| t.homeroom_class.clone().map(|c| (c, t)))
            .collect();

        Ok(ClassListResponse {
            items: classes
                .into_iter()
                .map(|m| {
                    let count = counts.get(&m.name).copied().unwrap_or(0);
                    let teacher = teachers.remove(&m.name);
                    ClassSummary::new(m.into_school_class(), count, teacher)
                })
                .collect(),
            pagination,
        })
    }

    /// 班级列表，可按年级筛选
    pub async fn list_classes_impl(&self, grade_level: Option<String>) -> Result<Vec<SchoolClass>> {
        let mut select = SchoolClasses::find();
        if let Some(grade) = grade_level.filter(|g| !g.is_empty()) {
            select = select.filter(Column::GradeLevel.eq(grade));
        }
        let classes = select
            .order_by_asc(Column::GradeLevel)
            .order_by_asc(Column::ClassSection)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_school_class()).collect())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<SchoolClass>> {
        let result = SchoolClasses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_school_class()))
    }

    pub async fn get_class_by_name_impl(&self, name: &str) -> Result<Option<SchoolClass>> {
        let result = SchoolClasses::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_school_class()))
    }

    pub async fn create_class_impl(&self, req: ClassRequest) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(class_name(&req.grade_level, &req.class_section)),
            grade_level: Set(req.grade_level.trim().to_string()),
            class_section: Set(req.class_section.trim().to_string()),
            description: Set(optional_text(req.description)),
            capacity: Set(req.capacity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_school_class())
    }

    /// 更新班级；改名时同步学生与班主任的班级名称
    pub async fn update_class_impl(&self, id: i64, req: ClassRequest) -> Result<Option<SchoolClass>> {
        let Some(existing) = self.get_class_by_id_impl(id).await? else {
            return Ok(None);
        };
        let new_name = class_name(&req.grade_level, &req.class_section);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(id),
            name: Set(new_name.clone()),
            grade_level: Set(req.grade_level.trim().to_string()),
            class_section: Set(req.class_section.trim().to_string()),
            description: Set(optional_text(req.description)),
            capacity: Set(req.capacity),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let result = model
            .update(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新班级失败: {e}")))?;

        if existing.name != new_name {
            Students::update_many()
                .col_expr(StudentColumn::Class, Expr::value(new_name.clone()))
                .filter(StudentColumn::Class.eq(existing.name.as_str()))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("更新学生班级失败: {e}")))?;
            StaffEntity::update_many()
                .col_expr(StaffColumn::HomeroomClass, Expr::value(new_name))
                .filter(StaffColumn::HomeroomClass.eq(existing.name.as_str()))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("更新班主任班级失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(result.into_school_class()))
    }

    /// 删除班级并清除班主任分配
    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = self.get_class_by_id_impl(id).await? else {
            return Ok(false);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        StaffEntity::update_many()
            .col_expr(StaffColumn::HomeroomClass, Expr::value(Option::<String>::None))
            .filter(StaffColumn::HomeroomClass.eq(existing.name.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("清除班主任失败: {e}")))?;
        let result = SchoolClasses::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn class_statistics_impl(&self) -> Result<ClassStatistics> {
        let classes = self.list_classes_impl(None).await?;
        let teachers = self.list_homeroom_teachers_impl().await?;
        let total_students = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计学生失败: {e}")))?;

        let classes_with_teachers = classes
            .iter()
            .filter(|c| {
                teachers
                    .iter()
                    .any(|t| t.homeroom_class.as_deref() == Some(c.name.as_str()))
            })
            .count();

        Ok(ClassStatistics {
            total_classes: classes.len() as i64,
            classes_with_teachers: classes_with_teachers as i64,
            total_capacity: classes.iter().map(|c| c.capacity as i64).sum(),
            total_students: total_students as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    fn request(grade: &str, section: &str) -> ClassRequest {
        ClassRequest {
            grade_level: grade.into(),
            class_section: section.into(),
            description: None,
            capacity: 30,
        }
    }

    #[tokio::test]
    async fn test_rename_cascades_to_students_and_homeroom() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = storage.create_class_impl(request("7", "A")).await.unwrap();
        assert_eq!(class.name, "7A");
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        storage.assign_homeroom_impl(teacher.id, "7A").await.unwrap();
        let student = storage
            .create_student_impl(student_request("100", "Sari", "7A"), None)
            .await
            .unwrap();

        let renamed = storage
            .update_class_impl(class.id, request("7", "B"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "7B");

        let student = storage.get_student_by_id_impl(student.id).await.unwrap().unwrap();
        assert_eq!(student.class, "7B");
        let teacher = storage.get_staff_by_id_impl(teacher.id).await.unwrap().unwrap();
        assert_eq!(teacher.homeroom_class.as_deref(), Some("7B"));
    }

    #[tokio::test]
    async fn test_delete_clears_homeroom_and_stats() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = storage.create_class_impl(request("8", "C")).await.unwrap();
        storage.create_class_impl(request("9", "A")).await.unwrap();
        let teacher = create_staff(&storage, "Tono", "Guru", "Akademik").await;
        storage.assign_homeroom_impl(teacher.id, "8C").await.unwrap();

        let stats = storage.class_statistics_impl().await.unwrap();
        assert_eq!(stats.total_classes, 2);
        assert_eq!(stats.classes_with_teachers, 1);
        assert_eq!(stats.total_capacity, 60);

        assert!(storage.delete_class_impl(class.id).await.unwrap());
        let teacher = storage.get_staff_by_id_impl(teacher.id).await.unwrap().unwrap();
        assert_eq!(teacher.homeroom_class, None);
    }
}
