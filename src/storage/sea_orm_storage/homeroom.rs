use super::SeaOrmStorage;
use crate::entity::staff::{Column as StaffColumn, Entity as StaffEntity};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolSysError};
use crate::models::staff::entities::Staff;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

impl SeaOrmStorage {
    /// 已担任班主任的教职工
    pub async fn list_homeroom_teachers_impl(&self) -> Result<Vec<Staff>> {
        let staff = StaffEntity::find()
            .filter(StaffColumn::HomeroomClass.is_not_null())
            .filter(StaffColumn::HomeroomClass.ne(""))
            .order_by_asc(StaffColumn::HomeroomClass)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班主任失败: {e}")))?;

        Ok(staff.into_iter().map(|m| m.into_staff()).collect())
    }

    pub async fn get_homeroom_teacher_for_class_impl(&self, class_name: &str) -> Result<Option<Staff>> {
        let staff = StaffEntity::find()
            .filter(StaffColumn::HomeroomClass.eq(class_name))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询班主任失败: {e}")))?;

        Ok(staff.map(|m| m.into_staff()))
    }

    /// 设置班主任，并将该班学生的班主任指向该教职工
    pub async fn assign_homeroom_impl(&self, staff_id: i64, class_name: &str) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        StaffEntity::update_many()
            .col_expr(StaffColumn::HomeroomClass, Expr::value(class_name.to_string()))
            .col_expr(StaffColumn::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(StaffColumn::Id.eq(staff_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("分配班主任失败: {e}")))?;
        let result = Students::update_many()
            .col_expr(StudentColumn::HomeroomTeacherId, Expr::value(staff_id))
            .filter(StudentColumn::Class.eq(class_name))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新学生班主任失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 取消班主任，并清除该班学生的班主任
    pub async fn remove_homeroom_impl(&self, staff_id: i64, class_name: &str) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        StaffEntity::update_many()
            .col_expr(StaffColumn::HomeroomClass, Expr::value(Option::<String>::None))
            .col_expr(StaffColumn::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(StaffColumn::Id.eq(staff_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("取消班主任失败: {e}")))?;
        let result = Students::update_many()
            .col_expr(StudentColumn::HomeroomTeacherId, Expr::value(Option::<i64>::None))
            .filter(StudentColumn::Class.eq(class_name))
            .filter(StudentColumn::HomeroomTeacherId.eq(staff_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新学生班主任失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected)
    }

    pub async fn set_class_homeroom_teacher_impl(&self, class_name: &str, staff_id: i64) -> Result<u64> {
        let result = Students::update_many()
            .col_expr(StudentColumn::HomeroomTeacherId, Expr::value(staff_id))
            .filter(StudentColumn::Class.eq(class_name))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新学生班主任失败: {e}")))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;
    use crate::storage::sea_orm_storage::students::tests::student_request;

    #[tokio::test]
    async fn test_assign_and_remove_updates_students() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = create_staff(&storage, "Rina", "Guru", "Akademik").await;
        let a = storage
            .create_student_impl(student_request("1", "Ani", "7A"), None)
            .await
            .unwrap();
        storage
            .create_student_impl(student_request("2", "Budi", "7B"), None)
            .await
            .unwrap();

        assert_eq!(storage.assign_homeroom_impl(teacher.id, "7A").await.unwrap(), 1);
        let student = storage.get_student_by_id_impl(a.id).await.unwrap().unwrap();
        assert_eq!(student.homeroom_teacher_id, Some(teacher.id));
        assert_eq!(
            storage
                .get_homeroom_teacher_for_class_impl("7A")
                .await
                .unwrap()
                .map(|t| t.id),
            Some(teacher.id)
        );

        assert_eq!(storage.remove_homeroom_impl(teacher.id, "7A").await.unwrap(), 1);
        assert!(storage.list_homeroom_teachers_impl().await.unwrap().is_empty());
        let student = storage.get_student_by_id_impl(a.id).await.unwrap().unwrap();
        assert_eq!(student.homeroom_teacher_id, None);
    }
}
