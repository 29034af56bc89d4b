use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolSysError};
use crate::models::users::{
    entities::{User, UserStatus},
    requests::{NewUser, UserChanges, UserListParams},
    responses::UserListResponse,
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

const USERS_PER_PAGE: u64 = 10;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email.to_lowercase()),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户（邮箱统一小写存储）
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListParams,
    ) -> Result<UserListResponse> {
        let mut select = Users::find();

        // 搜索条件
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Email, &term)),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let (users, pagination) = self
            .fetch_page(
                select.order_by_desc(Column::CreatedAt),
                query.pagination.page(),
                query.pagination.per_page(USERS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SchoolSysError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, update: UserChanges) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            name: Set(update.name),
            email: Set(update.email.to_lowercase()),
            role: Set(update.role.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量删除用户
    pub async fn delete_users_impl(&self, ids: &[i64]) -> Result<u64> {
        let result = Users::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("批量删除用户失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 统计给定 ID 中实际存在的用户
    pub async fn count_existing_users_impl(&self, ids: &[i64]) -> Result<u64> {
        Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计用户失败: {e}")))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::models::users::entities::UserRole;

    fn new_user(name: &str, email: &str, role: UserRole) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            password_hash: "$argon2id$placeholder".into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_email_is_stored_lowercase() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user_impl(new_user("Admin", "Admin@School.SCH.ID", UserRole::SuperAdmin))
            .await
            .unwrap();
        assert_eq!(user.email, "admin@school.sch.id");
        assert_eq!(user.status, UserStatus::Active);

        let found = storage
            .get_user_by_email_impl(" ADMIN@school.sch.id ")
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_list_filters_by_role_and_search() {
        let storage = SeaOrmStorage::new_in_memory().await;
        for (name, email, role) in [
            ("Budi Santoso", "budi@school.sch.id", UserRole::Teacher),
            ("Sri Wahyuni", "sri@school.sch.id", UserRole::Teacher),
            ("Kepala", "kepala@school.sch.id", UserRole::Headmaster),
        ] {
            storage
                .create_user_impl(new_user(name, email, role))
                .await
                .unwrap();
        }

        let teachers = storage
            .list_users_with_pagination_impl(UserListParams {
                pagination: PaginationQuery::default(),
                role: Some(UserRole::Teacher),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(teachers.pagination.total, 2);

        let search = storage
            .list_users_with_pagination_impl(UserListParams {
                pagination: PaginationQuery::default(),
                role: None,
                search: Some("BUDI".into()),
            })
            .await
            .unwrap();
        assert_eq!(search.items.len(), 1);
        assert_eq!(search.items[0].name, "Budi Santoso");
    }

    #[tokio::test]
    async fn test_bulk_delete_counts_existing_only() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let a = storage
            .create_user_impl(new_user("A", "a@school.sch.id", UserRole::Teacher))
            .await
            .unwrap();
        let b = storage
            .create_user_impl(new_user("B", "b@school.sch.id", UserRole::Teacher))
            .await
            .unwrap();

        assert_eq!(
            storage.count_existing_users_impl(&[a.id, b.id, 999]).await.unwrap(),
            2
        );
        assert_eq!(storage.delete_users_impl(&[a.id, 999]).await.unwrap(), 1);
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }
}
