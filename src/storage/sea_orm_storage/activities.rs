use super::SeaOrmStorage;
use crate::entity::user_activities::{ActiveModel, Column, Entity as UserActivities};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, SchoolSysError};
use crate::models::{
    activities::entities::{NewActivity, UserActivity},
    users::entities::User,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    pub async fn create_activity_impl(&self, activity: NewActivity) -> Result<UserActivity> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            user_id: Set(activity.user_id),
            activity_type: Set(activity.activity_type),
            description: Set(activity.description),
            ip_address: Set(activity.ip_address),
            user_agent: Set(activity.user_agent),
            metadata: Set(Some(activity.metadata.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("记录用户活动失败: {e}")))?;

        Ok(result.into_activity())
    }

    /// 指定类型的活动及其用户（最新在前）
    pub async fn list_activities_with_users_impl(
        &self,
        activity_types: &[&str],
        limit: Option<u64>,
    ) -> Result<Vec<(UserActivity, User)>> {
        let mut select = UserActivities::find()
            .filter(Column::ActivityType.is_in(activity_types.iter().copied()))
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询用户活动失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(activity, user)| Some((activity.into_activity(), user?.into_user())))
            .collect())
    }

    /// 删除指定类型范围内的活动
    pub async fn delete_activities_impl(&self, ids: &[i64], activity_types: &[&str]) -> Result<u64> {
        let result = UserActivities::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .filter(Column::ActivityType.is_in(activity_types.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除用户活动失败: {e}")))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::{ACTIVITY_LOGIN, SESSION_ACTIVITY_TYPES};
    use crate::models::users::{entities::UserRole, requests::NewUser};

    #[tokio::test]
    async fn test_list_and_delete_session_activities() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user_impl(NewUser {
                name: "Admin".into(),
                email: "admin@school.sch.id".into(),
                password_hash: "hash".into(),
                role: UserRole::Headmaster,
            })
            .await
            .unwrap();

        let login = storage
            .create_activity_impl(NewActivity {
                user_id: user.id,
                activity_type: ACTIVITY_LOGIN.into(),
                description: "User logged in".into(),
                ip_address: Some("127.0.0.1".into()),
                user_agent: None,
                metadata: serde_json::json!({"browser": "Firefox", "platform": "Linux"}),
            })
            .await
            .unwrap();
        let other = storage
            .create_activity_impl(NewActivity {
                user_id: user.id,
                activity_type: "profile_update".into(),
                description: "Profile updated".into(),
                ip_address: None,
                user_agent: None,
                metadata: serde_json::Value::Null,
            })
            .await
            .unwrap();

        let rows = storage
            .list_activities_with_users_impl(&SESSION_ACTIVITY_TYPES, None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.email, "admin@school.sch.id");
        assert_eq!(rows[0].0.metadata["browser"], "Firefox");

        let deleted = storage
            .delete_activities_impl(&[login.id, other.id], &SESSION_ACTIVITY_TYPES)
            .await
            .unwrap();
        assert_eq!(deleted, 1);
    }
}
