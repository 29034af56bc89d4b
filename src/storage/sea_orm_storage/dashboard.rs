use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{user_activities, users};
use crate::errors::{Result, SchoolSysError};
use crate::models::activities::entities::ACTIVITY_LOGIN;
use crate::models::dashboard::responses::DashboardMetrics;
use crate::models::users::entities::UserStatus;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    async fn count_all<E>(&self) -> Result<i64>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        E::find()
            .count(&self.db)
            .await
            .map(|n| n as i64)
            .map_err(|e| SchoolSysError::database_operation(format!("统计数据失败: {e}")))
    }

    /// 仪表盘统计；`login_since` 之后的登录次数计入 recent_login_count
    pub async fn dashboard_metrics_impl(&self, login_since: i64) -> Result<DashboardMetrics> {
        let active_users = Users::find()
            .filter(users::Column::Status.eq(UserStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计用户失败: {e}")))?;

        let users_by_role: Vec<(String, i64)> = Users::find()
            .select_only()
            .column(users::Column::Role)
            .column_as(Expr::expr(Func::count(Expr::col(users::Column::Id))), "count")
            .group_by(users::Column::Role)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计用户角色失败: {e}")))?;

        let recent_login_count = UserActivities::find()
            .filter(user_activities::Column::ActivityType.eq(ACTIVITY_LOGIN))
            .filter(user_activities::Column::CreatedAt.gte(login_since))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计登录次数失败: {e}")))?;

        Ok(DashboardMetrics {
            total_users: self.count_all::<Users>().await?,
            active_users: active_users as i64,
            users_by_role: users_by_role.into_iter().collect(),
            recent_login_count: recent_login_count as i64,
            total_staff: self.count_all::<Staff>().await?,
            total_students: self.count_all::<Students>().await?,
            total_classes: self.count_all::<SchoolClasses>().await?,
            total_subjects: self.count_all::<Subjects>().await?,
            total_posts: self.count_all::<Posts>().await?,
            total_galleries: self.count_all::<Galleries>().await?,
            total_extracurriculars: self.count_all::<Extracurriculars>().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    #[tokio::test]
    async fn test_metrics_count_tables() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Rina", "Guru", "Akademik").await;
        create_staff(&storage, "Joko", "Staf", "Tata Usaha").await;

        let metrics = storage.dashboard_metrics_impl(0).await.unwrap();
        assert_eq!(metrics.total_staff, 2);
        assert_eq!(metrics.total_students, 0);
        assert_eq!(metrics.total_users, 0);
        assert!(metrics.users_by_role.is_empty());
    }
}
