use super::SeaOrmStorage;
use crate::entity::google_drive_tokens::{ActiveModel, Column, Entity as GoogleDriveTokens};
use crate::errors::{Result, SchoolSysError};
use crate::models::google_drive::{entities::GoogleDriveToken, requests::NewDriveToken};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 当前有效的令牌（最近更新的一条）
    pub async fn get_active_drive_token_impl(
        &self,
        service_name: &str,
    ) -> Result<Option<GoogleDriveToken>> {
        let result = GoogleDriveTokens::find()
            .filter(Column::ServiceName.eq(service_name))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询 Drive 令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_token()))
    }

    /// 写入令牌；已有有效令牌时原地更新，未提供 refresh token 时保留旧值
    pub async fn save_drive_token_impl(
        &self,
        service_name: &str,
        token: NewDriveToken,
    ) -> Result<GoogleDriveToken> {
        let now = chrono::Utc::now().timestamp();
        let existing = GoogleDriveTokens::find()
            .filter(Column::ServiceName.eq(service_name))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询 Drive 令牌失败: {e}")))?;

        let token_data = token.token_data.map(|v| v.to_string());
        let expires_at = token.expires_at.map(|t| t.timestamp());

        let result = match existing {
            Some(current) => {
                let refresh_token = token.refresh_token.or(current.refresh_token.clone());
                let mut model: ActiveModel = current.into();
                model.access_token = Set(token.access_token);
                model.refresh_token = Set(refresh_token);
                model.expires_at = Set(expires_at);
                model.token_data = Set(token_data);
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                ActiveModel {
                    service_name: Set(service_name.to_string()),
                    access_token: Set(token.access_token),
                    refresh_token: Set(token.refresh_token),
                    expires_at: Set(expires_at),
                    token_data: Set(token_data),
                    is_active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| SchoolSysError::database_operation(format!("保存 Drive 令牌失败: {e}")))?;

        Ok(result.into_token())
    }

    pub async fn deactivate_drive_token_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = GoogleDriveTokens::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询 Drive 令牌失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.is_active = Set(false);
        model.updated_at = Set(chrono::Utc::now().timestamp());
        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("停用 Drive 令牌失败: {e}")))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::google_drive::entities::DRIVE_SERVICE_NAME;

    fn token(access: &str, refresh: Option<&str>) -> NewDriveToken {
        NewDriveToken {
            access_token: access.into(),
            refresh_token: refresh.map(Into::into),
            expires_at: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
            token_data: Some(serde_json::json!({"scope": "drive"})),
        }
    }

    #[tokio::test]
    async fn test_save_keeps_previous_refresh_token() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let first = storage
            .save_drive_token_impl(DRIVE_SERVICE_NAME, token("access-1", Some("refresh-1")))
            .await
            .unwrap();
        let second = storage
            .save_drive_token_impl(DRIVE_SERVICE_NAME, token("access-2", None))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.access_token, "access-2");
        assert_eq!(second.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_deactivated_token_is_not_active() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let saved = storage
            .save_drive_token_impl(DRIVE_SERVICE_NAME, token("access", Some("refresh")))
            .await
            .unwrap();
        assert!(storage.deactivate_drive_token_impl(saved.id).await.unwrap());
        assert!(
            storage
                .get_active_drive_token_impl(DRIVE_SERVICE_NAME)
                .await
                .unwrap()
                .is_none()
        );
    }
}
