//! Google Drive OAuth 令牌实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "google_drive_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub service_name: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    // 原始令牌响应 JSON
    pub token_data: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_token(self) -> crate::models::google_drive::entities::GoogleDriveToken {
        crate::models::google_drive::entities::GoogleDriveToken {
            id: self.id,
            service_name: self.service_name,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.map(super::to_datetime),
            token_data: super::parse_json(self.token_data),
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
