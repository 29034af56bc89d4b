use super::SeaOrmStorage;
use crate::entity::contacts::{ActiveModel, Column, Entity as Contacts};
use crate::errors::{Result, SchoolSysError};
use crate::models::contacts::{
    entities::Contact,
    requests::{ContactListParams, ContactRequest},
    responses::ContactListResponse,
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

const CONTACTS_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    pub async fn list_contacts_with_pagination_impl(
        &self,
        query: ContactListParams,
    ) -> Result<ContactListResponse> {
        let mut select = Contacts::find();
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Email, &term))
                    .add(contains_ci(Column::Phone, &term))
                    .add(contains_ci(Column::Address, &term)),
            );
        }

        let (contacts, pagination) = self
            .fetch_page(
                select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id),
                query.pagination.page(),
                query.pagination.per_page(CONTACTS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询联系信息失败: {e}")))?;

        Ok(ContactListResponse {
            items: contacts.into_iter().map(|m| m.into_contact()).collect(),
            pagination,
        })
    }

    /// 最新一条联系信息（公开页面展示）
    pub async fn latest_contact_impl(&self) -> Result<Option<Contact>> {
        let result = Contacts::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询联系信息失败: {e}")))?;

        Ok(result.map(|m| m.into_contact()))
    }

    pub async fn get_contact_by_id_impl(&self, id: i64) -> Result<Option<Contact>> {
        let result = Contacts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询联系信息失败: {e}")))?;

        Ok(result.map(|m| m.into_contact()))
    }

    pub async fn create_contact_impl(&self, req: ContactRequest) -> Result<Contact> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            phone: Set(optional_text(req.phone)),
            address: Set(optional_text(req.address)),
            message: Set(req.message),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建联系信息失败: {e}")))?;

        Ok(result.into_contact())
    }

    pub async fn update_contact_impl(&self, id: i64, req: ContactRequest) -> Result<Option<Contact>> {
        if self.get_contact_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            phone: Set(optional_text(req.phone)),
            address: Set(optional_text(req.address)),
            message: Set(req.message),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新联系信息失败: {e}")))?;

        Ok(Some(result.into_contact()))
    }

    pub async fn delete_contact_impl(&self, id: i64) -> Result<bool> {
        let result = Contacts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除联系信息失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_contact_is_newest() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert!(storage.latest_contact_impl().await.unwrap().is_none());
        for name in ["SMP Lama", "SMP Baru"] {
            storage
                .create_contact_impl(ContactRequest {
                    name: name.into(),
                    email: "info@school.sch.id".into(),
                    phone: Some(" ".into()),
                    address: None,
                    message: "Jam kerja 07.00 - 15.00".into(),
                })
                .await
                .unwrap();
        }

        let latest = storage.latest_contact_impl().await.unwrap().unwrap();
        assert_eq!(latest.name, "SMP Baru");
        assert_eq!(latest.phone, None);
    }
}
