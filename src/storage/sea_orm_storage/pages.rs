use super::SeaOrmStorage;
use crate::entity::pages::{ActiveModel, Column, Entity as Pages};
use crate::errors::{Result, SchoolSysError};
use crate::models::pages::{
    entities::Page,
    requests::{PageListParams, PageRequest},
    responses::PageListResponse,
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

const PAGES_PER_PAGE: u64 = 15;

impl SeaOrmStorage {
    pub async fn list_pages_with_pagination_impl(
        &self,
        query: PageListParams,
    ) -> Result<PageListResponse> {
        let mut select = Pages::find();
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Title, &term))
                    .add(contains_ci(Column::Slug, &term))
                    .add(contains_ci(Column::Content, &term)),
            );
        }

        let (pages, pagination) = self
            .fetch_page(
                select.order_by_desc(Column::UpdatedAt),
                query.pagination.page(),
                query.pagination.per_page(PAGES_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询页面列表失败: {e}")))?;

        Ok(PageListResponse {
            items: pages.into_iter().map(|m| m.into_page()).collect(),
            pagination,
        })
    }

    pub async fn list_all_pages_impl(&self) -> Result<Vec<Page>> {
        let pages = Pages::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询页面失败: {e}")))?;

        Ok(pages.into_iter().map(|m| m.into_page()).collect())
    }

    pub async fn get_page_by_id_impl(&self, id: i64) -> Result<Option<Page>> {
        let result = Pages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询页面失败: {e}")))?;

        Ok(result.map(|m| m.into_page()))
    }

    pub async fn get_page_by_slug_impl(&self, slug: &str) -> Result<Option<Page>> {
        let result = Pages::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询页面失败: {e}")))?;

        Ok(result.map(|m| m.into_page()))
    }

    pub async fn page_slug_exists_impl(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Pages::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查 slug 失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_page_impl(&self, req: PageRequest, image: Option<String>) -> Result<Page> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            slug: Set(req.slug.trim().to_string()),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            image: Set(image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建页面失败: {e}")))?;

        Ok(result.into_page())
    }

    pub async fn update_page_impl(
        &self,
        id: i64,
        req: PageRequest,
        image: Option<String>,
    ) -> Result<Option<Page>> {
        if self.get_page_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            slug: Set(req.slug.trim().to_string()),
            title: Set(req.title.trim().to_string()),
            content: Set(req.content),
            image: Set(image),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新页面失败: {e}")))?;

        Ok(Some(result.into_page()))
    }

    pub async fn delete_page_impl(&self, id: i64) -> Result<bool> {
        let result = Pages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除页面失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_image() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let request = PageRequest {
            slug: "sejarah".into(),
            title: "Sejarah".into(),
            content: "Didirikan tahun 1965".into(),
            image: None,
            remove_image: false,
        };
        let page = storage
            .create_page_impl(request.clone(), Some("uploads/pages/a.jpg".into()))
            .await
            .unwrap();
        assert_eq!(page.image.as_deref(), Some("uploads/pages/a.jpg"));

        let page = storage
            .update_page_impl(page.id, request, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.image, None);
        assert!(storage.get_page_by_slug_impl("sejarah").await.unwrap().is_some());
        assert!(storage.page_slug_exists_impl("sejarah", None).await.unwrap());
    }
}
