use super::SeaOrmStorage;
use crate::entity::galleries::{ActiveModel, Column, Entity as Galleries, Model};
use crate::entity::gallery_items::{
    ActiveModel as ItemActiveModel, Column as ItemColumn, Entity as GalleryItems,
};
use crate::errors::{Result, SchoolSysError};
use crate::models::galleries::{
    entities::{Gallery, GalleryItem},
    requests::{GalleryChanges, GalleryItemData, GalleryItemPlan, GalleryListParams, GalleryOrder},
    responses::{GalleryListResponse, GalleryWithCount},
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use std::collections::HashMap;

const GALLERIES_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn item_model(gallery_id: i64, data: GalleryItemData, now: i64) -> ItemActiveModel {
    ItemActiveModel {
        gallery_id: Set(gallery_id),
        title: Set(optional_text(data.title)),
        caption: Set(optional_text(data.caption)),
        mime_type: Set(data.mime_type),
        file_path: Set(data.file_path),
        metadata: Set(data.metadata.map(|m| m.to_string())),
        sort_order: Set(data.sort_order),
        is_featured: Set(data.is_featured),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn display_order(select: Select<Galleries>) -> Select<Galleries> {
    select
        .order_by_asc(Column::SortOrder)
        .order_by_desc(Column::CreatedAt)
}

async fn insert_items<C: ConnectionTrait>(
    conn: &C,
    gallery_id: i64,
    items: Vec<GalleryItemData>,
) -> std::result::Result<(), sea_orm::DbErr> {
    if items.is_empty() {
        return Ok(());
    }
    let now = chrono::Utc::now().timestamp();
    let rows: Vec<ItemActiveModel> = items
        .into_iter()
        .map(|data| {
            let mut model = item_model(gallery_id, data, now);
            model.created_at = Set(now);
            model
        })
        .collect();
    GalleryItems::insert_many(rows).exec(conn).await?;
    Ok(())
}

impl SeaOrmStorage {
    async fn with_item_counts(&self, galleries: Vec<Model>) -> Result<Vec<GalleryWithCount>> {
        let ids: Vec<i64> = galleries.iter().map(|g| g.id).collect();
        let counts = self
            .count_grouped::<GalleryItems, _>(ItemColumn::GalleryId, &ids)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("统计相册条目失败: {e}")))?;

        Ok(galleries
            .into_iter()
            .map(|m| GalleryWithCount {
                items_count: counts.get(&m.id).copied().unwrap_or(0),
                gallery: m.into_gallery(),
            })
            .collect())
    }

    /// 后台相册列表
    pub async fn list_galleries_with_pagination_impl(
        &self,
        query: GalleryListParams,
    ) -> Result<GalleryListResponse> {
        let mut select = Galleries::find();
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Title, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }
        if let Some(status) = query.status {
            select = select.filter(Column::IsPublished.eq(status.is_published()));
        }

        let (galleries, pagination) = self
            .fetch_page(
                display_order(select),
                query.pagination.page(),
                query.pagination.per_page(GALLERIES_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册列表失败: {e}")))?;

        Ok(GalleryListResponse {
            items: self.with_item_counts(galleries).await?,
            pagination,
        })
    }

    pub async fn list_published_galleries_impl(
        &self,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<GalleryListResponse> {
        let mut select = Galleries::find().filter(Column::IsPublished.eq(true));
        if let Some(term) = search_term(search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Title, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }

        let (galleries, pagination) = self
            .fetch_page(display_order(select), page, size)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册列表失败: {e}")))?;

        Ok(GalleryListResponse {
            items: self.with_item_counts(galleries).await?,
            pagination,
        })
    }

    pub async fn latest_published_galleries_impl(
        &self,
        exclude_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Gallery>> {
        let mut select = Galleries::find().filter(Column::IsPublished.eq(true));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let galleries = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询最新相册失败: {e}")))?;

        Ok(galleries.into_iter().map(|m| m.into_gallery()).collect())
    }

    pub async fn get_gallery_by_id_impl(&self, id: i64) -> Result<Option<Gallery>> {
        let result = Galleries::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册失败: {e}")))?;

        Ok(result.map(|m| m.into_gallery()))
    }

    pub async fn get_gallery_by_slug_impl(&self, slug: &str) -> Result<Option<Gallery>> {
        let result = Galleries::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册失败: {e}")))?;

        Ok(result.map(|m| m.into_gallery()))
    }

    pub async fn gallery_slug_exists_impl(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Galleries::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查 slug 失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn max_gallery_sort_order_impl(&self) -> Result<Option<i32>> {
        let max: Option<Option<i32>> = Galleries::find()
            .select_only()
            .column_as(Expr::expr(Func::max(Expr::col(Column::SortOrder))), "max_order")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询排序失败: {e}")))?;

        Ok(max.flatten())
    }

    /// 创建相册及其条目
    pub async fn create_gallery_impl(
        &self,
        changes: GalleryChanges,
        items: Vec<GalleryItemData>,
    ) -> Result<Gallery> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            title: Set(changes.title.trim().to_string()),
            slug: Set(changes.slug),
            description: Set(optional_text(changes.description)),
            featured_image: Set(optional_text(changes.featured_image)),
            is_published: Set(changes.is_published),
            sort_order: Set(changes.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let gallery = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建相册失败: {e}")))?;
        insert_items(&txn, gallery.id, items)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建相册条目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(gallery.into_gallery())
    }

    /// 更新相册并应用条目变更计划
    pub async fn update_gallery_impl(
        &self,
        id: i64,
        changes: GalleryChanges,
        plan: GalleryItemPlan,
    ) -> Result<Option<Gallery>> {
        if self.get_gallery_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let gallery = ActiveModel {
            id: Set(id),
            title: Set(changes.title.trim().to_string()),
            slug: Set(changes.slug),
            description: Set(optional_text(changes.description)),
            featured_image: Set(optional_text(changes.featured_image)),
            is_published: Set(changes.is_published),
            sort_order: Set(changes.sort_order),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| SchoolSysError::database_operation(format!("更新相册失败: {e}")))?;

        if !plan.deletes.is_empty() {
            GalleryItems::delete_many()
                .filter(ItemColumn::GalleryId.eq(id))
                .filter(ItemColumn::Id.is_in(plan.deletes))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("删除相册条目失败: {e}")))?;
        }
        for (item_id, data) in plan.updates {
            let mut model = item_model(id, data, now);
            model.id = Set(item_id);
            model
                .update(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("更新相册条目失败: {e}")))?;
        }
        insert_items(&txn, id, plan.creates)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建相册条目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(gallery.into_gallery()))
    }

    pub async fn delete_gallery_impl(&self, id: i64) -> Result<bool> {
        let result = Galleries::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除相册失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_gallery_published_impl(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<Gallery>> {
        let Some(existing) = Galleries::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.is_published = Set(is_published);
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新发布状态失败: {e}")))?;

        Ok(Some(result.into_gallery()))
    }

    pub async fn set_gallery_featured_image_impl(&self, id: i64, image: Option<String>) -> Result<bool> {
        let result = Galleries::update_many()
            .col_expr(Column::FeaturedImage, Expr::value(image))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新封面失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量调整排序
    pub async fn reorder_galleries_impl(&self, orders: &[GalleryOrder]) -> Result<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("开启事务失败: {e}")))?;

        let mut updated = 0;
        for order in orders {
            let result = Galleries::update_many()
                .col_expr(Column::SortOrder, Expr::value(order.sort_order))
                .filter(Column::Id.eq(order.id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("更新排序失败: {e}")))?;
            updated += result.rows_affected;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated)
    }

    pub async fn list_gallery_items_impl(&self, gallery_id: i64) -> Result<Vec<GalleryItem>> {
        let items = GalleryItems::find()
            .filter(ItemColumn::GalleryId.eq(gallery_id))
            .order_by_asc(ItemColumn::SortOrder)
            .order_by_asc(ItemColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册条目失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_gallery_item()).collect())
    }

    pub async fn list_gallery_items_for_impl(
        &self,
        gallery_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<GalleryItem>>> {
        if gallery_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let items = GalleryItems::find()
            .filter(ItemColumn::GalleryId.is_in(gallery_ids.iter().copied()))
            .order_by_asc(ItemColumn::SortOrder)
            .order_by_asc(ItemColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册条目失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<GalleryItem>> = HashMap::new();
        for item in items {
            grouped
                .entry(item.gallery_id)
                .or_default()
                .push(item.into_gallery_item());
        }
        Ok(grouped)
    }

    pub async fn get_gallery_item_impl(
        &self,
        gallery_id: i64,
        item_id: i64,
    ) -> Result<Option<GalleryItem>> {
        let item = GalleryItems::find_by_id(item_id)
            .filter(ItemColumn::GalleryId.eq(gallery_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询相册条目失败: {e}")))?;

        Ok(item.map(|m| m.into_gallery_item()))
    }



    pub async fn delete_gallery_item_impl(&self, item_id: i64) -> Result<bool> {
        let result = GalleryItems::delete_by_id(item_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除相册条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_gallery_item_featured_impl(&self, item_id: i64, is_featured: bool) -> Result<bool> {
        let result = GalleryItems::update_many()
            .col_expr(ItemColumn::IsFeatured, Expr::value(is_featured))
            .col_expr(ItemColumn::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(ItemColumn::Id.eq(item_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新相册条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear_gallery_item_file_impl(&self, item_id: i64) -> Result<bool> {
        let result = GalleryItems::update_many()
            .col_expr(ItemColumn::FilePath, Expr::value(Option::<String>::None))
            .col_expr(ItemColumn::MimeType, Expr::value(Option::<String>::None))
            .col_expr(ItemColumn::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(ItemColumn::Id.eq(item_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("清除条目文件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;

    fn changes(title: &str, sort_order: i32) -> GalleryChanges {
        GalleryChanges {
            title: title.into(),
            slug: crate::utils::slug::slugify(title),
            description: None,
            featured_image: None,
            is_published: true,
            sort_order,
        }
    }

    fn item(path: &str, sort_order: i32) -> GalleryItemData {
        GalleryItemData {
            title: None,
            caption: None,
            mime_type: Some("image/jpeg".into()),
            file_path: Some(path.into()),
            metadata: Some(serde_json::json!({"size": 1024})),
            sort_order,
            is_featured: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_apply_item_plan() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let gallery = storage
            .create_gallery_impl(changes("Pentas Seni", 1), vec![item("a", 0), item("b", 1)])
            .await
            .unwrap();
        let items = storage.list_gallery_items_impl(gallery.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].metadata, Some(serde_json::json!({"size": 1024})));

        let plan = GalleryItemPlan {
            updates: vec![(items[1].id, item("b2", 0))],
            creates: vec![item("c", 1)],
            deletes: vec![items[0].id],
            drive_deletions: vec![],
        };
        storage
            .update_gallery_impl(gallery.id, changes("Pentas Seni", 1), plan)
            .await
            .unwrap()
            .unwrap();

        let paths: Vec<_> = storage
            .list_gallery_items_impl(gallery.id)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|i| i.file_path)
            .collect();
        assert_eq!(paths, vec!["b2".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn test_ordering_and_max_sort_order() {
        let storage = SeaOrmStorage::new_in_memory().await;
        assert_eq!(storage.max_gallery_sort_order_impl().await.unwrap(), None);
        let first = storage
            .create_gallery_impl(changes("Kedua", 2), vec![])
            .await
            .unwrap();
        storage
            .create_gallery_impl(changes("Pertama", 1), vec![])
            .await
            .unwrap();
        assert_eq!(storage.max_gallery_sort_order_impl().await.unwrap(), Some(2));

        let list = storage
            .list_galleries_with_pagination_impl(GalleryListParams {
                pagination: PaginationQuery::default(),
                search: None,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(list.items[0].gallery.title, "Pertama");

        storage
            .reorder_galleries_impl(&[GalleryOrder {
                id: first.id,
                sort_order: 0,
            }])
            .await
            .unwrap();
        let list = storage.list_published_galleries_impl(None, 1, 12).await.unwrap();
        assert_eq!(list.items[0].gallery.title, "Kedua");
    }
}
