use super::SeaOrmStorage;
use crate::entity::posts::{ActiveModel, Column, Entity as Posts, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SchoolSysError};
use crate::models::posts::{
    entities::{Post, PostCategory},
    requests::{PostChanges, PostListParams},
    responses::{PostListResponse, PostWithAuthor},
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use std::collections::{HashMap, HashSet};

const POSTS_PER_PAGE: u64 = 15;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(contains_ci(Column::Title, term))
        .add(contains_ci(Column::Excerpt, term))
        .add(contains_ci(Column::Content, term))
}

fn latest_first(select: Select<Posts>) -> Select<Posts> {
    select
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
}

impl SeaOrmStorage {
    /// 附带作者名
    async fn with_authors(&self, posts: Vec<Model>) -> Result<Vec<PostWithAuthor>> {
        let user_ids: HashSet<i64> = posts.iter().filter_map(|p| p.user_id).collect();
        let names: HashMap<i64, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(user_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolSysError::database_operation(format!("查询作者失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|m| PostWithAuthor {
                author_name: m.user_id.and_then(|id| names.get(&id).cloned()),
                post: m.into_post(),
            })
            .collect())
    }

    /// 后台文章列表
    pub async fn list_posts_with_pagination_impl(
        &self,
        query: PostListParams,
    ) -> Result<PostListResponse> {
        let mut select = Posts::find();
        if let Some(category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(search_condition(&term));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::IsPublished.eq(status.is_published()));
        }

        let (posts, pagination) = self
            .fetch_page(
                latest_first(select),
                query.pagination.page(),
                query.pagination.per_page(POSTS_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章列表失败: {e}")))?;

        Ok(PostListResponse {
            items: self.with_authors(posts).await?,
            pagination,
        })
    }

    /// 已发布文章
    pub async fn list_published_posts_impl(
        &self,
        category: Option<PostCategory>,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<PostListResponse> {
        let mut select = Posts::find().filter(Column::IsPublished.eq(true));
        if let Some(category) = category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(term) = search_term(search.as_deref()) {
            select = select.filter(search_condition(&term));
        }

        let (posts, pagination) = self
            .fetch_page(latest_first(select), page, size)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章列表失败: {e}")))?;

        Ok(PostListResponse {
            items: self.with_authors(posts).await?,
            pagination,
        })
    }

    pub async fn latest_published_posts_impl(
        &self,
        category: Option<PostCategory>,
        limit: u64,
    ) -> Result<Vec<PostWithAuthor>> {
        let mut select = Posts::find().filter(Column::IsPublished.eq(true));
        if let Some(category) = category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        let posts = latest_first(select)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询最新文章失败: {e}")))?;

        self.with_authors(posts).await
    }

    /// 同分类的其他已发布文章
    pub async fn related_published_posts_impl(
        &self,
        category: PostCategory,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<PostWithAuthor>> {
        let posts = latest_first(
            Posts::find()
                .filter(Column::IsPublished.eq(true))
                .filter(Column::Category.eq(category.as_str()))
                .filter(Column::Id.ne(exclude_id)),
        )
        .limit(limit)
        .all(&self.db)
        .await
        .map_err(|e| SchoolSysError::database_operation(format!("查询相关文章失败: {e}")))?;

        self.with_authors(posts).await
    }

    pub async fn get_post_by_id_impl(&self, id: i64) -> Result<Option<PostWithAuthor>> {
        let Some(post) = Posts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.with_authors(vec![post]).await?.pop())
    }

    pub async fn get_post_by_slug_impl(&self, slug: &str) -> Result<Option<PostWithAuthor>> {
        let Some(post) = Posts::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.with_authors(vec![post]).await?.pop())
    }

    pub async fn post_slug_exists_impl(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        let mut select = Posts::find().filter(Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("检查 slug 失败: {e}")))?;

        Ok(count > 0)
    }

    pub async fn create_post_impl(&self, user_id: Option<i64>, req: PostChanges) -> Result<Post> {
        let now = chrono::Utc::now().timestamp();
        let created_at = req.created_at.map(|t| t.timestamp()).unwrap_or(now);

        let model = ActiveModel {
            user_id: Set(user_id),
            title: Set(req.title.trim().to_string()),
            slug: Set(req.slug),
            excerpt: Set(optional_text(req.excerpt)),
            content: Set(req.content),
            category: Set(req.category.as_str().to_string()),
            image: Set(req.image),
            is_published: Set(req.is_published),
            created_at: Set(created_at),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建文章失败: {e}")))?;

        Ok(result.into_post())
    }

    pub async fn update_post_impl(&self, id: i64, req: PostChanges) -> Result<Option<Post>> {
        let Some(existing) = Posts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.title = Set(req.title.trim().to_string());
        model.slug = Set(req.slug);
        model.excerpt = Set(optional_text(req.excerpt));
        model.content = Set(req.content);
        model.category = Set(req.category.as_str().to_string());
        model.image = Set(req.image);
        model.is_published = Set(req.is_published);
        if let Some(created_at) = req.created_at {
            model.created_at = Set(created_at.timestamp());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新文章失败: {e}")))?;

        Ok(Some(result.into_post()))
    }

    pub async fn delete_post_impl(&self, id: i64) -> Result<bool> {
        let result = Posts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除文章失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_post_published_impl(&self, id: i64, is_published: bool) -> Result<Option<Post>> {
        let Some(existing) = Posts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询文章失败: {e}")))?
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

        Ok(Some(result.into_post()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn changes(title: &str, category: PostCategory, published: bool) -> PostChanges {
        PostChanges {
            title: title.into(),
            slug: crate::utils::slug::slugify(title),
            excerpt: None,
            content: format!("<p>{title}</p>"),
            category,
            image: None,
            is_published: published,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_published_filters_and_related() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let first = storage
            .create_post_impl(None, changes("Lomba Sains", PostCategory::News, true))
            .await
            .unwrap();
        storage
            .create_post_impl(None, changes("Juara Futsal", PostCategory::News, true))
            .await
            .unwrap();
        storage
            .create_post_impl(None, changes("Libur Semester", PostCategory::Announcements, true))
            .await
            .unwrap();
        storage
            .create_post_impl(None, changes("Draf Rapat", PostCategory::News, false))
            .await
            .unwrap();

        let news = storage
            .list_published_posts_impl(Some(PostCategory::News), None, 1, 9)
            .await
            .unwrap();
        assert_eq!(news.pagination.total, 2);

        let related = storage
            .related_published_posts_impl(PostCategory::News, first.id, 3)
            .await
            .unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].post.title, "Juara Futsal");

        let found = storage
            .list_published_posts_impl(None, Some("semester".into()), 1, 9)
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_publish_and_slug_check() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let post = storage
            .create_post_impl(None, changes("Pengumuman", PostCategory::Announcements, false))
            .await
            .unwrap();
        assert!(storage.post_slug_exists_impl("pengumuman", None).await.unwrap());
        assert!(!storage.post_slug_exists_impl("pengumuman", Some(post.id)).await.unwrap());

        let updated = storage
            .set_post_published_impl(post.id, true)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_published);
        assert!(storage.set_post_published_impl(999, true).await.unwrap().is_none());
    }
}
