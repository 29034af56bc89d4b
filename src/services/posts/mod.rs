use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::middlewares::RequireJWT;
use crate::models::posts::{
    entities::Post,
    requests::{PostChanges, PostListParams, PostRequest, TogglePublishRequest},
    responses::PostWithAuthor,
};
use crate::services::files::{merge_image, remove_stored_file};
use crate::services::{define_service, found, invalid, respond, respond_created, respond_empty};
use crate::storage::Storage;
use crate::utils::slug::{slugify, unique_slug};

define_service!(PostService);

const CONTENT_TYPE: &str = "post";
const NOT_FOUND: &str = "Post not found";

async fn post_slug(storage: &dyn Storage, title: &str, exclude_id: Option<i64>) -> Result<String> {
    unique_slug(&slugify(title), |candidate| async move {
        storage.post_slug_exists(&candidate, exclude_id).await
    })
    .await
}

/// 请求转换为存储数据，`current` 为已有文章时保留未替换的图片
fn into_changes(req: PostRequest, slug: String, current: Option<&Post>) -> PostChanges {
    let image = merge_image(
        req.remove_image,
        req.image,
        current.and_then(|p| p.image.as_deref()),
    );
    PostChanges {
        title: req.title.trim().to_string(),
        slug,
        excerpt: req.excerpt.filter(|e| !e.trim().is_empty()),
        content: req.content,
        category: req.category,
        image,
        is_published: req.is_published,
        created_at: req.created_at,
    }
}

pub(crate) async fn create(
    storage: &dyn Storage,
    author_id: Option<i64>,
    req: PostRequest,
) -> Result<Post> {
    req.validate().map_err(invalid)?;
    let slug = post_slug(storage, req.title.trim(), None).await?;
    let post = storage
        .create_post(author_id, into_changes(req, slug, None))
        .await?;
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(post.id),
        Some(&post.title),
    );
    Ok(post)
}

/// 标题变化时重新生成 slug
pub(crate) async fn update(storage: &dyn Storage, id: i64, req: PostRequest) -> Result<Post> {
    req.validate().map_err(invalid)?;
    let current = found(storage.get_post_by_id(id).await?, NOT_FOUND)?.post;
    let slug = if current.title != req.title.trim() {
        post_slug(storage, req.title.trim(), Some(id)).await?
    } else {
        current.slug.clone()
    };
    let changes = into_changes(req, slug, Some(&current));
    let post = found(storage.update_post(id, changes).await?, NOT_FOUND)?;
    if current.image != post.image {
        remove_stored_file(current.image.as_deref());
    }
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(post.id),
        Some(&post.title),
    );
    Ok(post)
}

pub(crate) async fn delete(storage: &dyn Storage, id: i64) -> Result<()> {
    let current = found(storage.get_post_by_id(id).await?, NOT_FOUND)?.post;
    if !storage.delete_post(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    remove_stored_file(current.image.as_deref());
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&current.title));
    Ok(())
}

pub(crate) async fn toggle_publish(storage: &dyn Storage, id: i64, is_published: bool) -> Result<Post> {
    let post = found(storage.set_post_published(id, is_published).await?, NOT_FOUND)?;
    let action = if post.is_published { "published" } else { "unpublished" };
    ContentEventBus::get().content_updated(CONTENT_TYPE, action, Some(post.id), Some(&post.title));
    Ok(post)
}

impl PostService {
    pub async fn list_posts(
        &self,
        query: PostListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_posts_with_pagination(query).await,
            "Posts retrieved successfully",
        )
    }

    pub async fn get_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result: Result<PostWithAuthor> =
            storage.get_post_by_id(id).await.and_then(|p| found(p, NOT_FOUND));
        respond(result, "Post retrieved successfully")
    }

    pub async fn create_post(&self, body: PostRequest, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let author_id = RequireJWT::extract_user_id(request);
        respond_created(
            create(storage.as_ref(), author_id, body).await,
            "Post created successfully.",
        )
    }

    pub async fn update_post(
        &self,
        id: i64,
        body: PostRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(update(storage.as_ref(), id, body).await, "Post updated successfully.")
    }

    pub async fn delete_post(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_empty(delete(storage.as_ref(), id).await, "Post deleted successfully.")
    }

    pub async fn toggle_publish(
        &self,
        id: i64,
        body: TogglePublishRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let message = if body.is_published {
            "Post published successfully."
        } else {
            "Post unpublished successfully."
        };
        respond(toggle_publish(storage.as_ref(), id, body.is_published).await, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posts::entities::PostCategory;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(title: &str) -> PostRequest {
        PostRequest {
            title: title.into(),
            excerpt: None,
            content: "<p>Isi berita</p>".into(),
            category: PostCategory::News,
            image: Some("posts/1-a.jpg".into()),
            remove_image: false,
            created_at: None,
            is_published: false,
        }
    }

    #[tokio::test]
    async fn test_slug_regenerated_only_on_title_change() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let first = create(&storage, None, request("Lomba Sains")).await.unwrap();
        let second = create(&storage, None, request("Lomba Sains")).await.unwrap();
        assert_eq!(first.slug, "lomba-sains");
        assert_eq!(second.slug, "lomba-sains-1");

        let mut same_title = request("Lomba Sains");
        same_title.image = None;
        let kept = update(&storage, second.id, same_title).await.unwrap();
        assert_eq!(kept.slug, "lomba-sains-1");
        assert_eq!(kept.image.as_deref(), Some("posts/1-a.jpg"));

        let mut renamed = request("Juara Lomba Sains");
        renamed.remove_image = true;
        let renamed = update(&storage, second.id, renamed).await.unwrap();
        assert_eq!(renamed.slug, "juara-lomba-sains");
        assert!(renamed.image.is_none());
    }

    #[tokio::test]
    async fn test_toggle_publish_and_missing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let post = create(&storage, None, request("Upacara")).await.unwrap();
        assert!(!post.is_published);
        let post = toggle_publish(&storage, post.id, true).await.unwrap();
        assert!(post.is_published);
        assert_eq!(toggle_publish(&storage, 99, true).await.unwrap_err().code(), "E008");
        assert_eq!(delete(&storage, 99).await.unwrap_err().code(), "E008");
    }
}
