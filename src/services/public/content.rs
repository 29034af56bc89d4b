use crate::errors::Result;
use crate::models::extracurriculars::responses::ExtracurricularWithCount;
use crate::models::galleries::{entities::GalleryItem, responses::GalleryItemView};
use crate::models::pages::entities::Page;
use crate::models::posts::responses::PostListResponse;
use crate::models::public::{
    requests::{GalleryQuery, NewsQuery},
    responses::{
        ContactResponse, FacilitiesResponse, GalleryDetailPublicResponse, GalleryListPublicResponse,
        HomeResponse, NewsDetailResponse, PagesResponse, PublicGallery,
    },
};
use crate::services::found;
use crate::storage::Storage;

const PUBLIC_PAGE_SIZE: u64 = 12;
const HOME_FEATURED_POSTS: u64 = 3;
const HOME_LATEST_POSTS: u64 = 6;
const HOME_GALLERIES: u64 = 6;
const HOME_EXTRACURRICULARS: usize = 6;
const RELATED_POSTS: u64 = 3;
const OTHER_GALLERIES: u64 = 6;

fn views(items: Vec<GalleryItem>) -> Vec<GalleryItemView> {
    items.into_iter().map(GalleryItemView::from).collect()
}

pub(crate) async fn home(storage: &dyn Storage) -> Result<HomeResponse> {
    let featured_posts = storage
        .latest_published_posts(None, HOME_FEATURED_POSTS)
        .await?;
    let latest_news = storage.latest_published_posts(None, HOME_LATEST_POSTS).await?;

    let listed = storage
        .list_published_galleries(None, 1, HOME_GALLERIES)
        .await?;
    let ids: Vec<i64> = listed.items.iter().map(|g| g.gallery.id).collect();
    let mut items = storage.list_gallery_items_for(&ids).await?;
    // 首页只展示精选条目
    let galleries = listed
        .items
        .into_iter()
        .map(|row| {
            let featured = items
                .remove(&row.gallery.id)
                .unwrap_or_default()
                .into_iter()
                .filter(|item| item.is_featured)
                .collect();
            PublicGallery {
                gallery: row.gallery,
                items: views(featured),
            }
        })
        .collect();

    let extracurriculars = storage
        .list_all_extracurriculars()
        .await?
        .into_iter()
        .take(HOME_EXTRACURRICULARS)
        .map(|row| row.extracurricular)
        .collect();

    Ok(HomeResponse {
        featured_posts,
        latest_news,
        galleries,
        extracurriculars,
    })
}

pub(crate) async fn news(storage: &dyn Storage, query: NewsQuery) -> Result<PostListResponse> {
    storage
        .list_published_posts(
            query.category,
            query.search,
            query.pagination.page(),
            PUBLIC_PAGE_SIZE,
        )
        .await
}

pub(crate) async fn news_detail(storage: &dyn Storage, slug: &str) -> Result<NewsDetailResponse> {
    let post = found(
        storage
            .get_post_by_slug(slug)
            .await?
            .filter(|p| p.post.is_published),
        "Post not found",
    )?;
    let related = storage
        .related_published_posts(post.post.category, post.post.id, RELATED_POSTS)
        .await?;
    Ok(NewsDetailResponse { post, related })
}

pub(crate) async fn galleries(storage: &dyn Storage, query: GalleryQuery) -> Result<GalleryListPublicResponse> {
    let listed = storage
        .list_published_galleries(query.search, query.pagination.page(), PUBLIC_PAGE_SIZE)
        .await?;
    let ids: Vec<i64> = listed.items.iter().map(|g| g.gallery.id).collect();
    let mut items = storage.list_gallery_items_for(&ids).await?;
    Ok(GalleryListPublicResponse {
        pagination: listed.pagination,
        items: listed
            .items
            .into_iter()
            .map(|row| PublicGallery {
                items: views(items.remove(&row.gallery.id).unwrap_or_default()),
                gallery: row.gallery,
            })
            .collect(),
    })
}

pub(crate) async fn gallery_detail(storage: &dyn Storage, slug: &str) -> Result<GalleryDetailPublicResponse> {
    let gallery = found(
        storage
            .get_gallery_by_slug(slug)
            .await?
            .filter(|g| g.is_published),
        "Gallery not found",
    )?;
    let items = storage.list_gallery_items(gallery.id).await?;
    let others = storage
        .latest_published_galleries(Some(gallery.id), OTHER_GALLERIES)
        .await?;
    Ok(GalleryDetailPublicResponse {
        gallery: PublicGallery {
            gallery,
            items: views(items),
        },
        others,
    })
}

pub(crate) async fn extracurriculars(storage: &dyn Storage) -> Result<Vec<ExtracurricularWithCount>> {
    storage.list_all_extracurriculars().await
}

pub(crate) async fn facilities(storage: &dyn Storage) -> Result<FacilitiesResponse> {
    Ok(FacilitiesResponse {
        facilities: storage.list_all_facilities().await?,
    })
}

pub(crate) async fn pages(storage: &dyn Storage) -> Result<PagesResponse> {
    Ok(PagesResponse {
        pages: storage.list_all_pages().await?,
    })
}

pub(crate) async fn page(storage: &dyn Storage, slug: &str) -> Result<Page> {
    found(storage.get_page_by_slug(slug).await?, "Page not found")
}

pub(crate) async fn contact(storage: &dyn Storage) -> Result<ContactResponse> {
    Ok(ContactResponse {
        contact: storage.latest_contact().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::PaginationQuery;
    use crate::models::posts::entities::PostCategory;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::posts::tests::changes;

    #[tokio::test]
    async fn test_news_hides_drafts() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage
            .create_post(None, changes("Upacara Bendera", PostCategory::News, true))
            .await
            .unwrap();
        storage
            .create_post(None, changes("Lomba Sains", PostCategory::News, true))
            .await
            .unwrap();
        storage
            .create_post(None, changes("Draf Pengumuman", PostCategory::Announcements, false))
            .await
            .unwrap();

        let list = news(
            &storage,
            NewsQuery {
                pagination: PaginationQuery::with_page(1),
                category: None,
                search: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(list.pagination.total, 2);
        assert_eq!(list.pagination.page_size, 12);

        let detail = news_detail(&storage, "upacara-bendera").await.unwrap();
        assert_eq!(detail.related.len(), 1);
        let err = news_detail(&storage, "draf-pengumuman").await.unwrap_err();
        assert_eq!(err.code(), "E008");

        let home = home(&storage).await.unwrap();
        assert_eq!(home.latest_news.len(), 2);
        assert!(home.galleries.is_empty());
    }
}
