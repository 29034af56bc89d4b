use crate::drive::{self, DriveClient};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::galleries::entities::GalleryItem;
use crate::services::found;
use crate::storage::Storage;

use super::{CONTENT_TYPE, NOT_FOUND};

const ITEM_NOT_FOUND: &str = "Gallery item not found";

async fn load_item(storage: &dyn Storage, gallery_id: i64, item_id: i64) -> Result<GalleryItem> {
    found(storage.get_gallery_by_id(gallery_id).await?, NOT_FOUND)?;
    found(storage.get_gallery_item(gallery_id, item_id).await?, ITEM_NOT_FOUND)
}

fn item_changed(gallery_id: i64) {
    ContentEventBus::get().content_updated(CONTENT_TYPE, "updated", Some(gallery_id), None);
}

/// 删除条目及其 Drive 文件
pub(crate) async fn destroy_item(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    gallery_id: i64,
    item_id: i64,
) -> Result<()> {
    let item = load_item(storage, gallery_id, item_id).await?;
    if let Some(path) = item.file_path.as_deref() {
        drive::delete_url_quietly(client, path).await;
    }
    if !storage.delete_gallery_item(item.id).await? {
        return Err(SchoolSysError::not_found(ITEM_NOT_FOUND));
    }
    item_changed(gallery_id);
    Ok(())
}

/// 切换精选状态，返回新的状态
pub(crate) async fn toggle_item_featured(
    storage: &dyn Storage,
    gallery_id: i64,
    item_id: i64,
) -> Result<bool> {
    let item = load_item(storage, gallery_id, item_id).await?;
    let is_featured = !item.is_featured;
    storage.set_gallery_item_featured(item.id, is_featured).await?;
    item_changed(gallery_id);
    Ok(is_featured)
}

/// 删除 Drive 文件并清空条目的文件字段，条目本身保留
pub(crate) async fn clear_item_image(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    gallery_id: i64,
    item_id: i64,
) -> Result<()> {
    let item = load_item(storage, gallery_id, item_id).await?;
    if let Some(path) = item.file_path.as_deref() {
        drive::delete_url_quietly(client, path).await;
    }
    storage.clear_gallery_item_file(item.id).await?;
    item_changed(gallery_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::models::galleries::requests::{GalleryChanges, GalleryItemData};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_item_operations() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-items-{}", uuid::Uuid::new_v4())),
        );
        let gallery = storage
            .create_gallery(
                GalleryChanges {
                    title: "Study Tour".into(),
                    slug: "study-tour".into(),
                    description: None,
                    featured_image: None,
                    is_published: false,
                    sort_order: 0,
                },
                vec![GalleryItemData {
                    title: Some("Museum".into()),
                    caption: None,
                    mime_type: Some("image/png".into()),
                    file_path: Some("https://lh3.googleusercontent.com/d/1MuseumMuseumMuseumMuseum".into()),
                    metadata: None,
                    sort_order: 0,
                    is_featured: false,
                }],
            )
            .await
            .unwrap();
        let item = storage.list_gallery_items(gallery.id).await.unwrap().remove(0);

        assert!(toggle_item_featured(&storage, gallery.id, item.id).await.unwrap());
        assert!(!toggle_item_featured(&storage, gallery.id, item.id).await.unwrap());

        clear_item_image(&storage, &client, gallery.id, item.id).await.unwrap();
        let cleared = storage.get_gallery_item(gallery.id, item.id).await.unwrap().unwrap();
        assert!(cleared.file_path.is_none());
        assert!(cleared.mime_type.is_none());

        // 条目不属于该相册
        assert_eq!(
            destroy_item(&storage, &client, gallery.id + 1, item.id).await.unwrap_err().code(),
            "E008"
        );
        destroy_item(&storage, &client, gallery.id, item.id).await.unwrap();
        assert!(storage.list_gallery_items(gallery.id).await.unwrap().is_empty());
    }
}
