use std::collections::HashSet;

use crate::drive::{self, DriveClient};
use crate::errors::{Result, SchoolSysError};
use crate::events::ContentEventBus;
use crate::models::galleries::{
    entities::{Gallery, GalleryItem},
    requests::{
        GalleryChanges, GalleryItemData, GalleryItemInput, GalleryItemPlan, GalleryRequest,
        ReorderGalleriesRequest,
    },
    responses::GalleryDetailResponse,
};
use crate::services::{found, invalid};
use crate::storage::Storage;
use crate::utils::drive_url::{is_blob_url, sanitize_folder_name};
use crate::utils::slug::{slugify, unique_slug};

use super::{CONTENT_TYPE, GALLERIES_FOLDER, NOT_FOUND};

const BLOB_REJECTED: &str =
    "Cannot save blob URLs to database. File must be uploaded to Google Drive first.";

async fn gallery_slug(storage: &dyn Storage, title: &str, exclude_id: Option<i64>) -> Result<String> {
    unique_slug(&slugify(title), |candidate| async move {
        storage.gallery_slug_exists(&candidate, exclude_id).await
    })
    .await
}

fn item_data(input: GalleryItemInput, sort_order: i32, metadata: Option<serde_json::Value>) -> GalleryItemData {
    GalleryItemData {
        title: input.title.filter(|t| !t.trim().is_empty()),
        caption: input.caption.filter(|c| !c.trim().is_empty()),
        mime_type: input.mime_type,
        file_path: input.file_path.filter(|p| !p.trim().is_empty()),
        metadata: input.metadata.or(metadata),
        sort_order,
        is_featured: input.is_featured,
    }
}

fn reject_blobs(inputs: &[GalleryItemInput]) -> Result<()> {
    let has_blob = inputs
        .iter()
        .filter_map(|i| i.file_path.as_deref())
        .any(is_blob_url);
    if has_blob {
        tracing::error!("Rejected gallery items containing blob URLs");
        return Err(invalid(BLOB_REJECTED));
    }
    Ok(())
}

/// 对比提交的条目与已有条目，生成增删改计划
///
/// 带已有数字ID的条目更新，文件被替换且新旧都是 Drive 地址时删除旧文件；
/// 其他条目在有文件且路径不重复时新建；未提交的已有条目连同文件删除。
pub(crate) fn plan_items(existing: &[GalleryItem], inputs: Vec<GalleryItemInput>) -> Result<GalleryItemPlan> {
    reject_blobs(&inputs)?;

    let mut plan = GalleryItemPlan::default();
    let mut submitted: HashSet<i64> = HashSet::new();
    let mut known_paths: HashSet<String> = existing
        .iter()
        .filter_map(|item| item.file_path.clone())
        .collect();

    for (index, input) in inputs.into_iter().enumerate() {
        let sort_order = input.sort_order.unwrap_or(index as i32);
        let current = input
            .existing_id()
            .and_then(|id| existing.iter().find(|item| item.id == id));

        match current {
            Some(current) => {
                let new_path = input.file_path.as_deref().filter(|p| !p.is_empty());
                let old_path = input
                    .old_file_path
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .or(current.file_path.as_deref());
                if let (Some(old), Some(new)) = (old_path, new_path)
                    && old != new
                    && drive::is_drive_url(old)
                    && drive::is_drive_url(new)
                {
                    plan.drive_deletions.push(old.to_string());
                }
                if let Some(new) = new_path {
                    known_paths.insert(new.to_string());
                }
                submitted.insert(current.id);
                plan.updates
                    .push((current.id, item_data(input, sort_order, current.metadata.clone())));
            }
            None => {
                let Some(path) = input.file_path.clone().filter(|p| !p.is_empty()) else {
                    tracing::warn!("Skipping gallery item without file_path");
                    continue;
                };
                if !known_paths.insert(path.clone()) {
                    tracing::warn!("Skipping duplicate gallery item {}", path);
                    continue;
                }
                plan.creates.push(item_data(input, sort_order, None));
            }
        }
    }

    for item in existing.iter().filter(|item| !submitted.contains(&item.id)) {
        plan.deletes.push(item.id);
        if let Some(path) = &item.file_path {
            plan.drive_deletions.push(path.clone());
        }
    }
    Ok(plan)
}

fn normalize(mut req: GalleryRequest) -> Result<GalleryRequest> {
    req.validate().map_err(invalid)?;
    req.title = req.title.trim().to_string();
    req.description = req.description.filter(|d| !d.trim().is_empty());
    req.featured_image = req.featured_image.filter(|f| !f.trim().is_empty());
    Ok(req)
}

pub(crate) async fn create(storage: &dyn Storage, req: GalleryRequest) -> Result<(Gallery, usize)> {
    let mut req = normalize(req)?;
    let inputs = req.items.take().unwrap_or_default();
    reject_blobs(&inputs)?;

    let sort_order = match req.sort_order {
        Some(order) => order,
        None => storage.max_gallery_sort_order().await?.map_or(0, |max| max + 1),
    };
    let changes = GalleryChanges {
        slug: gallery_slug(storage, &req.title, None).await?,
        title: req.title,
        description: req.description,
        featured_image: req.featured_image,
        is_published: req.is_published,
        sort_order,
    };
    let items: Vec<GalleryItemData> = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let order = input.sort_order.unwrap_or(index as i32);
            item_data(input, order, None)
        })
        .collect();
    let item_count = items.len();

    let gallery = storage.create_gallery(changes, items).await?;
    tracing::info!("Created gallery {} with {} items", gallery.id, item_count);
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "created",
        Some(gallery.id),
        Some(&gallery.title),
    );
    Ok((gallery, item_count))
}

// 重命名 Drive 中的相册文件夹，失败只记录日志
async fn rename_folder(client: &dyn DriveClient, old_title: &str, new_title: &str) {
    let old_name = sanitize_folder_name(old_title);
    let new_name = sanitize_folder_name(new_title);
    match drive::find_folder_path(client, &[GALLERIES_FOLDER, &old_name]).await {
        Ok(Some(folder_id)) => {
            if let Err(e) = client.rename(&folder_id, &new_name).await {
                tracing::warn!("Failed to rename gallery folder '{}': {}", old_name, e);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to look up gallery folder '{}': {}", old_name, e),
    }
}

/// 更新相册；`items` 为 None 时不改动条目
pub(crate) async fn update(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
    req: GalleryRequest,
) -> Result<(Gallery, usize)> {
    let mut req = normalize(req)?;
    let current = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;

    let (plan, item_count) = match req.items.take() {
        Some(inputs) => {
            let count = inputs.len();
            let existing = storage.list_gallery_items(id).await?;
            (plan_items(&existing, inputs)?, count)
        }
        None => (GalleryItemPlan::default(), 0),
    };

    let title_changed = current.title != req.title;
    let slug = if title_changed {
        gallery_slug(storage, &req.title, Some(id)).await?
    } else {
        current.slug.clone()
    };
    let changes = GalleryChanges {
        title: req.title,
        slug,
        description: req.description,
        featured_image: req.featured_image,
        is_published: req.is_published,
        sort_order: req.sort_order.unwrap_or(current.sort_order),
    };

    let drive_deletions = plan.drive_deletions.clone();
    let gallery = found(storage.update_gallery(id, changes, plan).await?, NOT_FOUND)?;

    if title_changed {
        rename_folder(client, &current.title, &gallery.title).await;
    }
    for path in &drive_deletions {
        drive::delete_url_quietly(client, path).await;
    }
    if let Some(old) = current.featured_image.as_deref()
        && gallery.featured_image.as_deref() != Some(old)
    {
        drive::delete_url_quietly(client, old).await;
    }

    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(gallery.id),
        Some(&gallery.title),
    );
    Ok((gallery, item_count))
}

pub(crate) async fn detail(storage: &dyn Storage, id: i64) -> Result<GalleryDetailResponse> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let items = storage.list_gallery_items(id).await?;
    Ok(GalleryDetailResponse::new(gallery, items))
}

/// 删除相册：优先删除整个 Drive 文件夹，找不到时逐个删除文件
pub(crate) async fn delete(storage: &dyn Storage, client: &dyn DriveClient, id: i64) -> Result<()> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let items = storage.list_gallery_items(id).await?;

    let folder = drive::find_folder_path(client, &[GALLERIES_FOLDER, &gallery.folder_name()])
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to look up folder of gallery {}: {}", id, e);
            None
        });
    match folder {
        Some(folder_id) => drive::delete_quietly(client, &folder_id).await,
        None => {
            if let Some(featured) = gallery.featured_image.as_deref() {
                drive::delete_url_quietly(client, featured).await;
            }
            for path in items.iter().filter_map(|item| item.file_path.as_deref()) {
                drive::delete_url_quietly(client, path).await;
            }
        }
    }

    for item in &items {
        storage.delete_gallery_item(item.id).await?;
    }
    if !storage.delete_gallery(id).await? {
        return Err(SchoolSysError::not_found(NOT_FOUND));
    }
    ContentEventBus::get().content_updated(CONTENT_TYPE, "deleted", Some(id), Some(&gallery.title));
    Ok(())
}

pub(crate) async fn toggle_publish(storage: &dyn Storage, id: i64) -> Result<Gallery> {
    let current = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let gallery = found(
        storage.set_gallery_published(id, !current.is_published).await?,
        NOT_FOUND,
    )?;
    let action = if gallery.is_published { "published" } else { "unpublished" };
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        action,
        Some(gallery.id),
        Some(&gallery.title),
    );
    Ok(gallery)
}

pub(crate) async fn reorder(storage: &dyn Storage, req: ReorderGalleriesRequest) -> Result<u64> {
    req.validate().map_err(invalid)?;
    for order in &req.galleries {
        if storage.get_gallery_by_id(order.id).await?.is_none() {
            return Err(invalid(format!("The selected gallery {} is invalid.", order.id)));
        }
    }
    let updated = storage.reorder_galleries(&req.galleries).await?;
    ContentEventBus::get().content_updated(CONTENT_TYPE, "reordered", None, None);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    const OLD: &str = "https://lh3.googleusercontent.com/d/1OldOldOldOldOldOldOldOldOld";
    const NEW: &str = "https://lh3.googleusercontent.com/d/1NewNewNewNewNewNewNewNewNew";

    fn input(id: Option<serde_json::Value>, path: Option<&str>) -> GalleryItemInput {
        GalleryItemInput {
            id,
            title: None,
            caption: None,
            mime_type: Some("image/jpeg".into()),
            file_path: path.map(str::to_string),
            is_featured: false,
            sort_order: None,
            metadata: None,
            old_file_path: None,
        }
    }

    fn existing(id: i64, path: &str) -> GalleryItem {
        GalleryItem {
            id,
            gallery_id: 1,
            title: None,
            caption: None,
            mime_type: Some("image/jpeg".into()),
            file_path: Some(path.into()),
            metadata: Some(serde_json::json!({"file_size": 10})),
            sort_order: 0,
            is_featured: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn request(title: &str, items: Option<Vec<GalleryItemInput>>) -> GalleryRequest {
        GalleryRequest {
            title: title.into(),
            description: None,
            featured_image: None,
            is_published: true,
            sort_order: None,
            items,
        }
    }

    #[test]
    fn test_plan_replaces_creates_and_deletes() {
        let current = vec![existing(1, OLD), existing(2, "https://drive.google.com/file/d/1Keep/view")];
        let plan = plan_items(
            &current,
            vec![
                input(Some(serde_json::json!(1)), Some(NEW)),
                input(Some(serde_json::json!("item_17")), Some("https://lh3.googleusercontent.com/d/1Third")),
                input(Some(serde_json::json!("item_18")), None),
                input(None, Some(NEW)),
            ],
        )
        .unwrap();

        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].0, 1);
        assert_eq!(plan.updates[0].1.sort_order, 0);
        assert_eq!(plan.updates[0].1.metadata, Some(serde_json::json!({"file_size": 10})));
        // 新条目中重复路径被跳过
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].sort_order, 1);
        assert_eq!(plan.deletes, vec![2]);
        assert_eq!(
            plan.drive_deletions,
            vec![OLD.to_string(), "https://drive.google.com/file/d/1Keep/view".to_string()]
        );
    }

    #[test]
    fn test_plan_rejects_blob_urls() {
        let err = plan_items(&[], vec![input(None, Some("blob:http://localhost/1"))]).unwrap_err();
        assert_eq!(err.message(), BLOB_REJECTED);
    }

    #[tokio::test]
    async fn test_create_defaults_and_update_cycle() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-gallery-{}", uuid::Uuid::new_v4())),
        );

        let (first, count) = create(&storage, request("Pentas Seni", Some(vec![input(None, Some(OLD))])))
            .await
            .unwrap();
        assert_eq!((first.sort_order, count), (0, 1));
        let (second, _) = create(&storage, request("Pentas Seni", None)).await.unwrap();
        assert_eq!(second.slug, "pentas-seni-1");
        assert_eq!(second.sort_order, 1);

        let item_id = storage.list_gallery_items(first.id).await.unwrap()[0].id;
        let mut replaced = input(Some(serde_json::json!(item_id)), Some(NEW));
        replaced.old_file_path = Some(OLD.into());
        let (updated, _) = update(&storage, &client, first.id, request("Pentas Seni 2024", Some(vec![replaced])))
            .await
            .unwrap();
        assert_eq!(updated.slug, "pentas-seni-2024");
        let detail = detail(&storage, first.id).await.unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].item.file_path.as_deref(), Some(NEW));

        let err = create(&storage, request("Blob", Some(vec![input(None, Some("blob:x"))])))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let toggled = toggle_publish(&storage, first.id).await.unwrap();
        assert!(!toggled.is_published);

        delete(&storage, &client, first.id).await.unwrap();
        assert!(storage.get_gallery_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reorder_rejects_unknown_gallery() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let (gallery, _) = create(&storage, request("Wisuda", None)).await.unwrap();
        let order = |id, sort_order| crate::models::galleries::requests::GalleryOrder { id, sort_order };

        let err = reorder(&storage, ReorderGalleriesRequest { galleries: vec![order(gallery.id, 3), order(999, 1)] })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let updated = reorder(&storage, ReorderGalleriesRequest { galleries: vec![order(gallery.id, 3)] })
            .await
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(storage.get_gallery_by_id(gallery.id).await.unwrap().unwrap().sort_order, 3);
    }
}
