use crate::drive::{self, DriveClient};
use crate::errors::Result;
use crate::events::ContentEventBus;
use crate::models::galleries::{
    entities::{Gallery, GalleryItemType},
    responses::{FeaturedImageResponse, GalleryDriveFile, GalleryFolderResponse, GalleryUploadResponse},
};
use crate::models::google_drive::responses::DriveFileMetadata;
use crate::services::{found, invalid};
use crate::storage::Storage;
use crate::utils::drive_url::{self, sanitize_folder_name, unique_file_name};
use crate::utils::multipart::{UploadedFile, format_file_size};

use super::{CONTENT_TYPE, GALLERIES_FOLDER, NOT_FOUND};

pub(crate) const GALLERY_FILE_MAX_SIZE: usize = 20 * 1024 * 1024;
pub(crate) const FEATURED_IMAGE_MAX_SIZE: usize = 10 * 1024 * 1024;
pub(crate) const ITEM_FILE_MAX_SIZE: usize = 50 * 1024 * 1024;

fn thumbnail_for(client: &dyn DriveClient, meta: &DriveFileMetadata) -> Option<String> {
    if GalleryItemType::from_mime(Some(&meta.mime_type)) != GalleryItemType::Image {
        return None;
    }
    Some(match client.backend() {
        "google_drive" => drive_url::thumbnail_url(&meta.id),
        _ => client.public_url(&meta.id),
    })
}

fn to_drive_file(client: &dyn DriveClient, meta: DriveFileMetadata) -> GalleryDriveFile {
    GalleryDriveFile {
        file_type: GalleryItemType::from_mime(Some(&meta.mime_type)),
        url: client.public_url(&meta.id),
        thumbnail_url: thumbnail_for(client, &meta),
        view_url: meta
            .web_view_link
            .clone()
            .unwrap_or_else(|| drive_url::view_url(&meta.id)),
        id: meta.id,
        name: meta.name,
        mime_type: meta.mime_type,
        size: meta.size,
        created_time: meta.created_time,
    }
}

/// 上传到指定文件夹路径并设置公开可读
async fn upload_to(
    client: &dyn DriveClient,
    segments: &[&str],
    file: UploadedFile,
    base_name: Option<&str>,
) -> Result<DriveFileMetadata> {
    let folder_id = drive::ensure_folder_path(client, segments).await?;
    let original = match base_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{name}{}", file.extension),
        None => file.original_name.clone(),
    };
    let file_name = unique_file_name(&original, chrono::Utc::now().timestamp());
    let meta = client
        .upload(&folder_id, &file_name, &file.content_type, file.data)
        .await?;
    if let Err(e) = client.make_public(&meta.id).await {
        tracing::warn!("Failed to make {} public: {}", meta.id, e);
    }
    tracing::info!("Uploaded {} to {}", file_name, segments.join("/"));
    Ok(meta)
}

fn file_metadata(file: &UploadedFile) -> serde_json::Value {
    serde_json::json!({
        "file_size": file.size(),
        "file_size_human": format_file_size(file.size()),
        "original_name": file.original_name,
        "mime_type": file.content_type,
        "extension": file.extension.trim_start_matches('.'),
    })
}

pub(crate) async fn list_files(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
) -> Result<Vec<GalleryDriveFile>> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let Some(folder_id) =
        drive::find_folder_path(client, &[GALLERIES_FOLDER, &gallery.folder_name()]).await?
    else {
        return Ok(Vec::new());
    };
    Ok(client
        .list_folder(&folder_id)
        .await?
        .into_iter()
        .map(|meta| to_drive_file(client, meta))
        .collect())
}

pub(crate) async fn upload_file(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
    file: UploadedFile,
) -> Result<GalleryDriveFile> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let custom_name = file.fields.get("custom_name").cloned();
    if custom_name.as_deref().is_some_and(|n| n.chars().count() > 255) {
        return Err(invalid("Custom name cannot exceed 255 characters."));
    }
    let meta = upload_to(
        client,
        &[GALLERIES_FOLDER, &gallery.folder_name()],
        file,
        custom_name.as_deref(),
    )
    .await?;
    Ok(to_drive_file(client, meta))
}

pub(crate) async fn delete_file(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
    file_id: &str,
) -> Result<()> {
    found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    if file_id.trim().is_empty() {
        return Err(invalid("The file id field is required."));
    }
    client.delete(file_id).await
}

pub(crate) async fn initialize_folder(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
) -> Result<GalleryFolderResponse> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let folder_name = gallery.folder_name();
    let folder_id = drive::ensure_folder_path(client, &[GALLERIES_FOLDER, &folder_name]).await?;
    Ok(GalleryFolderResponse {
        folder_id,
        folder_name,
    })
}

fn featured_changed(gallery: &Gallery) {
    ContentEventBus::get().content_updated(
        CONTENT_TYPE,
        "updated",
        Some(gallery.id),
        Some(&gallery.title),
    );
}

/// 上传封面图并删除旧封面
pub(crate) async fn upload_featured_image(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
    file: UploadedFile,
) -> Result<FeaturedImageResponse> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let meta = upload_to(client, &[GALLERIES_FOLDER, &gallery.folder_name()], file, None).await?;
    let url = client.public_url(&meta.id);
    storage.set_gallery_featured_image(id, Some(url.clone())).await?;
    if let Some(old) = gallery.featured_image.as_deref() {
        drive::delete_url_quietly(client, old).await;
    }
    featured_changed(&gallery);
    Ok(FeaturedImageResponse {
        featured_image_url: url,
    })
}

/// 移除封面图，返回 false 表示原本没有封面
pub(crate) async fn remove_featured_image(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    id: i64,
) -> Result<bool> {
    let gallery = found(storage.get_gallery_by_id(id).await?, NOT_FOUND)?;
    let Some(current) = gallery.featured_image.as_deref() else {
        return Ok(false);
    };
    storage.set_gallery_featured_image(id, None).await?;
    drive::delete_url_quietly(client, current).await;
    featured_changed(&gallery);
    Ok(true)
}

/// 上传条目文件；带 gallery_id 时放入该相册的文件夹
pub(crate) async fn upload_item_file(
    storage: &dyn Storage,
    client: &dyn DriveClient,
    file: UploadedFile,
) -> Result<GalleryUploadResponse> {
    let gallery_name = file
        .fields
        .get("gallery_name")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("The gallery name field is required."))?;
    if gallery_name.chars().count() > 255 {
        return Err(invalid("The gallery name may not be greater than 255 characters."));
    }
    let gallery_id = match file.fields.get("gallery_id").map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => {
            let id: i64 = raw.parse().map_err(|_| invalid("The selected gallery id is invalid."))?;
            if storage.get_gallery_by_id(id).await?.is_none() {
                return Err(invalid("The selected gallery id is invalid."));
            }
            Some(id)
        }
        None => None,
    };

    let metadata = file_metadata(&file);
    let file_name = file.original_name.clone();
    let mime_type = file.content_type.clone();
    let folder = sanitize_folder_name(&gallery_name);
    let segments: Vec<&str> = match gallery_id {
        Some(_) => vec![GALLERIES_FOLDER, &folder],
        None => vec![GALLERIES_FOLDER],
    };
    let meta = upload_to(client, &segments, file, None).await?;

    Ok(GalleryUploadResponse {
        file_url: client.public_url(&meta.id),
        thumbnail_url: thumbnail_for(client, &meta),
        file_id: meta.id,
        file_name,
        mime_type,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::LocalDriveClient;
    use crate::models::galleries::requests::GalleryChanges;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use std::collections::HashMap;

    fn jpeg(fields: &[(&str, &str)]) -> UploadedFile {
        UploadedFile {
            original_name: "Foto Panggung.JPG".into(),
            extension: ".jpg".into(),
            content_type: "image/jpeg".into(),
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    async fn setup() -> (SeaOrmStorage, LocalDriveClient, Gallery) {
        let storage = SeaOrmStorage::new_in_memory().await;
        let client = LocalDriveClient::new(
            std::env::temp_dir().join(format!("schoolsys-gallery-drive-{}", uuid::Uuid::new_v4())),
        );
        let gallery = storage
            .create_gallery(
                GalleryChanges {
                    title: "Pentas: Seni?".into(),
                    slug: "pentas-seni".into(),
                    description: None,
                    featured_image: None,
                    is_published: true,
                    sort_order: 0,
                },
                vec![],
            )
            .await
            .unwrap();
        (storage, client, gallery)
    }

    #[tokio::test]
    async fn test_upload_list_and_featured_image() {
        let (storage, client, gallery) = setup().await;
        assert!(list_files(&storage, &client, gallery.id).await.unwrap().is_empty());

        let uploaded = upload_file(&storage, &client, gallery.id, jpeg(&[("custom_name", "Pembukaan")]))
            .await
            .unwrap();
        assert!(uploaded.name.starts_with("pembukaan-"));
        assert_eq!(uploaded.file_type, GalleryItemType::Image);
        assert_eq!(list_files(&storage, &client, gallery.id).await.unwrap().len(), 1);

        let featured = upload_featured_image(&storage, &client, gallery.id, jpeg(&[]))
            .await
            .unwrap();
        let stored = storage.get_gallery_by_id(gallery.id).await.unwrap().unwrap();
        assert_eq!(stored.featured_image, Some(featured.featured_image_url));

        assert!(remove_featured_image(&storage, &client, gallery.id).await.unwrap());
        assert!(!remove_featured_image(&storage, &client, gallery.id).await.unwrap());

        std::fs::remove_dir_all(client.root()).ok();
    }

    #[tokio::test]
    async fn test_upload_item_file_requires_gallery_name() {
        let (storage, client, gallery) = setup().await;
        let err = upload_item_file(&storage, &client, jpeg(&[])).await.unwrap_err();
        assert_eq!(err.code(), "E007");

        let gallery_id = gallery.id.to_string();
        let result = upload_item_file(
            &storage,
            &client,
            jpeg(&[("gallery_name", "Pentas Seni"), ("gallery_id", &gallery_id)]),
        )
        .await
        .unwrap();
        assert!(result.file_id.starts_with("galleries/pentas-seni/"));
        assert_eq!(result.metadata["extension"], "jpg");
        assert_eq!(result.file_name, "Foto Panggung.JPG");

        std::fs::remove_dir_all(client.root()).ok();
    }
}
