pub mod drive;
pub mod items;
pub mod manage;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::galleries::requests::{
    DeleteDriveFileRequest, GalleryListParams, GalleryRequest, ReorderGalleriesRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    define_service, drive_client, error_response, respond, respond_created, respond_empty,
    upload_error_response,
};
use crate::utils::multipart::{
    GALLERY_MEDIA_EXTENSIONS, IMAGE_EXTENSIONS, UploadRules, UploadedFile, read_single_file,
};

define_service!(GalleryService);

pub(crate) const CONTENT_TYPE: &str = "gallery";
pub(crate) const NOT_FOUND: &str = "Gallery not found";
// Drive 中所有相册文件夹的上级目录
pub(crate) const GALLERIES_FOLDER: &str = "Galleries";

fn items_message(action: &str, count: usize) -> String {
    if count > 0 {
        format!("Gallery {action} successfully with {count} items.")
    } else {
        format!("Gallery {action} successfully.")
    }
}

async fn read_upload(
    payload: Multipart,
    allowed_extensions: &[&str],
    max_size: usize,
) -> Result<UploadedFile, HttpResponse> {
    read_single_file(
        payload,
        UploadRules {
            allowed_extensions,
            max_size,
        },
    )
    .await
    .map_err(upload_error_response)
}

impl GalleryService {
    pub async fn list_galleries(
        &self,
        query: GalleryListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            storage.list_galleries_with_pagination(query).await,
            "Galleries retrieved successfully",
        )
    }

    pub async fn get_gallery(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            manage::detail(storage.as_ref(), id).await,
            "Gallery retrieved successfully",
        )
    }

    pub async fn create_gallery(
        &self,
        body: GalleryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match manage::create(storage.as_ref(), body).await {
            Ok((gallery, count)) => respond_created(Ok(gallery), &items_message("created", count)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn update_gallery(
        &self,
        id: i64,
        body: GalleryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        match manage::update(storage.as_ref(), client.as_ref(), id, body).await {
            Ok((gallery, count)) => respond(Ok(gallery), &items_message("updated", count)),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn delete_gallery(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            manage::delete(storage.as_ref(), client.as_ref(), id).await,
            "Gallery and all its items deleted successfully.",
        )
    }

    pub async fn toggle_publish(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match manage::toggle_publish(storage.as_ref(), id).await {
            Ok(gallery) => {
                let status = if gallery.is_published { "published" } else { "unpublished" };
                respond(Ok(gallery), &format!("Gallery {status} successfully."))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn reorder(
        &self,
        body: ReorderGalleriesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = manage::reorder(storage.as_ref(), body).await;
        respond(result, "Gallery order updated successfully.")
    }

    pub async fn list_files(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond(
            drive::list_files(storage.as_ref(), client.as_ref(), id).await,
            "Gallery files retrieved successfully",
        )
    }

    pub async fn upload_file(
        &self,
        id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let file = match read_upload(payload, GALLERY_MEDIA_EXTENSIONS, drive::GALLERY_FILE_MAX_SIZE).await {
            Ok(file) => file,
            Err(response) => return Ok(response),
        };
        respond_created(
            drive::upload_file(storage.as_ref(), client.as_ref(), id, file).await,
            "File uploaded successfully",
        )
    }

    pub async fn delete_file(
        &self,
        id: i64,
        body: DeleteDriveFileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            drive::delete_file(storage.as_ref(), client.as_ref(), id, &body.file_id).await,
            "File deleted successfully",
        )
    }

    pub async fn initialize_folder(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond(
            drive::initialize_folder(storage.as_ref(), client.as_ref(), id).await,
            "Gallery folder is ready",
        )
    }

    pub async fn upload_featured_image(
        &self,
        id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let file = match read_upload(payload, IMAGE_EXTENSIONS, drive::FEATURED_IMAGE_MAX_SIZE).await {
            Ok(file) => file,
            Err(response) => return Ok(response),
        };
        respond(
            drive::upload_featured_image(storage.as_ref(), client.as_ref(), id, file).await,
            "Featured image uploaded successfully",
        )
    }

    pub async fn remove_featured_image(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        match drive::remove_featured_image(storage.as_ref(), client.as_ref(), id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Featured image removed successfully",
            ))),
            Ok(false) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "No featured image to remove",
            ))),
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn upload_item_file(&self, payload: Multipart, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let file = match read_upload(payload, GALLERY_MEDIA_EXTENSIONS, drive::ITEM_FILE_MAX_SIZE).await {
            Ok(file) => file,
            Err(response) => return Ok(response),
        };
        respond_created(
            drive::upload_item_file(storage.as_ref(), client.as_ref(), file).await,
            "File uploaded successfully",
        )
    }

    pub async fn destroy_item(
        &self,
        gallery_id: i64,
        item_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            items::destroy_item(storage.as_ref(), client.as_ref(), gallery_id, item_id).await,
            "Gallery item and its file deleted successfully.",
        )
    }

    pub async fn toggle_item_featured(
        &self,
        gallery_id: i64,
        item_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match items::toggle_item_featured(storage.as_ref(), gallery_id, item_id).await {
            Ok(is_featured) => {
                let status = if is_featured { "featured" } else { "unfeatured" };
                respond(Ok(is_featured), &format!("Gallery item marked as {status}."))
            }
            Err(e) => Ok(error_response(&e)),
        }
    }

    pub async fn clear_item_image(
        &self,
        gallery_id: i64,
        item_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            items::clear_item_image(storage.as_ref(), client.as_ref(), gallery_id, item_id).await,
            "Image cleared successfully",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::multipart::tests::{MP4_HEADER, PNG_HEADER, Part, multipart_payload, padded};

    async fn rejection_message(response: HttpResponse) -> String {
        assert_eq!(response.status(), 400);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["message"].as_str().unwrap_or_default().to_string()
    }

    #[actix_web::test]
    async fn test_gallery_file_limit() {
        let video = padded(MP4_HEADER, drive::GALLERY_FILE_MAX_SIZE);
        let payload = multipart_payload(&[Part::File("pentas seni.mp4", &video)], 512 * 1024);
        let file = read_upload(payload, GALLERY_MEDIA_EXTENSIONS, drive::GALLERY_FILE_MAX_SIZE)
            .await
            .unwrap();
        assert_eq!(file.content_type, "video/mp4");

        let video = padded(MP4_HEADER, drive::GALLERY_FILE_MAX_SIZE + 1);
        let payload = multipart_payload(&[Part::File("pentas seni.mp4", &video)], 512 * 1024);
        let response = read_upload(payload, GALLERY_MEDIA_EXTENSIONS, drive::GALLERY_FILE_MAX_SIZE)
            .await
            .unwrap_err();
        assert_eq!(
            rejection_message(response).await,
            "File size exceeds the limit of 20 MB"
        );
    }

    #[actix_web::test]
    async fn test_featured_image_rules() {
        let image = padded(PNG_HEADER, drive::FEATURED_IMAGE_MAX_SIZE + 1);
        let payload = multipart_payload(&[Part::File("sampul.png", &image)], 512 * 1024);
        let response = read_upload(payload, IMAGE_EXTENSIONS, drive::FEATURED_IMAGE_MAX_SIZE)
            .await
            .unwrap_err();
        assert_eq!(
            rejection_message(response).await,
            "File size exceeds the limit of 10 MB"
        );

        // 封面只接受图片
        let video = padded(MP4_HEADER, 64);
        let payload = multipart_payload(&[Part::File("sampul.mp4", &video)], 1024);
        let response = read_upload(payload, IMAGE_EXTENSIONS, drive::FEATURED_IMAGE_MAX_SIZE)
            .await
            .unwrap_err();
        assert!(rejection_message(response).await.starts_with("File type not allowed"));
    }
}
