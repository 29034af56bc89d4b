use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSysError};
use crate::models::files::{entities::FileCategory, responses::FileUploadResponse};
use crate::models::ApiResponse;
use crate::services::{error_response, invalid, upload_error_response};
use crate::utils::multipart::{UploadRules, UploadedFile, read_single_file};

pub const UPLOAD_URL_PREFIX: &str = "/api/v1/files/";

/// 写入 `{dir}/{category}/{时间戳}-{uuid}{扩展名}`
pub(crate) fn store_upload(
    dir: &Path,
    category: FileCategory,
    file: &UploadedFile,
) -> Result<FileUploadResponse> {
    let category_dir = dir.join(category.as_str());
    fs::create_dir_all(&category_dir).map_err(|e| {
        SchoolSysError::file_operation(format!("Failed to create upload directory: {e}"))
    })?;

    let stored_name = format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        file.extension
    );
    fs::write(category_dir.join(&stored_name), &file.data)
        .map_err(|e| SchoolSysError::file_operation(format!("Failed to write file: {e}")))?;

    let path = format!("{}/{}", category.as_str(), stored_name);
    Ok(FileUploadResponse {
        url: format!("{UPLOAD_URL_PREFIX}{path}"),
        path,
        file_name: file.original_name.clone(),
        size: file.size(),
        content_type: file.content_type.clone(),
        uploaded_at: chrono::Utc::now(),
    })
}

pub async fn handle_upload(category: String, payload: Multipart) -> ActixResult<HttpResponse> {
    let category = match category.parse::<FileCategory>() {
        Ok(category) => category,
        Err(e) => return Ok(error_response(&invalid(e))),
    };

    let config = AppConfig::get();
    let allowed: Vec<&str> = config.upload.allowed_types.iter().map(String::as_str).collect();
    let rules = UploadRules {
        allowed_extensions: &allowed,
        max_size: config.upload.max_size,
    };

    let file = match read_single_file(payload, rules).await {
        Ok(file) => file,
        Err(e) => return Ok(upload_error_response(e)),
    };

    match store_upload(Path::new(&config.upload.dir), category, &file) {
        Ok(uploaded) => {
            tracing::info!("Stored {} upload {}", category.as_str(), uploaded.path);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                uploaded,
                "File uploaded successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_store_upload_writes_into_category() {
        let dir = std::env::temp_dir().join(format!("schoolsys-upload-{}", Uuid::new_v4()));
        let file = UploadedFile {
            original_name: "kepala-sekolah.png".into(),
            extension: ".png".into(),
            content_type: "image/png".into(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
            fields: HashMap::new(),
        };

        let uploaded = store_upload(&dir, FileCategory::Staff, &file).unwrap();
        assert!(uploaded.path.starts_with("staff/"));
        assert!(uploaded.path.ends_with(".png"));
        assert_eq!(uploaded.url, format!("/api/v1/files/{}", uploaded.path));
        assert_eq!(uploaded.size, 4);
        assert!(dir.join(&uploaded.path).is_file());

        fs::remove_dir_all(dir).ok();
    }
}
