use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::drive::LocalDriveClient;
use crate::errors::{Result, SchoolSysError};
use crate::models::files::entities::{FileCategory, is_safe_stored_name};
use crate::services::{drive_client, error_response, invalid};
use crate::utils::file_magic::mime_for_extension;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

pub(crate) fn resolve_upload(dir: &Path, category: &str, name: &str) -> Result<PathBuf> {
    let category = category.parse::<FileCategory>().map_err(invalid)?;
    if !is_safe_stored_name(name) {
        return Err(invalid("Invalid file name"));
    }
    let path = dir.join(category.as_str()).join(name);
    if !path.is_file() {
        return Err(SchoolSysError::not_found("File not found"));
    }
    Ok(path)
}

async fn file_response(path: PathBuf) -> ActixResult<HttpResponse> {
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) => {
            return Ok(error_response(&SchoolSysError::file_operation(format!(
                "Failed to read {}: {e}",
                path.display()
            ))));
        }
    };
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, mime_for_extension(&extension_of(&path))))
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
        .body(data))
}

pub async fn serve_upload(category: String, name: String) -> ActixResult<HttpResponse> {
    let dir = PathBuf::from(&AppConfig::get().upload.dir);
    match resolve_upload(&dir, &category, &name) {
        Ok(path) => file_response(path).await,
        Err(e) => Ok(error_response(&e)),
    }
}

/// 本地 Drive 后端的文件访问，Google Drive 启用时不提供
pub async fn serve_drive_file(path: String, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let client = drive_client(request)?;
    if client.backend() != "local" {
        return Ok(error_response(&SchoolSysError::not_found("File not found")));
    }
    let local = LocalDriveClient::new(format!("{}/drive", AppConfig::get().upload.dir));
    match local.resolve(&path) {
        Ok(full_path) if full_path.is_file() => file_response(full_path).await,
        Ok(_) => Ok(error_response(&SchoolSysError::not_found("File not found"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_upload_rejects_bad_paths() {
        let dir = std::env::temp_dir().join(format!("schoolsys-serve-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("pages")).unwrap();
        std::fs::write(dir.join("pages").join("1-a.jpg"), b"x").unwrap();

        assert!(resolve_upload(&dir, "pages", "1-a.jpg").is_ok());
        assert_eq!(resolve_upload(&dir, "pages", "2-b.jpg").unwrap_err().code(), "E008");
        assert!(resolve_upload(&dir, "secrets", "1-a.jpg").is_err());
        assert!(resolve_upload(&dir, "pages", "..").is_err());

        std::fs::remove_dir_all(dir).ok();
    }
}
