pub mod activities;
pub mod auth;
pub mod classes;
pub mod contacts;
pub mod dashboard;
pub mod extracurriculars;
pub mod facilities;
pub mod files;
pub mod galleries;
pub mod google_drive;
pub mod homeroom;
pub mod pages;
pub mod posts;
pub mod public;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod users;
pub mod work_items;

pub use activities::ActivityService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use contacts::ContactService;
pub use dashboard::DashboardService;
pub use extracurriculars::ExtracurricularService;
pub use facilities::FacilityService;
pub use files::FileService;
pub use galleries::GalleryService;
pub use google_drive::GoogleDriveService;
pub use homeroom::HomeroomService;
pub use pages::PageService;
pub use posts::PostService;
pub use public::PublicService;
pub use staff::StaffService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use users::UserService;
pub use work_items::WorkItemService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use serde::Serialize;
use std::sync::Arc;
use ts_rs::TS;

use crate::cache::ObjectCache;
use crate::drive::{DriveClient, DriveTokenManager};
use crate::errors::{Result, SchoolSysError};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::multipart::UploadError;

/// 定义带惰性存储的服务结构体
///
/// 服务在路由中以 `Lazy` 静态变量存在，存储从请求的 app_data 中获取
macro_rules! define_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => $crate::services::app_data::<std::sync::Arc<dyn $crate::storage::Storage>>(
                        request, "Storage",
                    ),
                }
            }
        }
    };
}
pub(crate) use define_service;

// 从 app_data 中取出共享组件
pub(crate) fn app_data<T: Clone + 'static>(request: &HttpRequest, name: &str) -> ActixResult<T> {
    request
        .app_data::<web::Data<T>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("{} not found in app data", name);
            actix_web::error::ErrorInternalServerError(format!("{name} not configured"))
        })
}

pub(crate) fn drive_client(request: &HttpRequest) -> ActixResult<Arc<dyn DriveClient>> {
    app_data::<Arc<dyn DriveClient>>(request, "Drive client")
}

pub(crate) fn drive_tokens(request: &HttpRequest) -> ActixResult<Arc<DriveTokenManager>> {
    app_data::<Arc<DriveTokenManager>>(request, "Drive token manager")
}

pub(crate) fn object_cache(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    app_data::<Arc<dyn ObjectCache>>(request, "Cache")
}

// 业务错误对应的 HTTP 状态与错误码
fn classify_error(err: &SchoolSysError) -> (StatusCode, ErrorCode) {
    match err {
        SchoolSysError::Validation(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::ValidationFailed)
        }
        SchoolSysError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        SchoolSysError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
        SchoolSysError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        SchoolSysError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::AuthFailed),
        SchoolSysError::ExternalService(_) => {
            (StatusCode::BAD_GATEWAY, ErrorCode::ExternalServiceError)
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

pub(crate) fn error_response(err: &SchoolSysError) -> HttpResponse {
    let (status, code) = classify_error(err);
    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

// 上传校验失败统一返回 400
pub(crate) fn upload_error_response(err: UploadError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(err.code, err.message))
}

pub(crate) fn respond_with<T: Serialize + TS>(
    status: StatusCode,
    result: Result<T>,
    message: &str,
) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(data) => HttpResponse::build(status).json(ApiResponse::success(data, message)),
        Err(e) => error_response(&e),
    })
}

pub(crate) fn respond<T: Serialize + TS>(result: Result<T>, message: &str) -> ActixResult<HttpResponse> {
    respond_with(StatusCode::OK, result, message)
}

pub(crate) fn respond_created<T: Serialize + TS>(
    result: Result<T>,
    message: &str,
) -> ActixResult<HttpResponse> {
    respond_with(StatusCode::CREATED, result, message)
}

pub(crate) fn respond_empty(result: Result<()>, message: &str) -> ActixResult<HttpResponse> {
    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success_empty(message)),
        Err(e) => error_response(&e),
    })
}

// 请求模型校验失败
pub(crate) fn invalid(message: impl Into<String>) -> SchoolSysError {
    SchoolSysError::validation(message)
}

// Option 转换为 NotFound 错误
pub(crate) fn found<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| SchoolSysError::not_found(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (SchoolSysError::validation("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (SchoolSysError::not_found("x"), StatusCode::NOT_FOUND),
            (SchoolSysError::authorization("x"), StatusCode::FORBIDDEN),
            (SchoolSysError::external_service("x"), StatusCode::BAD_GATEWAY),
            (SchoolSysError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status);
        }
    }

    #[test]
    fn test_found_maps_missing_to_not_found() {
        assert_eq!(found(Some(3), "missing").unwrap(), 3);
        let err = found::<i64>(None, "Staff not found").unwrap_err();
        assert_eq!(err.code(), "E008");
        assert_eq!(err.message(), "Staff not found");
    }
}
