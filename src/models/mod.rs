pub mod activities;
pub mod auth;
pub mod classes;
pub mod common;
pub mod contacts;
pub mod dashboard;
pub mod events;
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

use serde::Serialize;
use ts_rs::TS;

pub use common::{
    ApiResponse, BulkDeleteResponse, IdsRequest, PaginatedResponse, PaginationInfo, PaginationQuery,
};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/error_code.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    ValidationFailed = 1022,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    ExternalServiceError = 1502,

    // 认证
    AuthFailed = 2000,
    AccountInactive = 2001,

    // 文件
    FileNotFound = 3000,
    FileUploadFailed = 3001,
    FileTypeNotAllowed = 3002,
    FileSizeExceeded = 3003,
    MultifileUploadNotAllowed = 3004,
}
