use serde::Serialize;
use ts_rs::TS;

/// 本地上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    /// 相对路径，写入业务记录的 photo/image 字段
    pub path: String,
    /// 公开访问地址
    pub url: String,
    /// 原始文件名
    pub file_name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// 文件类型
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
