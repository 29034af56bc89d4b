use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::path::Path;

use super::file_magic::{mime_for_extension, validate_magic_bytes};
use crate::models::ErrorCode;

/// 上传规则
#[derive(Debug, Clone, Copy)]
pub struct UploadRules<'a> {
    /// 允许的扩展名（包含点号）
    pub allowed_extensions: &'a [&'a str],
    /// 最大字节数
    pub max_size: usize,
}

pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
pub const GALLERY_MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".mp4", ".mov", ".avi", ".mkv", ".webm",
];
pub const WORK_FILE_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".jpg", ".jpeg", ".png", ".zip",
    ".txt", ".csv",
];

/// 已读入内存的单个上传文件
#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: String,
    /// 小写扩展名，包含点号
    pub extension: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// 文件之外的普通表单字段
    pub fields: HashMap<String, String>,
}

impl UploadedFile {
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }
}

/// 上传校验失败
#[derive(Debug, Clone, PartialEq)]
pub struct UploadError {
    pub code: ErrorCode,
    pub message: String,
}

impl UploadError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// 最长的文件头签名（RIFF....WEBP）
const MAGIC_HEADER_LEN: usize = 12;

fn ensure_magic_bytes(data: &[u8], extension: &str) -> Result<(), UploadError> {
    if validate_magic_bytes(data, extension) {
        Ok(())
    } else {
        Err(UploadError::new(
            ErrorCode::FileTypeNotAllowed,
            "File content does not match its extension",
        ))
    }
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 读取 multipart 中唯一的 `file` 字段并校验扩展名、魔术字节与大小
pub async fn read_single_file(
    mut payload: Multipart,
    rules: UploadRules<'_>,
) -> Result<UploadedFile, UploadError> {
    let mut uploaded: Option<UploadedFile> = None;
    let mut fields = HashMap::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| {
                    UploadError::new(ErrorCode::BadRequest, format!("Invalid form data: {e}"))
                })?;
                value.extend_from_slice(&data);
                if value.len() > 64 * 1024 {
                    return Err(UploadError::new(ErrorCode::BadRequest, "Form field too large"));
                }
            }
            fields.insert(name, String::from_utf8_lossy(&value).into_owned());
            continue;
        }

        if uploaded.is_some() {
            return Err(UploadError::new(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = extension_of(&original_name);
        if !rules.allowed_extensions.contains(&extension.as_str()) {
            return Err(UploadError::new(
                ErrorCode::FileTypeNotAllowed,
                format!(
                    "File type not allowed. Allowed types: {}",
                    rules.allowed_extensions.join(", ")
                ),
            ));
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .filter(|ct| ct != "application/octet-stream")
            .unwrap_or_else(|| mime_for_extension(&extension).to_string());

        let mut data: Vec<u8> = Vec::new();
        let mut header_checked = false;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                UploadError::new(ErrorCode::FileUploadFailed, format!("Upload interrupted: {e}"))
            })?;

            if data.len() + chunk.len() > rules.max_size {
                return Err(UploadError::new(
                    ErrorCode::FileSizeExceeded,
                    format!(
                        "File size exceeds the limit of {} MB",
                        rules.max_size / (1024 * 1024)
                    ),
                ));
            }
            data.extend_from_slice(&chunk);

            // 凑够文件头后校验魔术字节
            if !header_checked && data.len() >= MAGIC_HEADER_LEN {
                header_checked = true;
                ensure_magic_bytes(&data, &extension)?;
            }
        }

        if data.is_empty() {
            return Err(UploadError::new(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
        }
        if !header_checked {
            ensure_magic_bytes(&data, &extension)?;
        }

        uploaded = Some(UploadedFile {
            original_name,
            extension,
            content_type,
            data,
            fields: HashMap::new(),
        });
    }

    let mut file = uploaded.ok_or_else(|| {
        UploadError::new(ErrorCode::FileNotFound, "No file found in upload payload")
    })?;
    file.fields = fields;
    Ok(file)
}

/// 可读的文件大小
pub fn format_file_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    let size = bytes as f64;
    if size >= KB * KB * KB {
        format!("{:.2} GB", size / (KB * KB * KB))
    } else if size >= KB * KB {
        format!("{:.2} MB", size / (KB * KB))
    } else if size >= KB {
        format!("{:.2} KB", size / KB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;

    const BOUNDARY: &str = "schoolsys-form-boundary";

    pub(crate) const WEBP_HEADER: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
    pub(crate) const MP4_HEADER: &[u8] = b"\x00\x00\x00\x18ftypmp42";
    pub(crate) const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    pub(crate) enum Part<'a> {
        Field(&'a str, &'a str),
        File(&'a str, &'a [u8]),
    }

    /// 指定文件头并填充到给定大小
    pub(crate) fn padded(header: &[u8], size: usize) -> Vec<u8> {
        let mut data = header.to_vec();
        data.resize(size, 0);
        data
    }

    /// 构造 multipart 请求体并按 chunk_size 切分到达
    pub(crate) fn multipart_payload(parts: &[Part<'_>], chunk_size: usize) -> Multipart {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Field(name, value) => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                ),
                Part::File(file_name, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}")).unwrap(),
        );
        let chunks: Vec<Result<Bytes, PayloadError>> = body
            .chunks(chunk_size.max(1))
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Multipart::new(&headers, futures_util::stream::iter(chunks))
    }

    fn image_rules() -> UploadRules<'static> {
        UploadRules {
            allowed_extensions: IMAGE_EXTENSIONS,
            max_size: 1024 * 1024,
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Foto.JPG"), ".jpg");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[actix_web::test]
    async fn test_header_split_across_small_chunks() {
        let data = padded(WEBP_HEADER, 64);
        let payload = multipart_payload(
            &[Part::Field("caption", "Upacara Bendera"), Part::File("upacara.webp", &data)],
            3,
        );
        let file = read_single_file(payload, image_rules()).await.unwrap();
        assert_eq!(file.extension, ".webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.data, data);
        assert_eq!(file.fields["caption"], "Upacara Bendera");

        let video = padded(MP4_HEADER, 40);
        let payload = multipart_payload(&[Part::File("pentas.mp4", &video)], 5);
        let rules = UploadRules {
            allowed_extensions: GALLERY_MEDIA_EXTENSIONS,
            max_size: 1024,
        };
        assert!(read_single_file(payload, rules).await.is_ok());
    }

    #[actix_web::test]
    async fn test_rejects_disallowed_extension() {
        let payload = multipart_payload(&[Part::File("setup.exe", b"MZ\x90\x00")], 1024);
        let err = read_single_file(payload, image_rules()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTypeNotAllowed);
        assert!(err.message.starts_with("File type not allowed"));
    }

    #[actix_web::test]
    async fn test_rejects_content_not_matching_extension() {
        let jpeg = padded(&[0xFF, 0xD8, 0xFF, 0xE0], 32);
        let payload = multipart_payload(&[Part::File("foto.png", &jpeg)], 1024);
        let err = read_single_file(payload, image_rules()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTypeNotAllowed);
        assert_eq!(err.message, "File content does not match its extension");

        // 比签名还短的文件在读完后校验
        let payload = multipart_payload(&[Part::File("kecil.webp", b"RIFF")], 1024);
        let err = read_single_file(payload, image_rules()).await.unwrap_err();
        assert_eq!(err.message, "File content does not match its extension");
    }

    #[actix_web::test]
    async fn test_rejects_oversized_and_multiple_files() {
        let rules = UploadRules {
            allowed_extensions: IMAGE_EXTENSIONS,
            max_size: 2 * 1024 * 1024,
        };
        let data = padded(PNG_HEADER, 2 * 1024 * 1024 + 1);
        let payload = multipart_payload(&[Part::File("besar.png", &data)], 64 * 1024);
        let err = read_single_file(payload, rules).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileSizeExceeded);
        assert_eq!(err.message, "File size exceeds the limit of 2 MB");

        let data = padded(PNG_HEADER, 16);
        let payload = multipart_payload(
            &[Part::File("a.png", &data), Part::File("b.png", &data)],
            1024,
        );
        let err = read_single_file(payload, rules).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MultifileUploadNotAllowed);

        let payload = multipart_payload(&[Part::Field("caption", "tanpa file")], 1024);
        let err = read_single_file(payload, rules).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }
}
