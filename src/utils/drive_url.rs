use once_cell::sync::Lazy;
use regex::Regex;

static LH3_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"lh3\.googleusercontent\.com/d/([a-zA-Z0-9\-_]+)").unwrap());
static FILE_D_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9\-_]+)").unwrap());
static QUERY_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"drive\.google\.com/(?:thumbnail|uc|open)\?(?:.*&)?id=([a-zA-Z0-9\-_]+)").unwrap()
});
static RAW_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-_]{25,}$").unwrap());

/// 从各种 Google Drive 链接中提取文件ID
pub fn extract_file_id(url: &str) -> Option<String> {
    for re in [&*LH3_RE, &*FILE_D_RE, &*QUERY_ID_RE] {
        if let Some(caps) = re.captures(url) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
    }
    if RAW_ID_RE.is_match(url) {
        return Some(url.to_string());
    }
    None
}

pub fn is_google_drive_url(url: &str) -> bool {
    url.contains("googleusercontent.com") || url.contains("drive.google.com")
}

pub fn is_blob_url(url: &str) -> bool {
    url.starts_with("blob:")
}

pub fn lh3_url(file_id: &str) -> String {
    format!("https://lh3.googleusercontent.com/d/{file_id}")
}

pub fn thumbnail_url(file_id: &str) -> String {
    format!("https://lh3.googleusercontent.com/d/{file_id}=w600-h400-c")
}

pub fn view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}

pub fn download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?id={file_id}&export=download")
}

/// 清理 Drive 文件夹名称中的非法字符并折叠空白
pub fn sanitize_folder_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '"' | '*' | ':' | '<' | '>' | '?' | '|' | '/' | '\\'))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 生成唯一文件名：`{slug(base)}-{unix time}.{ext}`
pub fn unique_file_name(original_name: &str, timestamp: i64) -> String {
    let path = std::path::Path::new(original_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut base = super::slug::slugify(stem);
    if base.is_empty() {
        base = "file".to_string();
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{base}-{timestamp}.{}", ext.to_lowercase()),
        None => format!("{base}-{timestamp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz_-0";

    #[test]
    fn test_extract_file_id_formats() {
        assert_eq!(extract_file_id(&lh3_url(ID)).as_deref(), Some(ID));
        assert_eq!(extract_file_id(&view_url(ID)).as_deref(), Some(ID));
        assert_eq!(extract_file_id(&download_url(ID)).as_deref(), Some(ID));
        assert_eq!(
            extract_file_id(&format!("https://drive.google.com/thumbnail?id={ID}&sz=w400")).as_deref(),
            Some(ID)
        );
        assert_eq!(extract_file_id(ID).as_deref(), Some(ID));
        assert_eq!(extract_file_id("short-id"), None);
        assert_eq!(extract_file_id("/uploads/staff/a.jpg"), None);
    }

    #[test]
    fn test_sanitize_folder_name() {
        assert_eq!(sanitize_folder_name("HUT RI: \"Lomba\"  17/08 "), "HUT RI Lomba 1708");
    }

    #[test]
    fn test_unique_file_name() {
        assert_eq!(
            unique_file_name("Foto Upacara.JPG", 1_700_000_000),
            "foto-upacara-1700000000.jpg"
        );
        assert_eq!(unique_file_name("!!!", 1), "file-1");
    }

    #[test]
    fn test_url_kinds() {
        assert!(is_google_drive_url(&lh3_url(ID)));
        assert!(!is_google_drive_url("blob:http://localhost/abc"));
        assert!(is_blob_url("blob:http://localhost/abc"));
    }
}
