use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

// 本地照片存储的分类目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Staff,
    Students,
    Posts,
    Pages,
    Facilities,
    Extracurriculars,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Staff => "staff",
            FileCategory::Students => "students",
            FileCategory::Posts => "posts",
            FileCategory::Pages => "pages",
            FileCategory::Facilities => "facilities",
            FileCategory::Extracurriculars => "extracurriculars",
        }
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(FileCategory::Staff),
            "students" => Ok(FileCategory::Students),
            "posts" => Ok(FileCategory::Posts),
            "pages" => Ok(FileCategory::Pages),
            "facilities" => Ok(FileCategory::Facilities),
            "extracurriculars" => Ok(FileCategory::Extracurriculars),
            _ => Err(format!("Unknown file category: {s}")),
        }
    }
}

/// 存储文件名只允许 `{时间戳}-{uuid}.{扩展名}` 这类安全字符
pub fn is_safe_stored_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("posts".parse::<FileCategory>().unwrap(), FileCategory::Posts);
        assert!("../etc".parse::<FileCategory>().is_err());
    }

    #[test]
    fn test_safe_stored_name() {
        assert!(is_safe_stored_name("1700000000-3f2a.jpg"));
        assert!(!is_safe_stored_name("../secret"));
        assert!(!is_safe_stored_name(".env"));
        assert!(!is_safe_stored_name("a/b.jpg"));
    }
}
