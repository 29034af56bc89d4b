use crate::models::common::PaginationQuery;
use crate::utils::validate::validate_page_slug;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct PageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/page.ts")]
pub struct PageRequest {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(default)]
    pub remove_image: bool,
}

impl PageRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_page_slug(&self.slug)?;
        if self.title.trim().is_empty() {
            return Err("The page title is required.".into());
        }
        if self.title.chars().count() > 255 {
            return Err("The page title may not be greater than 255 characters.".into());
        }
        if self.content.trim().is_empty() {
            return Err("The page content is required.".into());
        }
        if self.content.chars().count() > 50000 {
            return Err("The page content may not exceed 50,000 characters.".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rules() {
        let mut request = PageRequest {
            slug: "visi-misi".into(),
            title: "Visi & Misi".into(),
            content: "Menjadi sekolah unggul".into(),
            image: None,
            remove_image: false,
        };
        assert!(request.validate().is_ok());
        request.slug = "Visi Misi".into();
        assert_eq!(
            request.validate().unwrap_err(),
            "The slug may only contain lowercase letters, numbers, and dashes."
        );
        request.slug = "visi".into();
        request.content = "x".repeat(50001);
        assert!(request.validate().is_err());
    }
}
