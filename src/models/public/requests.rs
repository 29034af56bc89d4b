use crate::models::common::PaginationQuery;
use crate::models::posts::entities::PostCategory;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct NewsQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub category: Option<PostCategory>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct GalleryQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

impl NewsQuery {
    /// 缓存键片段
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.pagination.page(),
            self.category.map(|c| c.as_str()).unwrap_or("all"),
            self.search.as_deref().unwrap_or_default()
        )
    }
}

impl GalleryQuery {
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}",
            self.pagination.page(),
            self.search.as_deref().unwrap_or_default()
        )
    }
}
