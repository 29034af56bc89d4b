use super::entities::Post;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 文章（附带作者名）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
pub struct PostWithAuthor {
    #[serde(flatten)]
    #[ts(flatten)]
    pub post: Post,
    pub author_name: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/post.ts")]
pub struct PostListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<PostWithAuthor>,
}
