use crate::utils::validate::check_length;
use serde::Deserialize;
use ts_rs::TS;

// 管理员创建/更新文档类型
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemRequest {
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
}

impl WorkItemRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.name, 1, 255, "Work item name is required and cannot exceed 255 characters.")?;
        Ok(())
    }
}

// 教师创建的可选文档类型
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TeacherWorkItemRequest {
    pub name: String,
}

impl TeacherWorkItemRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.name, 1, 255, "Work item name is required and cannot exceed 255 characters.")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct InitializeFoldersRequest {
    pub teacher_id: i64,
    pub subject_id: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkLookupQuery {
    pub teacher_id: i64,
    pub subject_id: i64,
    pub work_item_id: i64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct FileMetadataQuery {
    pub file_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    #[default]
    View,
    Download,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TrackAccessRequest {
    #[serde(default)]
    pub action: AccessAction,
}

// 存储层使用的新教学文档数据
#[derive(Debug, Clone)]
pub struct NewWorkFile {
    pub teacher_subject_work_id: i64,
    pub file_name: String,
    pub file_url: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
}
