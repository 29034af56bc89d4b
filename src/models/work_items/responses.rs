use super::entities::{TeacherWorkFile, WorkItem};
use crate::models::staff::entities::Staff;
use crate::models::subjects::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

// 单个文档类型的完成情况
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemCompletion {
    pub work_item: String,
    pub completion_count: i64,
    pub total_teachers: i64,
    pub completion_rate: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemStats {
    pub total_teachers: i64,
    pub total_work_items: i64,
    pub total_expected_submissions: i64,
    pub completed_submissions: i64,
    pub overall_completion_rate: f64,
    pub work_item_stats: Vec<WorkItemCompletion>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TeacherWithSubjects {
    #[serde(flatten)]
    #[ts(flatten)]
    pub staff: Staff,
    pub subjects: Vec<Subject>,
}

// 管理员视图
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct AdminWorkOverview {
    pub work_items: Vec<WorkItem>,
    pub teachers: Vec<TeacherWithSubjects>,
    pub stats: WorkItemStats,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemProgress {
    pub work_item: WorkItem,
    pub teacher_subject_work_id: Option<i64>,
    pub has_folder: bool,
    pub files_count: i64,
    pub files: Vec<TeacherWorkFile>,
    pub folder_url: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct SubjectProgress {
    pub subject: Subject,
    pub total_work_items: i64,
    pub completed_work_items: i64,
    pub completion_percentage: f64,
    pub work_items: Vec<WorkItemProgress>,
}

// 教师视图
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TeacherWorkOverview {
    pub teacher: Staff,
    pub progress: Vec<SubjectProgress>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkFolder {
    pub work_item_id: i64,
    pub name: String,
    pub folder_id: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct InitializeFoldersResponse {
    pub subject_folder_id: String,
    pub teacher_folder_id: String,
    pub work_item_folders: Vec<WorkFolder>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkLookupResponse {
    pub teacher_subject_work_id: i64,
    pub gdrive_folder_id: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct TrackAccessResponse {
    pub views: i32,
    pub downloads: i32,
    pub last_accessed: Option<chrono::DateTime<chrono::Utc>>,
}
