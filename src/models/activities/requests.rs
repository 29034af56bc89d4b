use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct BulkDeleteActivitiesRequest {
    #[serde(default)]
    pub activity_ids: Vec<i64>,
}
