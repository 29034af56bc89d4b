use crate::utils::validate::check_length;
use serde::Deserialize;
use ts_rs::TS;

// 分配班主任 / 批量同步学生班主任
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomAssignRequest {
    pub staff_id: i64,
    pub class_name: String,
}

impl HomeroomAssignRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.class_name, 1, 50, "Class name is required.")?;
        Ok(())
    }
}

// 撤销班主任
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/homeroom.ts")]
pub struct HomeroomRemoveRequest {
    pub staff_id: i64,
}
