use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/facility.ts")]
pub struct FacilityListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/facility.ts")]
pub struct FacilityRequest {
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    #[serde(default)]
    pub remove_image: bool,
}

impl FacilityRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("The facility name is required.".into());
        }
        if self.name.chars().count() > 255 {
            return Err("The facility name may not be greater than 255 characters.".into());
        }
        if self.description.trim().is_empty() {
            return Err("The facility description is required.".into());
        }
        if self.description.chars().count() > 5000 {
            return Err(
                "The facility description may not be greater than 5000 characters.".into(),
            );
        }
        Ok(())
    }
}
