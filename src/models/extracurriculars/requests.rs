use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct ExtracurricularListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct ExtracurricularRequest {
    pub name: String,
    pub description: Option<String>,
    pub photo: Option<String>,
}

impl ExtracurricularRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Extracurricular activity name is required.".into());
        }
        check_length(&self.name, 1, 255, "Activity name cannot exceed 255 characters.")?;
        check_max(
            self.description.as_deref(),
            2000,
            "Description cannot exceed 2000 characters.",
        )?;
        Ok(())
    }
}

// 为课外活动分配学生
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/extracurricular.ts")]
pub struct AssignStudentsRequest {
    #[serde(default)]
    pub student_ids: Vec<i64>,
}

impl AssignStudentsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.student_ids.is_empty() {
            return Err("At least one student must be selected for assignment.".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let request = ExtracurricularRequest {
            name: "  ".into(),
            description: None,
            photo: None,
        };
        assert_eq!(
            request.validate().unwrap_err(),
            "Extracurricular activity name is required."
        );
    }

    #[test]
    fn test_assign_requires_students() {
        let request = AssignStudentsRequest { student_ids: vec![] };
        assert!(request.validate().is_err());
    }
}
