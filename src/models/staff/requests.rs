use super::entities::StaffDivision;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max, validate_email, validate_phone};
use serde::Deserialize;
use ts_rs::TS;

// 教职工列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    // 逗号分隔的部门列表
    pub divisions: Option<String>,
}

impl StaffListParams {
    pub fn division_filter(&self) -> Result<Vec<String>, String> {
        let divisions: Vec<String> = self
            .divisions
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if divisions.iter().any(|d| !StaffDivision::is_valid(d)) {
            return Err("Invalid division selected.".into());
        }
        Ok(divisions)
    }
}

// 创建/更新教职工请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffRequest {
    pub name: String,
    pub position: String,
    pub division: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    // 已上传照片的路径
    pub photo: Option<String>,
    pub homeroom_class: Option<String>,
    pub user_id: Option<i64>,
}

impl StaffRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.name, 2, 255, "Staff name must be between 2 and 255 characters.")?;
        check_length(
            &self.position,
            2,
            255,
            "Position must be between 2 and 255 characters.",
        )?;
        if !StaffDivision::is_valid(&self.division) {
            return Err("Please select a valid division.".into());
        }
        validate_email(&self.email)?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            validate_phone(phone)?;
        }
        check_max(self.bio.as_deref(), 5000, "Biography cannot exceed 5000 characters.")?;
        Ok(())
    }
}

// 分配科目（同步）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct AssignSubjectsRequest {
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

// 创建/更新职务履历
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct PositionHistoryRequest {
    pub staff_id: i64,
    pub title: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
}

impl PositionHistoryRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(
            &self.title,
            2,
            255,
            "Position title must be between 2 and 255 characters.",
        )?;
        if self.start_year < 1900 {
            return Err("Start year cannot be earlier than 1900.".into());
        }
        if self.start_year > 2100 {
            return Err("Start year cannot be later than 2100.".into());
        }
        if let Some(end_year) = self.end_year {
            if !(1900..=2100).contains(&end_year) {
                return Err("End year must be between 1900 and 2100.".into());
            }
            if end_year < self.start_year {
                return Err("End year must be equal to or later than start year.".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_request() -> StaffRequest {
        StaffRequest {
            name: "Dewi Lestari".into(),
            position: "Guru Bahasa Indonesia".into(),
            division: "Akademik".into(),
            email: "dewi@school.sch.id".into(),
            phone: Some("+62 812 3456 789".into()),
            bio: None,
            photo: None,
            homeroom_class: None,
            user_id: None,
        }
    }

    #[test]
    fn test_staff_request_validation() {
        assert!(staff_request().validate().is_ok());

        let mut request = staff_request();
        request.division = "Perpustakaan".into();
        assert_eq!(
            request.validate().unwrap_err(),
            "Please select a valid division."
        );

        let mut request = staff_request();
        request.phone = Some("abc".into());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_division_filter() {
        let params = StaffListParams {
            pagination: PaginationQuery::default(),
            search: None,
            divisions: Some("Akademik, Tata Usaha".into()),
        };
        assert_eq!(
            params.division_filter().unwrap(),
            vec!["Akademik".to_string(), "Tata Usaha".to_string()]
        );
    }

    #[test]
    fn test_position_history_years() {
        let mut request = PositionHistoryRequest {
            staff_id: 1,
            title: "Wakil Kepala Sekolah".into(),
            start_year: 2015,
            end_year: Some(2020),
        };
        assert!(request.validate().is_ok());
        request.end_year = Some(2010);
        assert_eq!(
            request.validate().unwrap_err(),
            "End year must be equal to or later than start year."
        );
        request.start_year = 1800;
        assert!(request.validate().is_err());
    }
}
