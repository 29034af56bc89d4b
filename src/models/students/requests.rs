use super::entities::{Gender, StudentStatus};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max, validate_phone};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use ts_rs::TS;

// 学生列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub gender: Option<Gender>,
    pub class: Option<String>,
    pub status: Option<StudentStatus>,
}

// 创建/更新学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentRequest {
    pub nisn: String,
    pub name: String,
    pub gender: Gender,
    pub birth_date: String,
    pub birth_place: Option<String>,
    pub religion: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub class: String,
    pub homeroom_teacher_id: Option<i64>,
    pub entry_year: i32,
    pub graduation_year: Option<i32>,
    pub status: StudentStatus,
    pub photo: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub extracurricular_ids: Vec<i64>,
}

impl StudentRequest {
    /// 校验字段；`today` 由调用方传入以便测试
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        check_length(&self.nisn, 1, 20, "NISN is required and cannot exceed 20 characters.")?;
        check_length(&self.name, 1, 255, "Student name is required and cannot exceed 255 characters.")?;
        let birth_date = NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d")
            .map_err(|_| "Birth date must be a valid date (YYYY-MM-DD).".to_string())?;
        if birth_date > today {
            return Err("Birth date cannot be in the future.".into());
        }
        check_max(self.birth_place.as_deref(), 255, "Birth place cannot exceed 255 characters.")?;
        check_max(self.religion.as_deref(), 50, "Religion cannot exceed 50 characters.")?;
        check_max(self.address.as_deref(), 500, "Address cannot exceed 500 characters.")?;
        check_max(self.parent_name.as_deref(), 255, "Parent name cannot exceed 255 characters.")?;
        if let Some(phone) = self.parent_phone.as_deref().filter(|p| !p.is_empty()) {
            validate_phone(phone)?;
        }
        check_length(&self.class, 1, 50, "Class is required and cannot exceed 50 characters.")?;

        let current_year = today.year();
        if self.entry_year < 1900 || self.entry_year > current_year + 10 {
            return Err(format!(
                "Entry year must be between 1900 and {}.",
                current_year + 10
            ));
        }
        if let Some(graduation_year) = self.graduation_year {
            if graduation_year < current_year || graduation_year > current_year + 10 {
                return Err(format!(
                    "Graduation year must be between {current_year} and {}.",
                    current_year + 10
                ));
            }
            if graduation_year < self.entry_year {
                return Err("Graduation year cannot be before entry year.".into());
            }
        }
        check_max(self.notes.as_deref(), 2000, "Notes cannot exceed 2000 characters.")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn request() -> StudentRequest {
        StudentRequest {
            nisn: "0081234567".into(),
            name: "Budi Santoso".into(),
            gender: Gender::Male,
            birth_date: "2012-04-17".into(),
            birth_place: Some("Bandung".into()),
            religion: None,
            address: None,
            parent_name: None,
            parent_phone: Some("+62 812-3456-7890".into()),
            class: "7A".into(),
            homeroom_teacher_id: None,
            entry_year: 2024,
            graduation_year: Some(2027),
            status: StudentStatus::Active,
            photo: None,
            notes: None,
            extracurricular_ids: vec![],
        }
    }

    #[test]
    fn test_valid_student() {
        assert!(request().validate(today()).is_ok());
    }

    #[test]
    fn test_birth_date_rules() {
        let mut r = request();
        r.birth_date = "17-04-2012".into();
        assert!(r.validate(today()).is_err());
        r.birth_date = "2026-01-01".into();
        assert_eq!(
            r.validate(today()).unwrap_err(),
            "Birth date cannot be in the future."
        );
    }

    #[test]
    fn test_year_rules() {
        let mut r = request();
        r.entry_year = 1899;
        assert!(r.validate(today()).is_err());
        r.entry_year = 2024;
        r.graduation_year = Some(2024);
        assert_eq!(
            r.validate(today()).unwrap_err(),
            "Graduation year must be between 2025 and 2035."
        );
        r.graduation_year = None;
        assert!(r.validate(today()).is_ok());
    }
}
