use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教职工所属部门
pub struct StaffDivision;

impl StaffDivision {
    pub const PUBLIC_RELATIONS: &'static str = "Hubungan Masyarakat";
    pub const ADMINISTRATION: &'static str = "Tata Usaha";
    pub const SUPPORT: &'static str = "Pramubhakti";
    pub const ACADEMIC: &'static str = "Akademik";
    pub const HEADMASTER: &'static str = "Kepala Sekolah";

    pub const ALL: [&'static str; 5] = [
        Self::PUBLIC_RELATIONS,
        Self::ADMINISTRATION,
        Self::SUPPORT,
        Self::ACADEMIC,
        Self::HEADMASTER,
    ];

    pub fn is_valid(division: &str) -> bool {
        Self::ALL.contains(&division)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct Staff {
    // 教职工ID
    pub id: i64,
    // 关联的登录账号
    pub user_id: Option<i64>,
    pub name: String,
    pub slug: String,
    // 职务，如 Guru
    pub position: String,
    pub division: String,
    // 担任班主任的班级名称
    pub homeroom_class: Option<String>,
    pub photo: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Staff {
    /// 是否为学术部门的任课教师（只有这类教职工可以分配科目）
    pub fn is_academic_teacher(&self) -> bool {
        is_academic_teacher(&self.position, &self.division)
    }
}

pub fn is_academic_teacher(position: &str, division: &str) -> bool {
    let position = position.to_lowercase();
    let is_teacher = position.contains("teacher") || position.contains("guru");
    is_teacher && division.to_lowercase() == "akademik"
}

/// 是否为校长
pub fn is_principal(position: &str) -> bool {
    matches!(
        position.trim().to_lowercase().as_str(),
        "kepala sekolah" | "principal"
    )
}

// 职务履历
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct PositionHistory {
    pub id: i64,
    pub staff_id: i64,
    pub title: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_teacher_rule() {
        assert!(is_academic_teacher("Guru Matematika", "Akademik"));
        assert!(is_academic_teacher("English Teacher", "akademik"));
        assert!(!is_academic_teacher("Guru BK", "Tata Usaha"));
        assert!(!is_academic_teacher("Staff TU", "Akademik"));
    }

    #[test]
    fn test_principal_rule() {
        assert!(is_principal("Kepala Sekolah"));
        assert!(is_principal(" principal "));
        assert!(!is_principal("Guru"));
    }

    #[test]
    fn test_division_set() {
        assert!(StaffDivision::is_valid("Tata Usaha"));
        assert!(!StaffDivision::is_valid("tata usaha"));
    }
}
