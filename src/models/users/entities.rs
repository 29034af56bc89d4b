use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    SuperAdmin,       // 超级管理员
    Headmaster,       // 校长
    DeputyHeadmaster, // 副校长
    Teacher,          // 教师
}

impl UserRole {
    pub const SUPER_ADMIN: &'static str = "super_admin";
    pub const HEADMASTER: &'static str = "headmaster";
    pub const DEPUTY_HEADMASTER: &'static str = "deputy_headmaster";
    pub const TEACHER: &'static str = "teacher";

    pub fn super_admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin]
    }
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Headmaster]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[
            &Self::SuperAdmin,
            &Self::Headmaster,
            &Self::DeputyHeadmaster,
            &Self::Teacher,
        ]
    }

    pub fn is_admin(&self) -> bool {
        Self::admin_roles().contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => Self::SUPER_ADMIN,
            UserRole::Headmaster => Self::HEADMASTER,
            UserRole::DeputyHeadmaster => Self::DEPUTY_HEADMASTER,
            UserRole::Teacher => Self::TEACHER,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: super_admin, headmaster, deputy_headmaster, teacher"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::SUPER_ADMIN => Ok(UserRole::SuperAdmin),
            Self::HEADMASTER => Ok(UserRole::Headmaster),
            Self::DEPUTY_HEADMASTER => Ok(UserRole::DeputyHeadmaster),
            Self::TEACHER => Ok(UserRole::Teacher),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,   // 正常
    Inactive, // 停用
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(UserRole::Headmaster.is_admin());
        assert!(!UserRole::DeputyHeadmaster.is_admin());
        assert!(!UserRole::Teacher.is_admin());
        assert_eq!(UserRole::staff_roles().len(), 4);
        assert_eq!(UserRole::super_admin_roles(), &[&UserRole::SuperAdmin]);
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in UserRole::staff_roles() {
            assert_eq!(role.to_string().parse::<UserRole>().as_ref(), Ok(*role));
        }
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let role: UserRole = serde_json::from_str("\"deputy_headmaster\"").unwrap();
        assert_eq!(role, UserRole::DeputyHeadmaster);
        assert!(serde_json::from_str::<UserRole>("\"student\"").is_err());
    }
}
