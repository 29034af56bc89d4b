use super::entities::{UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_email, validate_password};
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: UserRole,
}

// 用户更新请求（密码留空则不修改）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: Option<UserStatus>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

// 批量删除用户请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct BulkDeleteUsersRequest {
    pub user_ids: Vec<i64>,
}

// 存储层使用的新用户数据（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

// 存储层使用的用户更新数据
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: Option<UserStatus>,
    pub password_hash: Option<String>,
}

fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if len == 0 || len > 255 {
        return Err("The name field is required and may not exceed 255 characters.".into());
    }
    Ok(())
}

fn validate_new_password(password: &str, confirmation: &str) -> Result<(), String> {
    if password != confirmation {
        return Err("The password confirmation does not match.".into());
    }
    let result = validate_password(password);
    if !result.is_valid {
        return Err(result.error_message());
    }
    Ok(())
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_new_password(&self.password, &self.password_confirmation)
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        match self.password.as_deref() {
            Some(password) if !password.is_empty() => validate_new_password(
                password,
                self.password_confirmation.as_deref().unwrap_or_default(),
            ),
            _ => Ok(()),
        }
    }

    // 需要修改的新密码
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(password: &str, confirmation: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Siti Aminah".into(),
            email: "siti@school.sch.id".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
            role: UserRole::Teacher,
        }
    }

    #[test]
    fn test_create_requires_matching_confirmation() {
        assert!(create_request("Secure123", "Secure123").validate().is_ok());
        let err = create_request("Secure123", "Secure124").validate().unwrap_err();
        assert_eq!(err, "The password confirmation does not match.");
    }

    #[test]
    fn test_update_without_password_skips_policy() {
        let request = UpdateUserRequest {
            name: "Budi".into(),
            email: "budi@school.sch.id".into(),
            role: UserRole::Headmaster,
            status: None,
            password: Some(String::new()),
            password_confirmation: None,
        };
        assert!(request.validate().is_ok());
        assert!(request.new_password().is_none());
    }
}
