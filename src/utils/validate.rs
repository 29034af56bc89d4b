use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\+]?[\d\s\-\(\)]{7,20}$").expect("Invalid phone regex"));

static PAGE_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("Invalid slug regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if email.len() > 255 || !EMAIL_RE.is_match(email) {
        return Err("Please provide a valid email address.");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.len() > 20 || !PHONE_RE.is_match(phone) {
        return Err("Please provide a valid phone number format.");
    }
    Ok(())
}

pub fn validate_page_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("The page slug is required.");
    }
    if slug.len() > 255 || !PAGE_SLUG_RE.is_match(slug) {
        return Err("The slug may only contain lowercase letters, numbers, and dashes.");
    }
    Ok(())
}

/// 按字符数校验长度，空白字符串视为缺失
pub fn check_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), &'static str> {
    let len = value.trim().chars().count();
    if len == 0 || len < min || len > max {
        return Err(message);
    }
    Ok(())
}

/// 可选字段的最大长度校验
pub fn check_max(value: Option<&str>, max: usize, message: &'static str) -> Result<(), &'static str> {
    match value {
        Some(v) if v.chars().count() > max => Err(message),
        _ => Ok(()),
    }
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_format() {
        assert!(validate_phone("+62 812-3456-7890").is_ok());
        assert!(validate_phone("(021) 555 1234").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("0812abc4567").is_err());
    }

    #[test]
    fn test_page_slug_format() {
        assert!(validate_page_slug("about-us").is_ok());
        assert!(validate_page_slug("visi-misi-2025").is_ok());
        assert!(validate_page_slug("About Us").is_err());
        assert!(validate_page_slug("").is_err());
    }

    #[test]
    fn test_length_checks() {
        assert!(check_length("  ", 1, 10, "required").is_err());
        assert!(check_length("A", 2, 10, "too short").is_err());
        assert!(check_length("Guru", 2, 10, "ok").is_ok());
        assert!(check_max(None, 5, "too long").is_ok());
        assert!(check_max(Some("abcdef"), 5, "too long").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
