use crate::models::common::PaginationQuery;
use crate::utils::validate::{check_length, check_max, validate_email, validate_phone};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_length(&self.name, 2, 255, "School name must be between 2 and 255 characters.")?;
        if self.email.trim().is_empty() {
            return Err("Email address is required.".into());
        }
        validate_email(&self.email)?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            validate_phone(phone)?;
        }
        check_max(self.address.as_deref(), 500, "Address cannot exceed 500 characters.")?;
        check_length(
            &self.message,
            10,
            5000,
            "Contact message must be between 10 and 5000 characters.",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_rules() {
        let mut request = ContactRequest {
            name: "SMP Negeri 1".into(),
            email: "info@smpn1.sch.id".into(),
            phone: Some("(022) 123-4567".into()),
            address: None,
            message: "Silakan hubungi kami pada jam kerja.".into(),
        };
        assert!(request.validate().is_ok());
        request.phone = Some("abc".into());
        assert_eq!(
            request.validate().unwrap_err(),
            "Please provide a valid phone number format."
        );
        request.phone = None;
        request.message = "short".into();
        assert!(request.validate().is_err());
    }
}
