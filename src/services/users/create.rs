use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::Result;
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, NewUser},
};
use crate::services::{invalid, respond_created};
use crate::storage::Storage;
use crate::utils::password::hash_password;

pub(crate) async fn ensure_email_available(
    storage: &dyn Storage,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    match storage.get_user_by_email(email).await? {
        Some(existing) if Some(existing.id) != exclude_id => {
            Err(invalid("The email has already been taken."))
        }
        _ => Ok(()),
    }
}

pub(crate) async fn create(storage: &dyn Storage, mut req: CreateUserRequest) -> Result<User> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();
    req.validate().map_err(invalid)?;
    ensure_email_available(storage, &req.email, None).await?;

    let user = storage
        .create_user(NewUser {
            name: req.name,
            email: req.email,
            password_hash: hash_password(&req.password)?,
            role: req.role,
        })
        .await?;
    tracing::info!("User {} created with role {}", user.email, user.role);
    Ok(user)
}

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond_created(
        create(storage.as_ref(), user_data).await,
        "User created successfully.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Rudi Hartono".into(),
            email: email.into(),
            password: "Secure123".into(),
            password_confirmation: "Secure123".into(),
            role: UserRole::Teacher,
        }
    }

    #[tokio::test]
    async fn test_create_lowercases_and_rejects_duplicate() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = create(&storage, request(" Rudi@School.sch.id ")).await.unwrap();
        assert_eq!(user.email, "rudi@school.sch.id");
        assert_ne!(user.password_hash, "Secure123");

        let err = create(&storage, request(" rudi@school.sch.id "))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "The email has already been taken.");
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_mismatched_confirmation() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let mut req = request("x@school.sch.id");
        req.password_confirmation = "Other123".into();
        assert!(create(&storage, req).await.is_err());
        assert_eq!(storage.count_users().await.unwrap(), 0);
    }
}
