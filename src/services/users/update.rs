use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use super::create::ensure_email_available;
use crate::errors::Result;
use crate::models::users::{
    entities::User,
    requests::{UpdateUserRequest, UserChanges},
};
use crate::services::{found, invalid, respond};
use crate::storage::Storage;
use crate::utils::password::hash_password;

pub(crate) async fn update(
    storage: &dyn Storage,
    user_id: i64,
    mut req: UpdateUserRequest,
) -> Result<User> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();
    req.validate().map_err(invalid)?;
    found(storage.get_user_by_id(user_id).await?, "User not found")?;
    ensure_email_available(storage, &req.email, Some(user_id)).await?;

    // 密码留空则保持不变
    let password_hash = match req.new_password() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let changes = UserChanges {
        name: req.name,
        email: req.email,
        role: req.role,
        status: req.status,
        password_hash,
    };
    found(storage.update_user(user_id, changes).await?, "User not found")
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    respond(
        update(storage.as_ref(), user_id, update_data).await,
        "User updated successfully.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::NewUser};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_update_keeps_password_when_blank() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user(NewUser {
                name: "Lina".into(),
                email: "lina@school.sch.id".into(),
                password_hash: "hash".into(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap();

        let updated = update(
            &storage,
            user.id,
            UpdateUserRequest {
                name: "Lina Marlina".into(),
                email: "lina@school.sch.id".into(),
                role: UserRole::DeputyHeadmaster,
                status: None,
                password: None,
                password_confirmation: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Lina Marlina");
        assert_eq!(updated.role, UserRole::DeputyHeadmaster);
        assert_eq!(updated.password_hash, "hash");
    }
}
