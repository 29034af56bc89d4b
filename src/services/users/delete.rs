use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::BulkDeleteResponse;
use crate::models::users::requests::BulkDeleteUsersRequest;
use crate::services::{error_response, invalid, respond, respond_empty};
use crate::storage::Storage;

pub(crate) async fn delete_one(
    storage: &dyn Storage,
    current_user_id: Option<i64>,
    user_id: i64,
) -> Result<()> {
    if current_user_id == Some(user_id) {
        return Err(invalid("Cannot delete your own account."));
    }
    if storage.delete_user(user_id).await? {
        Ok(())
    } else {
        Err(crate::errors::SchoolSysError::not_found("User not found"))
    }
}

/// 批量删除：排除当前用户，所有 ID 必须存在
pub(crate) async fn delete_many(
    storage: &dyn Storage,
    current_user_id: Option<i64>,
    user_ids: &[i64],
) -> Result<BulkDeleteResponse> {
    let mut ids: Vec<i64> = user_ids
        .iter()
        .copied()
        .filter(|id| Some(*id) != current_user_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Err(invalid("Please select at least one user to delete."));
    }
    if storage.count_existing_users(&ids).await? != ids.len() as u64 {
        return Err(invalid("Some selected users do not exist."));
    }

    let deleted = storage.delete_users(&ids).await?;
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = RequireJWT::extract_user_id(request);
    respond_empty(
        delete_one(storage.as_ref(), current, user_id).await,
        "User deleted successfully.",
    )
}

pub async fn bulk_delete_users(
    service: &UserService,
    body: BulkDeleteUsersRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = RequireJWT::extract_user_id(request);
    match delete_many(storage.as_ref(), current, &body.user_ids).await {
        Ok(result) => {
            let message = format!("Successfully deleted {} users.", result.deleted);
            respond(Ok(result), &message)
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::NewUser};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn seed(storage: &SeaOrmStorage, email: &str) -> i64 {
        storage
            .create_user(NewUser {
                name: email.into(),
                email: email.into(),
                password_hash: "x".into(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let id = seed(&storage, "me@school.sch.id").await;
        let err = delete_one(&storage, Some(id), id).await.unwrap_err();
        assert_eq!(err.message(), "Cannot delete your own account.");
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bulk_delete_excludes_current_and_requires_existing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let me = seed(&storage, "me@school.sch.id").await;
        let a = seed(&storage, "a@school.sch.id").await;
        let b = seed(&storage, "b@school.sch.id").await;

        let err = delete_many(&storage, Some(me), &[a, 404]).await.unwrap_err();
        assert_eq!(err.message(), "Some selected users do not exist.");
        assert_eq!(storage.count_users().await.unwrap(), 3);

        let result = delete_many(&storage, Some(me), &[me, a, b]).await.unwrap();
        assert_eq!((result.deleted, result.total), (2, 2));
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
