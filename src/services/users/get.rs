use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::services::{found, respond};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = match storage.get_user_by_id(user_id).await {
        Ok(user) => found(user, "User not found"),
        Err(e) => Err(e),
    };
    respond(result, "User retrieved successfully")
}
