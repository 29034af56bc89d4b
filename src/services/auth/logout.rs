use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::activities::entities::ACTIVITY_LOGOUT;
use crate::services::activities::record_activity;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
/// 记录登出活动并清除客户端的 refresh_token cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(user) = RequireJWT::extract_user_claims(request) {
        let storage = service.get_storage(request)?;
        let ip = request
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        record_activity(
            storage.as_ref(),
            &user,
            ACTIVITY_LOGOUT,
            format!("User logged out from {ip}"),
            request,
        )
        .await;
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
