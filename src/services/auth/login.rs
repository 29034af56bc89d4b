use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::models::activities::entities::ACTIVITY_LOGIN;
use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::models::users::entities::{User, UserStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::record_activity;
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "These credentials do not match our records.";

/// 校验邮箱与密码，停用账号不允许登录
pub(crate) async fn authenticate(storage: &dyn Storage, login: &LoginRequest) -> Result<User> {
    let email = login.email.trim().to_lowercase();
    let user = storage
        .get_user_by_email(&email)
        .await?
        .filter(|user| verify_password(&login.password, &user.password_hash))
        .ok_or_else(|| SchoolSysError::authentication(INVALID_CREDENTIALS))?;

    if user.status != UserStatus::Active {
        return Err(SchoolSysError::authorization(
            "Your account has been deactivated. Please contact the administrator.",
        ));
    }
    Ok(user)
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let user = match authenticate(storage.as_ref(), &login_request).await {
        Ok(user) => user,
        Err(SchoolSysError::Authorization(msg)) => {
            return Ok(HttpResponse::Forbidden()
                .json(ApiResponse::error_empty(ErrorCode::AccountInactive, msg)));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    // 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    let refresh_expiry = if login_request.remember_me {
        chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
    } else {
        chrono::Duration::days(config.jwt.refresh_token_expiry)
    };

    let token_pair = match user.generate_token_pair(Some(refresh_expiry)) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    let ip = request
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    record_activity(
        storage.as_ref(),
        &user,
        ACTIVITY_LOGIN,
        format!("User logged in from {ip}"),
        request,
    )
    .await;

    tracing::info!("User {} logged in successfully", user.email);

    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_expiry);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{
        entities::UserRole,
        requests::{NewUser, UserChanges},
    };
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::password::hash_password;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn test_authenticate_checks_password_and_status() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = storage
            .create_user(NewUser {
                name: "Andi".into(),
                email: "andi@school.sch.id".into(),
                password_hash: hash_password("Secure123").unwrap(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap();

        let ok = authenticate(&storage, &login("ANDI@school.sch.id", "Secure123"))
            .await
            .unwrap();
        assert_eq!(ok.id, user.id);

        let err = authenticate(&storage, &login("andi@school.sch.id", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), INVALID_CREDENTIALS);

        storage
            .update_user(
                user.id,
                UserChanges {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    role: UserRole::Teacher,
                    status: Some(UserStatus::Inactive),
                    password_hash: None,
                },
            )
            .await
            .unwrap();
        let err = authenticate(&storage, &login("andi@school.sch.id", "Secure123"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolSysError::Authorization(_)));
    }
}
