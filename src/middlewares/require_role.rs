/*!
 * 角色访问控制中间件
 *
 * 必须放在 [`RequireJWT`] 内层：JWT 中间件写入当前用户后，这里按角色放行。
 *
 * ```rust,ignore
 * web::scope("/api/v1/contacts")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::scope("")
 *             .wrap(RequireRole::new_any(UserRole::super_admin_roles()))
 *             .route("", web::get().to(list_contacts)),
 *     )
 * ```
 *
 * 教师专用接口使用 `RequireRole::new(&UserRole::Teacher)`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Rc<[UserRole]>,
}

impl RequireRole {
    /// 仅允许单一角色
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed_roles: Rc::from([role.clone()]),
        }
    }

    /// 允许列表中的任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().map(|u| (u.id, u.role.clone()));

            let Some((user_id, role)) = user else {
                info!("Role check on {} without an authenticated user", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if allowed_roles.contains(&role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "User {} ({}) denied access to {}",
                user_id,
                role.as_str(),
                req.path()
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "You do not have permission to access this resource.",
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::middlewares::RequireJWT;
    use crate::models::users::requests::NewUser;
    use crate::routes::{configure_contact_routes, configure_user_routes};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, HttpResponse, test, web};
    use std::sync::Arc;

    async fn seed(storage: &SeaOrmStorage, email: &str, role: UserRole) -> String {
        let user = storage
            .create_user(NewUser {
                name: email.into(),
                email: email.into(),
                password_hash: "x".into(),
                role,
            })
            .await
            .unwrap();
        JwtUtils::generate_access_token(user.id, user.role.as_str()).unwrap()
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_wrong_role_gets_forbidden() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = seed(&storage, "guru@school.sch.id", UserRole::Teacher).await;
        let headmaster = seed(&storage, "kepsek@school.sch.id", UserRole::Headmaster).await;
        let admin = seed(&storage, "admin@school.sch.id", UserRole::SuperAdmin).await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::for_tests());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .configure(configure_user_routes)
                .configure(configure_contact_routes),
        )
        .await;

        let cases = [
            ("/api/v1/users", &teacher, StatusCode::FORBIDDEN),
            ("/api/v1/users", &headmaster, StatusCode::OK),
            ("/api/v1/contacts", &headmaster, StatusCode::FORBIDDEN),
            ("/api/v1/contacts", &teacher, StatusCode::FORBIDDEN),
            ("/api/v1/contacts", &admin, StatusCode::OK),
        ];
        for (uri, token, expected) in cases {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer(token))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_single_role_scope() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let teacher = seed(&storage, "rina@school.sch.id", UserRole::Teacher).await;
        let admin = seed(&storage, "root@school.sch.id", UserRole::SuperAdmin).await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::for_tests());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(
                    web::scope("/teacher")
                        .wrap(RequireJWT)
                        .service(
                            web::scope("")
                                .wrap(RequireRole::new(&UserRole::Teacher))
                                .route("", web::get().to(HttpResponse::Ok)),
                        ),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/teacher")
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/teacher")
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "You do not have permission to access this resource."
        );
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;
        let req = test::TestRequest::get().uri("/admin").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
