use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_path(&format!("Missing path parameter: {name}")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_path(&format!("Invalid {name}: must be a positive integer"))),
    }
}

/// 路径中的 `{id}`，必须为正整数
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req, "id").map(SafeIDI64))
    }
}

/// 嵌套资源路径 `{id}/.../{item_id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeNestedIDI64(pub i64, pub i64);

impl FromRequest for SafeNestedIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            parse_positive_id(req, "id")
                .and_then(|id| parse_positive_id(req, "item_id").map(|item| SafeNestedIDI64(id, item))),
        )
    }
}

/// 路径中的 `{slug}`，只允许小写字母、数字与连字符
#[derive(Debug, Clone)]
pub struct SafeSlug(pub String);

impl FromRequest for SafeSlug {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let slug = req.match_info().get("slug").unwrap_or_default();
        let valid = !slug.is_empty()
            && slug.len() <= 255
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        ready(if valid {
            Ok(SafeSlug(slug.to_string()))
        } else {
            Err(bad_path("Invalid slug"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_rejects_non_positive() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);

        let req = TestRequest::default().param("id", "0").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());

        let req = TestRequest::default().param("id", "abc").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_nested_ids() {
        let req = TestRequest::default()
            .param("id", "3")
            .param("item_id", "9")
            .to_http_request();
        let ids = SafeNestedIDI64::extract(&req).await.unwrap();
        assert_eq!((ids.0, ids.1), (3, 9));
    }

    #[actix_web::test]
    async fn test_slug() {
        let req = TestRequest::default().param("slug", "visi-misi").to_http_request();
        assert_eq!(SafeSlug::extract(&req).await.unwrap().0, "visi-misi");
        let req = TestRequest::default().param("slug", "../x").to_http_request();
        assert!(SafeSlug::extract(&req).await.is_err());
    }
}
