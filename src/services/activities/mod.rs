use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::BulkDeleteResponse;
use crate::models::activities::{
    entities::{NewActivity, SESSION_ACTIVITY_TYPES, detect_browser, detect_platform},
    requests::BulkDeleteActivitiesRequest,
    responses::ActivityView,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

use super::{define_service, error_response, invalid, respond};

define_service!(ActivityService);

/// 记录用户活动，User-Agent 中的浏览器与平台写入 metadata
pub async fn record_activity(
    storage: &dyn Storage,
    user: &User,
    activity_type: &str,
    description: String,
    request: &HttpRequest,
) {
    let user_agent = request
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    let agent = user_agent.as_deref().unwrap_or_default();

    let activity = NewActivity {
        user_id: user.id,
        activity_type: activity_type.to_string(),
        description,
        ip_address,
        metadata: serde_json::json!({
            "browser": detect_browser(agent),
            "platform": detect_platform(agent),
        }),
        user_agent,
    };

    if let Err(e) = storage.create_activity(activity).await {
        tracing::warn!("Failed to record {} activity for user {}: {}", activity_type, user.id, e);
    }
}

pub(crate) async fn list_session_activities(
    storage: &dyn Storage,
    limit: Option<u64>,
) -> Result<Vec<ActivityView>> {
    let rows = storage
        .list_activities_with_users(&SESSION_ACTIVITY_TYPES, limit)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(activity, user)| ActivityView::new(activity, &user))
        .collect())
}

pub(crate) async fn delete_session_activities(
    storage: &dyn Storage,
    ids: &[i64],
) -> Result<BulkDeleteResponse> {
    if ids.is_empty() {
        return Err(invalid("Please select at least one activity to delete."));
    }
    let deleted = storage
        .delete_activities(ids, &SESSION_ACTIVITY_TYPES)
        .await?;
    if deleted == 0 {
        return Err(invalid(
            "No activities found to delete. They may have already been removed.",
        ));
    }
    Ok(BulkDeleteResponse {
        deleted: deleted as i64,
        total: ids.len() as i64,
    })
}

impl ActivityService {
    // 登录、登出、注册活动列表
    pub async fn list_activities(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            list_session_activities(storage.as_ref(), None).await,
            "Activities retrieved successfully",
        )
    }

    pub async fn bulk_delete(
        &self,
        body: BulkDeleteActivitiesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match delete_session_activities(storage.as_ref(), &body.activity_ids).await {
            Ok(result) => {
                let message = format!("Successfully deleted {} system activities.", result.deleted);
                respond(Ok(result), &message)
            }
            Err(e) => Ok(error_response(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::{ACTIVITY_LOGIN, NewActivity};
    use crate::models::users::{entities::UserRole, requests::NewUser};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn seed_user(storage: &SeaOrmStorage) -> User {
        storage
            .create_user(NewUser {
                name: "Dewi".into(),
                email: "dewi@school.sch.id".into(),
                password_hash: "x".into(),
                role: UserRole::Headmaster,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_bulk_delete_reports_missing() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = seed_user(&storage).await;
        let activity = storage
            .create_activity(NewActivity {
                user_id: user.id,
                activity_type: ACTIVITY_LOGIN.into(),
                description: "User logged in".into(),
                ip_address: None,
                user_agent: None,
                metadata: serde_json::json!({"browser": "Chrome", "platform": "Linux"}),
            })
            .await
            .unwrap();

        let views = list_session_activities(&storage, None).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].action, "Logged in via Chrome on Linux");

        let result = delete_session_activities(&storage, &[activity.id, 999])
            .await
            .unwrap();
        assert_eq!((result.deleted, result.total), (1, 2));

        let err = delete_session_activities(&storage, &[activity.id])
            .await
            .unwrap_err();
        assert!(err.message().starts_with("No activities found"));
    }

    #[actix_web::test]
    async fn test_record_activity_parses_user_agent() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let user = seed_user(&storage).await;
        let request = actix_web::test::TestRequest::default()
            .insert_header((
                "User-Agent",
                "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
            ))
            .to_http_request();

        record_activity(&storage, &user, ACTIVITY_LOGIN, "User logged in".into(), &request).await;

        let views = list_session_activities(&storage, Some(5)).await.unwrap();
        assert_eq!(views[0].action, "Logged in via Firefox on Linux");
    }
}
