use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};

use crate::errors::Result;
use crate::models::dashboard::responses::DashboardResponse;
use crate::storage::Storage;

use super::activities::list_session_activities;
use super::{define_service, respond};

define_service!(DashboardService);

const RECENT_ACTIVITY_LIMIT: u64 = 10;
const LOGIN_WINDOW_DAYS: i64 = 7;

pub(crate) async fn overview(storage: &dyn Storage) -> Result<DashboardResponse> {
    let since = (Utc::now() - Duration::days(LOGIN_WINDOW_DAYS)).timestamp();
    let metrics = storage.dashboard_metrics(since).await?;
    let recent_activity = list_session_activities(storage, Some(RECENT_ACTIVITY_LIMIT)).await?;
    Ok(DashboardResponse {
        metrics,
        recent_activity,
    })
}

impl DashboardService {
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            overview(storage.as_ref()).await,
            "Dashboard data retrieved successfully",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    #[tokio::test]
    async fn test_overview_counts_records() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Rina", "Guru", "Akademik").await;
        create_staff(&storage, "Joko", "Staf TU", "Tata Usaha").await;

        let dashboard = overview(&storage).await.unwrap();
        assert_eq!(dashboard.metrics.total_staff, 2);
        assert_eq!(dashboard.metrics.total_students, 0);
        assert!(dashboard.recent_activity.is_empty());
    }
}
