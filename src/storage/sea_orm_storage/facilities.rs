use super::SeaOrmStorage;
use crate::entity::facilities::{ActiveModel, Column, Entity as Facilities};
use crate::errors::{Result, SchoolSysError};
use crate::models::facilities::{
    entities::Facility,
    requests::{FacilityListParams, FacilityRequest},
    responses::FacilityListResponse,
};
use crate::utils::sql::{contains_ci, search_term};
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

const FACILITIES_PER_PAGE: u64 = 15;

impl SeaOrmStorage {
    pub async fn list_facilities_with_pagination_impl(
        &self,
        query: FacilityListParams,
    ) -> Result<FacilityListResponse> {
        let mut select = Facilities::find();
        if let Some(term) = search_term(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(contains_ci(Column::Name, &term))
                    .add(contains_ci(Column::Description, &term)),
            );
        }

        let (facilities, pagination) = self
            .fetch_page(
                select.order_by_desc(Column::CreatedAt),
                query.pagination.page(),
                query.pagination.per_page(FACILITIES_PER_PAGE),
            )
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询设施列表失败: {e}")))?;

        Ok(FacilityListResponse {
            items: facilities.into_iter().map(|m| m.into_facility()).collect(),
            pagination,
        })
    }

    pub async fn list_all_facilities_impl(&self) -> Result<Vec<Facility>> {
        let facilities = Facilities::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询设施失败: {e}")))?;

        Ok(facilities.into_iter().map(|m| m.into_facility()).collect())
    }

    pub async fn get_facility_by_id_impl(&self, id: i64) -> Result<Option<Facility>> {
        let result = Facilities::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("查询设施失败: {e}")))?;

        Ok(result.map(|m| m.into_facility()))
    }

    pub async fn create_facility_impl(
        &self,
        req: FacilityRequest,
        photo: Option<String>,
    ) -> Result<Facility> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            photo: Set(photo),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("创建设施失败: {e}")))?;

        Ok(result.into_facility())
    }

    pub async fn update_facility_impl(
        &self,
        id: i64,
        req: FacilityRequest,
        photo: Option<String>,
    ) -> Result<Option<Facility>> {
        if self.get_facility_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            photo: Set(photo),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("更新设施失败: {e}")))?;

        Ok(Some(result.into_facility()))
    }

    pub async fn delete_facility_impl(&self, id: i64) -> Result<bool> {
        let result = Facilities::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("删除设施失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
