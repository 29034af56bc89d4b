pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::IdsRequest;
use crate::models::classes::requests::{ClassOptionsQuery, ClassQueryParams, ClassRequest};

crate::services::define_service!(ClassService);

impl ClassService {
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    // 班级下拉选项
    pub async fn class_options(
        &self,
        request: &HttpRequest,
        query: ClassOptionsQuery,
    ) -> ActixResult<HttpResponse> {
        list::class_options(self, request, query).await
    }

    pub async fn class_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::class_stats(self, request).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: ClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: ClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    pub async fn bulk_delete_classes(
        &self,
        request: &HttpRequest,
        body: IdsRequest,
    ) -> ActixResult<HttpResponse> {
        delete::bulk_delete_classes(self, request, body).await
    }
}
