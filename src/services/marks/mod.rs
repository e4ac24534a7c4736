pub mod by_class;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::{
    CreateMarkRequest, MarkListParams, MarksByClassQuery, UpdateMarkRequest,
};
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_marks(
        &self,
        request: &HttpRequest,
        query: MarkListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, request, query).await
    }

    // 按 学生+科目+考试类型 更新或创建
    pub async fn create_mark(
        &self,
        request: &HttpRequest,
        data: CreateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mark(self, request, data).await
    }

    pub async fn get_mark(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_mark(self, request, id).await
    }

    pub async fn update_mark(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateMarkRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mark(self, request, id, data).await
    }

    pub async fn delete_mark(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_mark(self, request, id).await
    }

    // 班级成绩汇总
    pub async fn marks_by_class(
        &self,
        request: &HttpRequest,
        query: MarksByClassQuery,
    ) -> ActixResult<HttpResponse> {
        by_class::marks_by_class(self, request, query).await
    }
}
