pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::leaves::{
    entities::LeaveStatus,
    requests::{CreateLeaveRequest, LeaveListParams, UpdateLeaveRequest},
};
use crate::storage::Storage;

pub struct LeaveService {
    storage: Option<Arc<dyn Storage>>,
}

impl LeaveService {
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

    pub async fn list_leaves(
        &self,
        request: &HttpRequest,
        query: LeaveListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_leaves(self, request, query).await
    }

    pub async fn create_leave(
        &self,
        request: &HttpRequest,
        data: CreateLeaveRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_leave(self, request, data).await
    }

    pub async fn get_leave(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_leave(self, request, id).await
    }

    // PUT 整体替换
    pub async fn replace_leave(
        &self,
        request: &HttpRequest,
        id: i64,
        data: CreateLeaveRequest,
    ) -> ActixResult<HttpResponse> {
        update::replace_leave(self, request, id, data).await
    }

    // PATCH 部分更新
    pub async fn partial_update_leave(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateLeaveRequest,
    ) -> ActixResult<HttpResponse> {
        update::partial_update_leave(self, request, id, data).await
    }

    pub async fn delete_leave(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_leave(self, request, id).await
    }

    // 审批通过或驳回
    pub async fn set_leave_status(
        &self,
        request: &HttpRequest,
        id: i64,
        status: LeaveStatus,
    ) -> ActixResult<HttpResponse> {
        status::set_leave_status(self, request, id, status).await
    }
}
