pub mod bulk_mark;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListParams, BulkMarkRequest, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        data: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, data).await
    }

    pub async fn get_attendance(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_attendance(self, request, id).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, request, id, data).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, request, id).await
    }

    // 按班级批量考勤
    pub async fn bulk_mark(
        &self,
        request: &HttpRequest,
        data: BulkMarkRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_mark::bulk_mark(self, request, data).await
    }

    // 学生出勤汇总
    pub async fn student_summary(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::student_summary(self, request, student_id).await
    }
}
