pub mod by_teacher;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod students;
pub mod subject_dashboard;
pub mod teacher_dashboard;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::{
    ClassListParams, CreateClassRequest, SubjectDashboardQuery, TeacherQuery, UpdateClassRequest,
};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    // 创建班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 获取班级信息
    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    // 删除班级
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    // 班主任所带班级
    pub async fn get_class_by_teacher(
        &self,
        request: &HttpRequest,
        query: TeacherQuery,
    ) -> ActixResult<HttpResponse> {
        by_teacher::get_class_by_teacher(self, request, query).await
    }

    // 班级学生名单
    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::list_class_students(self, request, class_id).await
    }

    // 班主任看板
    pub async fn teacher_dashboard(
        &self,
        request: &HttpRequest,
        query: TeacherQuery,
    ) -> ActixResult<HttpResponse> {
        teacher_dashboard::teacher_dashboard(self, request, query).await
    }

    // 科目教师看板
    pub async fn subject_teacher_dashboard(
        &self,
        request: &HttpRequest,
        query: SubjectDashboardQuery,
    ) -> ActixResult<HttpResponse> {
        subject_dashboard::subject_teacher_dashboard(self, request, query).await
    }
}
