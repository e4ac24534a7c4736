pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{CreateEventRequest, EventListParams, UpdateEventRequest};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: EventListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        data: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, data).await
    }

    pub async fn get_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_event(self, request, id).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, id, data).await
    }

    pub async fn delete_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, id).await
    }
}
