use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{
        entities::Subject,
        requests::{SubjectListParams, SubjectListQuery},
    },
};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut list_query = SubjectListQuery {
        class_name: query.class_name,
        teacher_id: query.teacher_id,
    };

    // class_id 优先于 className
    if let Some(class_id) = query.class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(class)) => list_query.class_name = Some(class.name),
            Ok(None) => {
                return Ok(HttpResponse::Ok().json(ApiResponse::success(
                    Vec::<Subject>::new(),
                    "Subject list retrieved successfully",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve subject list: {e}"),
                    )),
                );
            }
        }
    }

    match storage.list_subjects(list_query).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve subject list: {e}"),
            )),
        ),
    }
}
