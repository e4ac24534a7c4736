use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LeaveService;
use crate::models::{
    ApiResponse, ErrorCode, PaginationInfo, PaginationQuery,
    common::PaginatedResponse,
    leaves::{
        requests::{LeaveListParams, LeaveListQuery},
        responses::LeaveListResponse,
    },
};

pub async fn list_leaves(
    service: &LeaveService,
    request: &HttpRequest,
    query: LeaveListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut list_query = LeaveListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student,
        status: query.status,
        class_number: None,
        division: None,
    };

    // class_id 解析为年级与分班，未知班级返回空列表
    if let Some(class_id) = query.class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(class)) => {
                list_query.class_number = Some(class.class_number);
                list_query.division = Some(class.division);
            }
            Ok(None) => {
                let (page, size) = PaginationQuery::normalized(list_query.page, list_query.size);
                let empty: LeaveListResponse = PaginatedResponse {
                    items: Vec::new(),
                    pagination: PaginationInfo::new(page, size, 0, 0),
                };
                return Ok(HttpResponse::Ok().json(ApiResponse::success(
                    empty,
                    "Leave list retrieved successfully",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve leave list: {e}"),
                    )),
                );
            }
        }
    }

    match storage.list_leaves_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Leave list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve leave list: {e}"),
            )),
        ),
    }
}
