use super::entities::Leave;
use crate::models::common::PaginatedResponse;

// 请假列表响应
pub type LeaveListResponse = PaginatedResponse<Leave>;
