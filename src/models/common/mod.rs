pub mod pagination;
pub mod response;
pub mod serde_helpers;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use serde_helpers::{deserialize_optional_i64, deserialize_some};
