pub mod class_label;
pub mod extractor;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use class_label::{class_label, parse_class_label};
pub use extractor::{SafeIDI64, SafeStudentIdI64};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
