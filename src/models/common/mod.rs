pub mod entity_kind;
pub mod error_code;
pub mod pagination;
pub mod response;
pub mod screen_data;

pub use entity_kind::EntityKind;
pub use error_code::ErrorCode;
pub use pagination::{PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use screen_data::{ForeignOptions, ScreenData, SelectOption, SummaryStats};
