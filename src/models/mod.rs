pub mod common;
pub mod jurusan;
pub mod kelas;
pub mod semester;
pub mod tahun_ajaran;

pub use common::{
    ApiResponse, EntityKind, ErrorCode, ForeignOptions, PaginationInfo, PaginationQuery,
    ScreenData, SelectOption, SummaryStats,
};
