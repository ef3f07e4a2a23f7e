use serde::{Deserialize, Serialize};

/// Business codes carried in `ApiResponse::code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 1xxx: request problems
    BadRequest = 1000,
    ValidationFailed = 1001,
    UnknownField = 1002,
    NotFound = 1004,
    FormBusy = 1009,

    // 2xxx: remote store problems
    RemoteRejected = 2001,
    RemoteUnavailable = 2002,

    InternalServerError = 5000,
}
