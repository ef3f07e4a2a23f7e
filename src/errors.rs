//! Crate-wide error type.
//!
//! Error kinds are declared once through a macro which generates the enum,
//! its error code, type name, message accessor and snake_case constructors.

use std::fmt;

/// Declares the crate error enum.
///
/// Generates:
/// - the enum definition
/// - `code()` returning the error code
/// - `error_type()` returning the error type name
/// - `message()` returning the detail message
/// - one constructor per variant (`AdminError::validation("...")`)
macro_rules! define_admin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AdminError {
            $($variant(String),)*
        }

        impl AdminError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(AdminError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AdminError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(AdminError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl AdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_admin_errors! {
    ConfigLoad("E001", "Configuration Error"),
    RemoteConnection("E002", "Remote Connection Error"),
    RemoteBackendNotFound("E003", "Remote Backend Not Found"),
    RemoteRejected("E004", "Remote Rejected"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    FormState("E009", "Form State Error"),
    UnknownField("E010", "Unknown Field"),
}

impl AdminError {
    /// Colored single-error rendering for development consoles.
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AdminError {}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        AdminError::RemoteConnection(err.to_string())
    }
}

impl From<config::ConfigError> for AdminError {
    fn from(err: config::ConfigError) -> Self {
        AdminError::ConfigLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AdminError::config_load("test").code(), "E001");
        assert_eq!(AdminError::remote_connection("test").code(), "E002");
        assert_eq!(AdminError::validation("test").code(), "E005");
        assert_eq!(AdminError::form_state("test").code(), "E009");
        assert_eq!(AdminError::unknown_field("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AdminError::remote_backend_not_found("grpc").error_type(),
            "Remote Backend Not Found"
        );
        assert_eq!(
            AdminError::form_state("closed").error_type(),
            "Form State Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = AdminError::not_found("Jurusan 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Jurusan 7"));
    }

    #[test]
    fn test_from_serde_error() {
        let err: AdminError = serde_json::from_str::<i64>("not-a-number")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E007");
    }
}
