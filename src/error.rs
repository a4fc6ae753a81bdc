use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Internal,
    InvalidInvocation,
    InvalidInput,
    Unauthorized,
    Validation,
    Capacity,
    AddressNotFound,
    LookupFailed,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self.code {
            100 => ErrorKind::InvalidInvocation,
            101 => ErrorKind::InvalidInput,
            102 => ErrorKind::Unauthorized,
            110 => ErrorKind::Validation,
            111 => ErrorKind::Capacity,
            112 => ErrorKind::AddressNotFound,
            113 => ErrorKind::LookupFailed,
            114 => ErrorKind::Config,
            _ => ErrorKind::Internal,
        }
    }

    /// Geocoding failures are reported to the session and may be retried.
    pub fn is_geocode_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::AddressNotFound | ErrorKind::LookupFailed
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::FORBIDDEN, self.message.as_str()),
            112 => (StatusCode::NOT_FOUND, self.message.as_str()),
            113 => (StatusCode::BAD_GATEWAY, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_invocation_error() -> Error {
    Error {
        code: 100,
        message: "invalid invocation".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 102,
        message: "unauthorized".into(),
    }
}

pub fn validation_error(message: impl Into<String>) -> Error {
    Error {
        code: 110,
        message: message.into(),
    }
}

pub fn capacity_error(vehicle_name: &str, capacity: u32) -> Error {
    Error {
        code: 111,
        message: format!(
            "The selected vehicle ({}) can only accommodate {} passengers",
            vehicle_name, capacity
        ),
    }
}

pub fn address_not_found_error() -> Error {
    Error {
        code: 112,
        message: "address not found".into(),
    }
}

pub fn lookup_failed_error() -> Error {
    Error {
        code: 113,
        message: "lookup failed".into(),
    }
}

pub fn unknown_vehicle_error(vehicle_type: &str) -> Error {
    Error {
        code: 114,
        message: format!("unknown vehicle type: {}", vehicle_type),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_kinds() {
        assert_eq!(validation_error("x").kind(), ErrorKind::Validation);
        assert_eq!(capacity_error("Sedan Car", 4).kind(), ErrorKind::Capacity);
        assert_eq!(unknown_vehicle_error("tank").kind(), ErrorKind::Config);
        assert_eq!(unexpected_error().kind(), ErrorKind::Internal);
    }

    #[test]
    fn capacity_error_names_vehicle_and_limit() {
        let err = capacity_error("Sedan Car", 4);

        assert!(err.message.contains("Sedan Car"));
        assert!(err.message.contains('4'));
    }

    #[test]
    fn geocode_errors_are_recognised() {
        assert!(address_not_found_error().is_geocode_error());
        assert!(lookup_failed_error().is_geocode_error());
        assert!(!validation_error("x").is_geocode_error());
    }
}
