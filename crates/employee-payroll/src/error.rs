use crate::config::ConfigError;
use crate::employees::EmployeeServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Employee(EmployeeServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Employee(err) => write!(f, "employee error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Employee(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Employee(EmployeeServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Employee(EmployeeServiceError::InvalidArgument(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Employee(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = match &self {
            AppError::Employee(error @ EmployeeServiceError::InvalidArgument(invalid)) => json!({
                "error": error.to_string(),
                "field": invalid.field(),
            }),
            AppError::Employee(error) => json!({ "error": error.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };

        match &self {
            AppError::Employee(error) if error.is_caller_error() => {
                debug!(%error, "employee request rejected");
            }
            _ => warn!(error = %self, "request failed"),
        }

        (status, Json(payload)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<EmployeeServiceError> for AppError {
    fn from(value: EmployeeServiceError) -> Self {
        Self::Employee(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employees::{EmployeeId, RepositoryError, ValidationError};

    #[test]
    fn employee_errors_keep_their_status() {
        let missing = AppError::from(EmployeeServiceError::NotFound {
            id: EmployeeId::new(),
        });
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(EmployeeServiceError::InvalidArgument(
            ValidationError::BlankName,
        ));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let unavailable = AppError::from(EmployeeServiceError::Repository(
            RepositoryError::Unavailable("database offline".to_string()),
        ));
        assert_eq!(
            unavailable.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_arguments_name_the_offending_field() {
        let response = AppError::from(EmployeeServiceError::InvalidArgument(
            ValidationError::NameContainsDigits {
                name: "John Do3".to_string(),
            },
        ))
        .into_response();

        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["field"], "name");
        assert!(payload["error"]
            .as_str()
            .expect("message")
            .contains("John Do3"));
    }

    #[test]
    fn process_errors_are_server_faults() {
        let err = AppError::from(ConfigError::InvalidPort);
        assert!(err.to_string().starts_with("configuration error"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
