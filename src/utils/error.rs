use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clickup::ClickUpError;
use serde_json::json;
use std::fmt;

use super::logging::log_clickup_api_error;

#[derive(Debug)]
pub enum AppError {
    ClickUpApi(ClickUpError),
    ConfigError(String),
    ValidationError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ClickUpApi(err) => write!(f, "ClickUp API error: {}", err),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::ClickUpApi(err) => Some(err),
            _ => None,
        }
    }
}

impl AppError {
    /// Erro do ClickUp em uma operação, registrado no log com o status da API
    pub fn clickup(operation: &str, err: ClickUpError) -> Self {
        log_clickup_api_error(operation, err.status(), &err.to_string());
        AppError::ClickUpApi(err)
    }
}

impl From<ClickUpError> for AppError {
    fn from(err: ClickUpError) -> Self {
        AppError::ClickUpApi(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ClickUpApi(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            AppError::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = json!({
            "error": error_message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let api = AppError::from(ClickUpError::ApiError {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(api.into_response().status(), StatusCode::BAD_GATEWAY);

        let invalid = AppError::ValidationError("missing list_id".to_string());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_clickup_keeps_api_status() {
        let err = AppError::clickup(
            "get_issue",
            ClickUpError::ApiError {
                status: 404,
                body: "Task not found".to_string(),
            },
        );

        match &err {
            AppError::ClickUpApi(inner) => assert_eq!(inner.status(), Some(404)),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_error_conversion() {
        let err = AppError::from(config::ConfigError::Message("porta inválida".to_string()));
        assert!(matches!(err, AppError::ConfigError(ref msg) if msg == "porta inválida"));
    }

    #[test]
    fn test_display() {
        let err = AppError::ConfigError("token ausente".to_string());
        assert_eq!(err.to_string(), "Configuration error: token ausente");
    }
}
