use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No properties available")]
    NoPropertiesAvailable,

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Demand model error: {0}")]
    Model(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(errors.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NoPropertiesAvailable => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Dataset(_) | AppError::Model(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::NoPropertiesAvailable, StatusCode::NOT_FOUND),
            (AppError::Dataset("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Model("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_no_properties_message() {
        assert_eq!(
            AppError::NoPropertiesAvailable.to_string(),
            "No properties available"
        );
    }
}
