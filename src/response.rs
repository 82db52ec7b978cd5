use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// One entry of the `message` array every response carries. Callers branch
/// on the key/value pairs rather than the HTTP status alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub key: String,
    pub value: String,
}

impl ApiMessage {
    pub fn success(value: impl Into<String>) -> Vec<ApiMessage> {
        vec![ApiMessage {
            key: "success".into(),
            value: value.into(),
        }]
    }

    pub fn error(value: impl Into<String>) -> Vec<ApiMessage> {
        vec![ApiMessage {
            key: "error".into(),
            value: value.into(),
        }]
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    message: Vec<ApiMessage>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    /// Validation failure reported under a field-specific message key.
    #[error("{value}")]
    Field { key: String, value: String },
    #[error("{0}")]
    Duplicate(String),
    #[error("User is not logged in")]
    Unauthenticated,
    #[error("Access denied")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Email(String),
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Field { .. } => StatusCode::BAD_REQUEST,
            ApiError::Duplicate(_) | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Email(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn messages(&self) -> Vec<ApiMessage> {
        match self {
            ApiError::Field { key, value } => vec![ApiMessage {
                key: key.clone(),
                value: value.clone(),
            }],
            other => ApiMessage::error(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            error!(error = ?e, "internal error");
        }
        let status = self.status();
        let clear_cookie = matches!(self, ApiError::Unauthenticated);
        let body = ErrorEnvelope {
            message: self.messages(),
        };
        let mut response = (status, Json(body)).into_response();
        // Authentication failures terminate the session.
        if clear_cookie {
            response.headers_mut().append(
                SET_COOKIE,
                HeaderValue::from_static(crate::auth::session::CLEAR_SESSION_COOKIE),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_as_key_value_array() {
        let body = ErrorEnvelope {
            message: ApiMessage::error("Incorrect password or email"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": [{"key": "error", "value": "Incorrect password or email"}]
            })
        );
    }

    #[test]
    fn field_errors_keep_their_own_key() {
        let err = ApiError::Field {
            key: "email".into(),
            value: "Email is required".into(),
        };
        let messages = err.messages();
        assert_eq!(messages[0].key, "email");
        assert_eq!(messages[0].value, "Email is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_classes_match_error_kinds() {
        assert_eq!(
            ApiError::Duplicate("User already exists".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("Module not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Email("Email sending failed".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthenticated_response_clears_the_session_cookie() {
        use crate::auth::session::{CLEAR_SESSION_COOKIE, SESSION_COOKIE};

        let response = ApiError::Unauthenticated.into_response();
        let cookie = response.headers().get(SET_COOKIE).unwrap();
        assert_eq!(cookie.to_str().unwrap(), CLEAR_SESSION_COOKIE);
        // The cleared cookie names the same cookie the session extractor reads.
        assert!(CLEAR_SESSION_COOKIE.starts_with(&format!("{}=;", SESSION_COOKIE)));
        assert!(CLEAR_SESSION_COOKIE.contains("Max-Age=0"));
    }
}
