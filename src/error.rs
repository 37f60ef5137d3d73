use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use thiserror::Error;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Parse Error: {0}")]
    ParseError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for RestError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_error) = e.as_database_error() {
            if db_error.is_unique_violation() {
                return Self::Conflict("Author already has a draft application".into());
            }
            if db_error.is_foreign_key_violation() {
                return Self::ParseError("Unknown activity".into());
            }
        }
        tracing::error!(error.cause_chain = ?e, "Database query failed");
        Self::InternalError("Database error".into())
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Never leak the cause chain of unexpected errors
        let message = match self {
            Self::Other(e) => {
                tracing::error!(error.cause_chain = ?e, "Request failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}
