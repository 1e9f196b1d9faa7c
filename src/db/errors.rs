use crate::connection::ConnectionError;
use crate::helpers::JsonResponse;
use crate::models::ValidationError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Errors returned by rating repositories
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The write broke a field rule; nothing was persisted
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No rating matches the given id
    #[error("rating not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl ResponseError for RepositoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound(_) => "Rating not found".to_string(),
            Self::Connection(_) => "Database unavailable".to_string(),
            Self::Database(_) => "Internal error".to_string(),
        };

        JsonResponse::<()>::build().response(self.status_code(), &message)
    }
}
