//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use prassign_core::{DomainError, DomainErrorKind};
use thiserror::Error;
use tracing::error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Domain error,\n  caused by: {source}")]
    DomainError {
        #[from]
        source: DomainError,
    },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("I/O error,\n  caused by: {source}")]
    IoError { source: std::io::Error },
}

impl ServerError {
    fn kind(&self) -> DomainErrorKind {
        match self {
            Self::DomainError { source } => source.kind(),
            Self::BadRequest { .. } => DomainErrorKind::InvalidInput,
            Self::IoError { .. } => DomainErrorKind::Internal,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::DomainError { source } if source.kind() != DomainErrorKind::Internal => {
                source.to_string()
            }
            Self::BadRequest { message } => message.clone(),
            _ => "internal error".into(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
            DomainErrorKind::TeamExists | DomainErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            DomainErrorKind::AlreadyExists
            | DomainErrorKind::AlreadyMerged
            | DomainErrorKind::NotAssigned
            | DomainErrorKind::NoCandidate => StatusCode::CONFLICT,
            DomainErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let kind = self.kind();
        if kind == DomainErrorKind::Internal {
            error!(error = %self, message = "Internal server error");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": {
                "code": kind.code(),
                "message": self.public_message(),
            }
        }))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
