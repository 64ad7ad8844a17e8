//! Domain errors.

use prassign_database_interface::DatabaseError;
use thiserror::Error;

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown team '{team_name}'")]
    UnknownTeam { team_name: String },

    #[error("Unknown user '{user_id}'")]
    UnknownUser { user_id: String },

    #[error("Unknown pull request '{pull_request_id}'")]
    UnknownPullRequest { pull_request_id: String },

    #[error("Team '{team_name}' already exists")]
    TeamAlreadyExists { team_name: String },

    #[error("Pull request '{pull_request_id}' already exists")]
    PullRequestAlreadyExists { pull_request_id: String },

    #[error("Pull request '{pull_request_id}' is merged")]
    PullRequestMerged { pull_request_id: String },

    #[error("User '{user_id}' is not a reviewer of pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("No active replacement candidate for '{user_id}' on pull request '{pull_request_id}'")]
    NoCandidate {
        pull_request_id: String,
        user_id: String,
    },

    /// Wraps [`prassign_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

/// Error categories, as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    NotFound,
    TeamExists,
    AlreadyExists,
    AlreadyMerged,
    NotAssigned,
    NoCandidate,
    InvalidInput,
    Internal,
}

impl DomainErrorKind {
    /// Stable error code.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::AlreadyExists => "PR_EXISTS",
            Self::AlreadyMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::InvalidInput => "BAD_REQUEST",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> DomainErrorKind {
        match self {
            Self::InvalidInput { .. } => DomainErrorKind::InvalidInput,
            Self::UnknownTeam { .. }
            | Self::UnknownUser { .. }
            | Self::UnknownPullRequest { .. } => DomainErrorKind::NotFound,
            Self::TeamAlreadyExists { .. } => DomainErrorKind::TeamExists,
            Self::PullRequestAlreadyExists { .. } => DomainErrorKind::AlreadyExists,
            Self::PullRequestMerged { .. } => DomainErrorKind::AlreadyMerged,
            Self::ReviewerNotAssigned { .. } => DomainErrorKind::NotAssigned,
            Self::NoCandidate { .. } => DomainErrorKind::NoCandidate,
            Self::DatabaseError { .. } => DomainErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownTeam(team_name) => Self::UnknownTeam { team_name },
            DatabaseError::UnknownUser(user_id) => Self::UnknownUser { user_id },
            DatabaseError::UnknownPullRequest(pull_request_id) => {
                Self::UnknownPullRequest { pull_request_id }
            }
            DatabaseError::TeamAlreadyExists(team_name) => Self::TeamAlreadyExists { team_name },
            DatabaseError::PullRequestAlreadyExists(pull_request_id) => {
                Self::PullRequestAlreadyExists { pull_request_id }
            }
            DatabaseError::PullRequestMerged(pull_request_id) => {
                Self::PullRequestMerged { pull_request_id }
            }
            DatabaseError::ReviewerNotAssigned(pull_request_id, user_id) => {
                Self::ReviewerNotAssigned {
                    pull_request_id,
                    user_id,
                }
            }
            e => Self::DatabaseError { source: e },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
