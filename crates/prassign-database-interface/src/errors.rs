use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Pull request '{0}' is merged, its reviewers are frozen")]
    PullRequestMerged(String),

    #[error("User '{1}' is not a reviewer of pull request '{0}'")]
    ReviewerNotAssigned(String, String),

    #[error("User '{1}' is already a reviewer of pull request '{0}'")]
    ReviewerAlreadyAssigned(String, String),

    #[error("Invalid reviewers for pull request '{0}': {1}")]
    InvalidReviewers(String, String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
