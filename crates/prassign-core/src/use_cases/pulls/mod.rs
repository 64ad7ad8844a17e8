pub(crate) mod create_pull_request;
pub(crate) mod merge_pull_request;
pub(crate) mod reassign_reviewer;

pub use create_pull_request::CreatePullRequestInterface;
pub use merge_pull_request::MergePullRequestInterface;
pub use reassign_reviewer::{ReassignReviewerInterface, ReassignedReviewer};

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    merge_pull_request::MockMergePullRequestInterface,
    reassign_reviewer::MockReassignReviewerInterface,
};
