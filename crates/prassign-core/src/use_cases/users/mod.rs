pub(crate) mod list_user_review_pull_requests;
pub(crate) mod set_user_active;

pub use list_user_review_pull_requests::ListUserReviewPullRequestsInterface;
pub use set_user_active::SetUserActiveInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    list_user_review_pull_requests::MockListUserReviewPullRequestsInterface,
    set_user_active::MockSetUserActiveInterface,
};
