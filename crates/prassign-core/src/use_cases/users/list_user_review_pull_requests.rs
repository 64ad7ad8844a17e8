use async_trait::async_trait;
use prassign_models::PullRequestShort;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewPullRequestsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
}

/// Pull requests reviewed by a user, oldest first, whatever their status.
#[derive(Component)]
#[shaku(interface = ListUserReviewPullRequestsInterface)]
pub(crate) struct ListUserReviewPullRequests;

#[async_trait]
impl ListUserReviewPullRequestsInterface for ListUserReviewPullRequests {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        Ok(ctx
            .db_service
            .pull_requests_list_for_reviewer(user_id)
            .await?)
    }
}
