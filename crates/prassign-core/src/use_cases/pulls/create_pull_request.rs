use async_trait::async_trait;
use prassign_models::{PullRequest, MAX_REVIEWERS};
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

/// Open a pull request and assign up to two reviewers from the author's team.
#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if pull_request_id.trim().is_empty() {
            return Err(DomainError::invalid_input(
                "pull_request_id must not be empty",
            ));
        }

        if ctx.db_service.pull_requests_exists(pull_request_id).await? {
            return Err(DomainError::PullRequestAlreadyExists {
                pull_request_id: pull_request_id.into(),
            });
        }

        let author = ctx.db_service.users_get_expect(author_id).await?;
        let candidates = ctx
            .db_service
            .users_list_active_in_team(&author.team_name)
            .await?;
        let reviewers =
            ctx.assignment_engine
                .select_reviewers(author_id, &candidates, MAX_REVIEWERS);

        let pull_request = ctx
            .db_service
            .pull_requests_create(PullRequest {
                pull_request_id: pull_request_id.into(),
                pull_request_name: pull_request_name.into(),
                author_id: author_id.into(),
                assigned_reviewers: reviewers,
                ..Default::default()
            })
            .await?;

        info!(
            pull_request_id = pull_request_id,
            reviewers = ?pull_request.assigned_reviewers,
            message = "Pull request created"
        );

        Ok(pull_request)
    }
}
