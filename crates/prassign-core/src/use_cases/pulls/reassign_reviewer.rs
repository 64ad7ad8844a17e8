use async_trait::async_trait;
use prassign_database_interface::DatabaseError;
use prassign_models::PullRequest;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignedReviewer {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedReviewer>;
}

/// Swap one reviewer of an open pull request for a random active teammate
/// of the departing reviewer.
#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedReviewer> {
        let pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        if pull_request.is_merged() {
            return Err(DomainError::PullRequestMerged {
                pull_request_id: pull_request_id.into(),
            });
        }

        if !pull_request.has_reviewer(old_reviewer_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                user_id: old_reviewer_id.into(),
            });
        }

        let old_reviewer = ctx.db_service.users_get_expect(old_reviewer_id).await?;
        let candidates = ctx
            .db_service
            .users_list_active_in_team(&old_reviewer.team_name)
            .await?;

        let no_candidate = || DomainError::NoCandidate {
            pull_request_id: pull_request_id.into(),
            user_id: old_reviewer_id.into(),
        };

        let new_reviewer_id = ctx
            .assignment_engine
            .select_replacement(old_reviewer_id, &pull_request, &candidates)
            .ok_or_else(no_candidate)?;

        match ctx
            .db_service
            .pull_requests_replace_reviewer(pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await
        {
            Ok(()) => (),
            // Picked candidate was assigned concurrently.
            Err(DatabaseError::ReviewerAlreadyAssigned(_, _)) => return Err(no_candidate()),
            Err(e) => return Err(e.into()),
        }

        info!(
            pull_request_id = pull_request_id,
            old_reviewer_id = old_reviewer_id,
            new_reviewer_id = %new_reviewer_id,
            message = "Reviewer reassigned"
        );

        Ok(ReassignedReviewer {
            pull_request: ctx
                .db_service
                .pull_requests_get_expect(pull_request_id)
                .await?,
            replaced_by: new_reviewer_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prassign_database_interface::{DbService, MockDbService};
    use prassign_models::User;

    use super::*;
    use crate::{context::tests::CoreContextTest, DomainErrorKind};

    async fn open(ctx: &CoreContextTest, id: &str, author_id: &str, reviewers: &[&str]) {
        ctx.db_service
            .pull_requests_create(PullRequest {
                pull_request_id: id.into(),
                author_id: author_id.into(),
                assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn replaces_in_place() {
        let ctx = CoreContextTest::new()
            .with_team(
                "backend",
                &[
                    ("u1", true),
                    ("u2", true),
                    ("u3", true),
                    ("u4", true),
                    ("u5", false),
                ],
            )
            .await;
        open(&ctx, "pr-1", "u1", &["u2", "u3"]).await;

        let result = ReassignReviewer
            .run(&ctx.as_context(), "pr-1", "u2")
            .await
            .unwrap();

        assert_eq!(result.replaced_by, "u4");
        assert_eq!(result.pull_request.assigned_reviewers, vec!["u4", "u3"]);
    }

    #[tokio::test]
    async fn uses_the_departing_reviewer_team() {
        let ctx = CoreContextTest::new()
            .with_team("backend", &[("u1", true)])
            .await
            .with_team("frontend", &[("f1", true), ("f2", true)])
            .await;
        open(&ctx, "pr-1", "u1", &["f1"]).await;

        let result = ReassignReviewer
            .run(&ctx.as_context(), "pr-1", "f1")
            .await
            .unwrap();
        assert_eq!(result.replaced_by, "f2");
    }

    #[tokio::test]
    async fn no_candidate() {
        let ctx = CoreContextTest::new()
            .with_team("pair", &[("p1", true), ("p2", true)])
            .await;
        open(&ctx, "pr-1", "p1", &["p2"]).await;

        let err = ReassignReviewer
            .run(&ctx.as_context(), "pr-1", "p2")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), DomainErrorKind::NoCandidate);

        let pr = ctx.db_service.pull_requests_get_expect("pr-1").await.unwrap();
        assert_eq!(pr.assigned_reviewers, vec!["p2"]);
    }

    #[tokio::test]
    async fn rejected_states() {
        let ctx = CoreContextTest::new()
            .with_team("backend", &[("u1", true), ("u2", true), ("u3", true)])
            .await;
        open(&ctx, "pr-1", "u1", &["u2"]).await;

        let kind = |r: Result<ReassignedReviewer>| r.unwrap_err().kind();

        assert_eq!(
            kind(ReassignReviewer.run(&ctx.as_context(), "pr-404", "u2").await),
            DomainErrorKind::NotFound
        );
        assert_eq!(
            kind(ReassignReviewer.run(&ctx.as_context(), "pr-1", "u3").await),
            DomainErrorKind::NotAssigned
        );

        ctx.db_service.pull_requests_set_merged("pr-1").await.unwrap();
        assert_eq!(
            kind(ReassignReviewer.run(&ctx.as_context(), "pr-1", "u2").await),
            DomainErrorKind::AlreadyMerged
        );
        assert_eq!(
            kind(ReassignReviewer.run(&ctx.as_context(), "pr-1", "u3").await),
            DomainErrorKind::AlreadyMerged
        );
    }

    fn racing_db(replace_error: fn() -> DatabaseError) -> MockDbService {
        let mut svc = MockDbService::new();

        svc.expect_pull_requests_get_expect()
            .once()
            .returning(|_| {
                Ok(PullRequest {
                    pull_request_id: "pr-1".into(),
                    author_id: "u1".into(),
                    assigned_reviewers: vec!["u2".into()],
                    ..Default::default()
                })
            });
        svc.expect_users_get_expect().once().returning(|id| {
            Ok(User {
                user_id: id.into(),
                team_name: "backend".into(),
                is_active: true,
                ..Default::default()
            })
        });
        svc.expect_users_list_active_in_team()
            .once()
            .returning(|team_name| {
                Ok(["u1", "u2", "u3"]
                    .iter()
                    .map(|id| User {
                        user_id: id.to_string(),
                        team_name: team_name.into(),
                        is_active: true,
                        ..Default::default()
                    })
                    .collect())
            });
        svc.expect_pull_requests_replace_reviewer()
            .once()
            .withf(|pr, old, new| pr == "pr-1" && old == "u2" && new == "u3")
            .returning(move |_, _, _| Err(replace_error()));

        svc
    }

    #[tokio::test]
    async fn lost_races() {
        let ctx = CoreContextTest::new();

        let cases: [(fn() -> DatabaseError, DomainErrorKind); 3] = [
            (
                || DatabaseError::ReviewerNotAssigned("pr-1".into(), "u2".into()),
                DomainErrorKind::NotAssigned,
            ),
            (
                || DatabaseError::PullRequestMerged("pr-1".into()),
                DomainErrorKind::AlreadyMerged,
            ),
            (
                || DatabaseError::ReviewerAlreadyAssigned("pr-1".into(), "u3".into()),
                DomainErrorKind::NoCandidate,
            ),
        ];

        for (replace_error, expected) in cases {
            let db_service = racing_db(replace_error);
            let err = ReassignReviewer
                .run(
                    &CoreContext {
                        db_service: &db_service,
                        ..ctx.as_context()
                    },
                    "pr-1",
                    "u2",
                )
                .await
                .unwrap_err();

            assert_eq!(err.kind(), expected);
        }
    }
}
