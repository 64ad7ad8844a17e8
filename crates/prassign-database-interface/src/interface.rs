use async_trait::async_trait;
use prassign_models::{PullRequest, PullRequestShort, Team, User, MAX_REVIEWERS};

use crate::{DatabaseError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    /// Create a team and upsert its members in one transaction.
    ///
    /// Members already known are moved to this team and refreshed.
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, team_name: &str) -> Result<Team> {
        self.teams_get(team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(team_name.into()))
    }

    async fn users_get(&self, user_id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, user_id: &str) -> Result<User> {
        self.users_get(user_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))
    }
    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User>;
    /// Active users of a team, ordered by user id.
    async fn users_list_active_in_team(&self, team_name: &str) -> Result<Vec<User>>;

    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool>;
    /// Insert an open pull request with its reviewer slots in one transaction.
    ///
    /// Status and timestamps of `instance` are ignored.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, pull_request_id: &str) -> Result<PullRequest> {
        self.pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }
    /// Mark as merged, keeping the first merge timestamp.
    async fn pull_requests_set_merged(&self, pull_request_id: &str) -> Result<PullRequest>;
    /// Swap `old_reviewer_id` for `new_reviewer_id` in its slot.
    ///
    /// Only matches if `old_reviewer_id` is still assigned and the pull request is open.
    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()>;
    /// Pull requests where the user holds a reviewer slot, oldest first.
    async fn pull_requests_list_for_reviewer(&self, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
}

/// Check a reviewer list before it is persisted.
pub fn check_reviewers(instance: &PullRequest) -> Result<()> {
    let reviewers = &instance.assigned_reviewers;
    let invalid = |reason: &str| {
        Err(DatabaseError::InvalidReviewers(
            instance.pull_request_id.clone(),
            reason.into(),
        ))
    };

    if reviewers.len() > MAX_REVIEWERS {
        return invalid("too many reviewers");
    }

    if reviewers.iter().any(|r| r == &instance.author_id) {
        return invalid("author cannot review");
    }

    if reviewers.len() == 2 && reviewers[0] == reviewers[1] {
        return invalid("duplicate reviewer");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pull_request(author_id: &str, reviewers: &[&str]) -> PullRequest {
        PullRequest {
            pull_request_id: "pr-1".into(),
            author_id: author_id.into(),
            assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn reviewer_checks() {
        assert!(check_reviewers(&pull_request("u1", &[])).is_ok());
        assert!(check_reviewers(&pull_request("u1", &["u2", "u3"])).is_ok());
        assert!(matches!(
            check_reviewers(&pull_request("u1", &["u2", "u3", "u4"])),
            Err(DatabaseError::InvalidReviewers(_, _))
        ));
        assert!(matches!(
            check_reviewers(&pull_request("u1", &["u1"])),
            Err(DatabaseError::InvalidReviewers(_, _))
        ));
        assert!(matches!(
            check_reviewers(&pull_request("u1", &["u2", "u2"])),
            Err(DatabaseError::InvalidReviewers(_, _))
        ));
    }
}
