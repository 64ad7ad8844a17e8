use prassign_database_interface::{DbService, Result};
use prassign_models::{PullRequest, Team, TeamMember};

pub(crate) fn member(user_id: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: user_id.into(),
        username: format!("User {user_id}"),
        is_active,
    }
}

/// Team "backend" with active u1, u2, u3 and inactive u4.
pub(crate) async fn create_backend_team(db: &dyn DbService) -> Result<Team> {
    db.teams_create(Team {
        team_name: "backend".into(),
        members: vec![
            member("u1", true),
            member("u2", true),
            member("u3", true),
            member("u4", false),
        ],
    })
    .await
}

pub(crate) fn pull_request(id: &str, author_id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest {
        pull_request_id: id.into(),
        pull_request_name: format!("Pull request {id}"),
        author_id: author_id.into(),
        assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        ..Default::default()
    }
}
