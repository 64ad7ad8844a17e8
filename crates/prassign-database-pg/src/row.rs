use prassign_models::{PullRequest, PullRequestShort, ReviewerAssignment, TeamMember, User};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct UserRow(User);
pub(crate) struct TeamMemberRow(TeamMember);
pub(crate) struct PullRequestRow(PullRequest);
pub(crate) struct PullRequestShortRow(PullRequestShort);
pub(crate) struct ReviewerAssignmentRow(ReviewerAssignment);

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<TeamMemberRow> for TeamMember {
    fn from(r: TeamMemberRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl From<PullRequestShortRow> for PullRequestShort {
    fn from(r: PullRequestShortRow) -> Self {
        r.0
    }
}

impl From<ReviewerAssignmentRow> for ReviewerAssignment {
    fn from(r: ReviewerAssignmentRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            team_name: row.try_get("team_name")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for TeamMemberRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(TeamMember {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            pull_request_id: row.try_get("pull_request_id")?,
            pull_request_name: row.try_get("pull_request_name")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
            assigned_reviewers: vec![],
            created_at: Some(row.try_get("created_at")?),
            merged_at: row.try_get("merged_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestShortRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequestShort {
            pull_request_id: row.try_get("pull_request_id")?,
            pull_request_name: row.try_get("pull_request_name")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewerAssignmentRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(ReviewerAssignment {
            pull_request_id: row.try_get("pr_id")?,
            slot: row.try_get::<i16, _>("slot")? as u8,
            reviewer_id: row.try_get("reviewer_id")?,
        }))
    }
}
