use async_trait::async_trait;
use prassign_database_interface::{check_reviewers, DatabaseError, DbService, Result};
use prassign_models::{
    PullRequest, PullRequestShort, PullRequestStatus, ReviewerAssignment, Team, TeamMember, User,
};
use sqlx::{error::ErrorKind, PgConnection, PgPool, Postgres, Row, Transaction};

use crate::{
    fields::PullRequestStatusDecode,
    row::{PullRequestRow, PullRequestShortRow, ReviewerAssignmentRow, TeamMemberRow, UserRow},
};

/// SQLSTATEs raised by the `pr_reviewers` guard trigger.
const MERGED_PULL_REQUEST_SQLSTATE: &str = "PRMRG";
const AUTHOR_REVIEWER_SQLSTATE: &str = "PRAUT";

enum Violation {
    Unique,
    ForeignKey,
    MergedPullRequest,
    AuthorReviewer,
}

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(Self::wrap_error)
    }

    async fn commit(transaction: Transaction<'static, Postgres>) -> Result<()> {
        transaction.commit().await.map_err(Self::wrap_error)
    }

    fn wrap_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            Self::wrap_error(e)
        }
    }

    fn violation(e: &sqlx::Error) -> Option<Violation> {
        let db_error = e.as_database_error()?;
        match db_error.code().as_deref() {
            Some(MERGED_PULL_REQUEST_SQLSTATE) => return Some(Violation::MergedPullRequest),
            Some(AUTHOR_REVIEWER_SQLSTATE) => return Some(Violation::AuthorReviewer),
            _ => (),
        }

        match db_error.kind() {
            ErrorKind::UniqueViolation => Some(Violation::Unique),
            ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey),
            _ => None,
        }
    }

    async fn load_team(conn: &mut PgConnection, team_name: &str) -> Result<Option<Team>> {
        let exists = sqlx::query(
            r#"
            SELECT team_name
            FROM teams
            WHERE team_name = $1
        "#,
        )
        .bind(team_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Self::wrap_error)?;

        if exists.is_none() {
            return Ok(None);
        }

        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT user_id, username, is_active
            FROM users
            WHERE team_name = $1
            ORDER BY user_id
        "#,
        )
        .bind(team_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(Self::wrap_error)?;

        Ok(Some(Team {
            team_name: team_name.into(),
            members: members.into_iter().map(TeamMember::from).collect(),
        }))
    }

    async fn load_pull_request(
        conn: &mut PgConnection,
        pull_request_id: &str,
    ) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT pull_request_id, pull_request_name, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE pull_request_id = $1
        "#,
        )
        .bind(pull_request_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Self::wrap_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let assignments = sqlx::query_as::<_, ReviewerAssignmentRow>(
            r#"
            SELECT pr_id, slot, reviewer_id
            FROM pr_reviewers
            WHERE pr_id = $1
            ORDER BY slot
        "#,
        )
        .bind(pull_request_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(Self::wrap_error)?;

        let mut pull_request: PullRequest = row.into();
        pull_request.assigned_reviewers = assignments
            .into_iter()
            .map(|a| ReviewerAssignment::from(a).reviewer_id)
            .collect();

        Ok(Some(pull_request))
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_error)?;

        Ok(())
    }

    ////////
    // Teams

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut transaction = self.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO teams (team_name)
            VALUES ($1)
            ON CONFLICT DO NOTHING
        "#,
        )
        .bind(&instance.team_name)
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?
        .rows_affected();

        if inserted == 0 {
            return Err(DatabaseError::TeamAlreadyExists(instance.team_name));
        }

        for member in &instance.members {
            sqlx::query(
                r#"
                INSERT INTO users
                (
                    user_id,
                    username,
                    team_name,
                    is_active
                )
                VALUES
                (
                    $1,
                    $2,
                    $3,
                    $4
                )
                ON CONFLICT (user_id) DO UPDATE
                SET username = EXCLUDED.username,
                    team_name = EXCLUDED.team_name,
                    is_active = EXCLUDED.is_active
            "#,
            )
            .bind(&member.user_id)
            .bind(&member.username)
            .bind(&instance.team_name)
            .bind(member.is_active)
            .execute(&mut *transaction)
            .await
            .map_err(Self::wrap_error)?;
        }

        let team = Self::load_team(&mut transaction, &instance.team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(instance.team_name.clone()))?;
        Self::commit(transaction).await?;

        Ok(team)
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>> {
        let mut conn = self.pool.acquire().await.map_err(Self::wrap_error)?;
        Self::load_team(&mut conn, team_name).await
    }

    ////////
    // Users

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, team_name, is_active
            FROM users
            WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User> {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET is_active = $2
            WHERE user_id = $1
            RETURNING user_id, username, team_name, is_active
        "#,
        )
        .bind(user_id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|e| Self::wrap_row_not_found(e, DatabaseError::UnknownUser(user_id.into())))
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_active_in_team(&self, team_name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, team_name, is_active
            FROM users
            WHERE team_name = $1
            AND is_active = TRUE
            ORDER BY user_id
        "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    ////////////////
    // Pull requests

    #[tracing::instrument(skip(self))]
    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM pull_requests
                WHERE pull_request_id = $1
            ) AS present
        "#,
        )
        .bind(pull_request_id)
        .fetch_one(&self.pool)
        .await
        .and_then(|row| row.try_get("present"))
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        check_reviewers(&instance)?;

        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO pull_requests
            (
                pull_request_id,
                pull_request_name,
                author_id,
                status
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            )
        "#,
        )
        .bind(&instance.pull_request_id)
        .bind(&instance.pull_request_name)
        .bind(&instance.author_id)
        .bind(PullRequestStatus::Open.to_str())
        .execute(&mut *transaction)
        .await
        .map_err(|e| match Self::violation(&e) {
            Some(Violation::Unique) => {
                DatabaseError::PullRequestAlreadyExists(instance.pull_request_id.clone())
            }
            Some(Violation::ForeignKey) => DatabaseError::UnknownUser(instance.author_id.clone()),
            _ => Self::wrap_error(e),
        })?;

        for assignment in ReviewerAssignment::from_reviewers(
            &instance.pull_request_id,
            &instance.assigned_reviewers,
        ) {
            sqlx::query(
                r#"
                INSERT INTO pr_reviewers
                (
                    pr_id,
                    slot,
                    reviewer_id
                )
                VALUES
                (
                    $1,
                    $2,
                    $3
                )
            "#,
            )
            .bind(&assignment.pull_request_id)
            .bind(assignment.slot as i16)
            .bind(&assignment.reviewer_id)
            .execute(&mut *transaction)
            .await
            .map_err(|e| match Self::violation(&e) {
                Some(Violation::ForeignKey) => {
                    DatabaseError::UnknownUser(assignment.reviewer_id.clone())
                }
                Some(Violation::Unique) => DatabaseError::InvalidReviewers(
                    assignment.pull_request_id.clone(),
                    "duplicate reviewer".into(),
                ),
                Some(Violation::AuthorReviewer) => DatabaseError::InvalidReviewers(
                    assignment.pull_request_id.clone(),
                    "author cannot review".into(),
                ),
                _ => Self::wrap_error(e),
            })?;
        }

        let pull_request = Self::load_pull_request(&mut transaction, &instance.pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(instance.pull_request_id.clone()))?;
        Self::commit(transaction).await?;

        Ok(pull_request)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        let mut conn = self.pool.acquire().await.map_err(Self::wrap_error)?;
        Self::load_pull_request(&mut conn, pull_request_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_set_merged(&self, pull_request_id: &str) -> Result<PullRequest> {
        let mut transaction = self.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE pull_requests
            SET status = $2,
                merged_at = COALESCE(merged_at, now())
            WHERE pull_request_id = $1
        "#,
        )
        .bind(pull_request_id)
        .bind(PullRequestStatus::Merged.to_str())
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?
        .rows_affected();

        if updated == 0 {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }

        let pull_request = Self::load_pull_request(&mut transaction, pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;
        Self::commit(transaction).await?;

        Ok(pull_request)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        let mut transaction = self.begin().await?;

        // Row lock serializes with concurrent merges.
        let (status, author_id): (PullRequestStatus, String) = sqlx::query(
            r#"
            SELECT status, author_id
            FROM pull_requests
            WHERE pull_request_id = $1
            FOR UPDATE
        "#,
        )
        .bind(pull_request_id)
        .fetch_one(&mut *transaction)
        .await
        .and_then(|row| {
            Ok((
                PullRequestStatus::from(row.try_get::<PullRequestStatusDecode, _>("status")?),
                row.try_get::<String, _>("author_id")?,
            ))
        })
        .map_err(|e| {
            Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(pull_request_id.into()))
        })?;

        if status == PullRequestStatus::Merged {
            return Err(DatabaseError::PullRequestMerged(pull_request_id.into()));
        }

        if author_id == new_reviewer_id {
            return Err(DatabaseError::InvalidReviewers(
                pull_request_id.into(),
                "author cannot review".into(),
            ));
        }

        let replaced = sqlx::query(
            r#"
            UPDATE pr_reviewers
            SET reviewer_id = $3
            WHERE pr_id = $1
            AND reviewer_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(old_reviewer_id)
        .bind(new_reviewer_id)
        .execute(&mut *transaction)
        .await
        .map_err(|e| match Self::violation(&e) {
            Some(Violation::Unique) => DatabaseError::ReviewerAlreadyAssigned(
                pull_request_id.into(),
                new_reviewer_id.into(),
            ),
            Some(Violation::ForeignKey) => DatabaseError::UnknownUser(new_reviewer_id.into()),
            Some(Violation::MergedPullRequest) => {
                DatabaseError::PullRequestMerged(pull_request_id.into())
            }
            Some(Violation::AuthorReviewer) => DatabaseError::InvalidReviewers(
                pull_request_id.into(),
                "author cannot review".into(),
            ),
            None => Self::wrap_error(e),
        })?
        .rows_affected();

        if replaced == 0 {
            return Err(DatabaseError::ReviewerNotAssigned(
                pull_request_id.into(),
                old_reviewer_id.into(),
            ));
        }

        Self::commit(transaction).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_for_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        let rows = sqlx::query_as::<_, PullRequestShortRow>(
            r#"
            SELECT pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status
            FROM pull_requests pr
            INNER JOIN pr_reviewers r ON r.pr_id = pr.pull_request_id
            WHERE r.reviewer_id = $1
            ORDER BY pr.created_at, pr.sequence
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
