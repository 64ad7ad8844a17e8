use std::{
    collections::{BTreeSet, HashMap},
    sync::RwLock,
};

use async_trait::async_trait;
use prassign_database_interface::{check_reviewers, DatabaseError, DbService, Result};
use prassign_models::{
    PullRequest, PullRequestShort, PullRequestStatus, ReviewerAssignment, Team, User,
};
use time::OffsetDateTime;

/// In-memory storage.
///
/// Every operation takes the table lock once, so multi-row writes are atomic.
#[derive(Debug, Default)]
pub struct MemoryDb {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    teams: BTreeSet<String>,
    users: HashMap<String, User>,
    pull_requests: HashMap<String, PullRequestEntry>,
    reviewer_assignments: HashMap<(String, u8), ReviewerAssignment>,
    last_sequence: u64,
}

#[derive(Debug)]
struct PullRequestEntry {
    // Reviewers live in `reviewer_assignments`.
    pull_request: PullRequest,
    sequence: u64,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Tables {
    fn load_team(&self, team_name: &str) -> Option<Team> {
        if !self.teams.contains(team_name) {
            return None;
        }

        let mut members: Vec<_> = self
            .users
            .values()
            .filter(|u| u.team_name == team_name)
            .map(User::member)
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Some(Team {
            team_name: team_name.into(),
            members,
        })
    }

    fn load_pull_request(&self, pull_request_id: &str) -> Option<PullRequest> {
        let entry = self.pull_requests.get(pull_request_id)?;

        let mut assignments: Vec<_> = self
            .reviewer_assignments
            .values()
            .filter(|a| a.pull_request_id == pull_request_id)
            .collect();
        assignments.sort_by_key(|a| a.slot);

        let mut pull_request = entry.pull_request.clone();
        pull_request.assigned_reviewers =
            assignments.into_iter().map(|a| a.reviewer_id.clone()).collect();
        Some(pull_request)
    }

    fn next_sequence(&mut self) -> u64 {
        self.last_sequence += 1;
        self.last_sequence
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ////////
    // Teams

    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut tables = self.tables.write().unwrap();
        if tables.teams.contains(&instance.team_name) {
            return Err(DatabaseError::TeamAlreadyExists(instance.team_name));
        }

        tables.teams.insert(instance.team_name.clone());
        for user in instance.users() {
            tables.users.insert(user.user_id.clone(), user);
        }

        Ok(tables
            .load_team(&instance.team_name)
            .unwrap_or(instance))
    }

    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>> {
        Ok(self.tables.read().unwrap().load_team(team_name))
    }

    ////////
    // Users

    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.tables.read().unwrap().users.get(user_id).cloned())
    }

    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User> {
        let mut tables = self.tables.write().unwrap();
        let user = tables
            .users
            .get_mut(user_id)
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))?;
        user.is_active = value;
        Ok(user.clone())
    }

    async fn users_list_active_in_team(&self, team_name: &str) -> Result<Vec<User>> {
        let mut values: Vec<_> = self
            .tables
            .read()
            .unwrap()
            .users
            .values()
            .filter(|u| u.team_name == team_name && u.is_active)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(values)
    }

    ////////////////
    // Pull requests

    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .pull_requests
            .contains_key(pull_request_id))
    }

    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        check_reviewers(&instance)?;

        let mut tables = self.tables.write().unwrap();
        if tables.pull_requests.contains_key(&instance.pull_request_id) {
            return Err(DatabaseError::PullRequestAlreadyExists(
                instance.pull_request_id,
            ));
        }

        for user_id in std::iter::once(&instance.author_id).chain(&instance.assigned_reviewers) {
            if !tables.users.contains_key(user_id) {
                return Err(DatabaseError::UnknownUser(user_id.clone()));
            }
        }

        for assignment in
            ReviewerAssignment::from_reviewers(&instance.pull_request_id, &instance.assigned_reviewers)
        {
            tables.reviewer_assignments.insert(
                (assignment.pull_request_id.clone(), assignment.slot),
                assignment,
            );
        }

        let pull_request_id = instance.pull_request_id.clone();
        let sequence = tables.next_sequence();
        tables.pull_requests.insert(
            pull_request_id.clone(),
            PullRequestEntry {
                pull_request: PullRequest {
                    status: PullRequestStatus::Open,
                    assigned_reviewers: vec![],
                    created_at: Some(OffsetDateTime::now_utc()),
                    merged_at: None,
                    ..instance
                },
                sequence,
            },
        );

        tables
            .load_pull_request(&pull_request_id)
            .ok_or(DatabaseError::UnknownPullRequest(pull_request_id))
    }

    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .load_pull_request(pull_request_id))
    }

    async fn pull_requests_set_merged(&self, pull_request_id: &str) -> Result<PullRequest> {
        let mut tables = self.tables.write().unwrap();
        let entry = tables
            .pull_requests
            .get_mut(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;

        entry.pull_request.status = PullRequestStatus::Merged;
        entry
            .pull_request
            .merged_at
            .get_or_insert_with(OffsetDateTime::now_utc);

        tables
            .load_pull_request(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        let mut tables = self.tables.write().unwrap();
        let pull_request = tables
            .load_pull_request(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;

        if pull_request.is_merged() {
            return Err(DatabaseError::PullRequestMerged(pull_request_id.into()));
        }

        if pull_request.author_id == new_reviewer_id {
            return Err(DatabaseError::InvalidReviewers(
                pull_request_id.into(),
                "author cannot review".into(),
            ));
        }

        let slot = tables
            .reviewer_assignments
            .values()
            .find(|a| a.pull_request_id == pull_request_id && a.reviewer_id == old_reviewer_id)
            .map(|a| a.slot)
            .ok_or_else(|| {
                DatabaseError::ReviewerNotAssigned(pull_request_id.into(), old_reviewer_id.into())
            })?;

        if pull_request.has_reviewer(new_reviewer_id) {
            return Err(DatabaseError::ReviewerAlreadyAssigned(
                pull_request_id.into(),
                new_reviewer_id.into(),
            ));
        }

        if !tables.users.contains_key(new_reviewer_id) {
            return Err(DatabaseError::UnknownUser(new_reviewer_id.into()));
        }

        if let Some(assignment) = tables
            .reviewer_assignments
            .get_mut(&(pull_request_id.to_string(), slot))
        {
            assignment.reviewer_id = new_reviewer_id.into();
        }

        Ok(())
    }

    async fn pull_requests_list_for_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        let tables = self.tables.read().unwrap();
        let mut entries: Vec<_> = tables
            .reviewer_assignments
            .values()
            .filter(|a| a.reviewer_id == user_id)
            .filter_map(|a| tables.pull_requests.get(&a.pull_request_id))
            .collect();
        entries.sort_by_key(|e| (e.pull_request.created_at, e.sequence));

        Ok(entries.into_iter().map(|e| e.pull_request.short()).collect())
    }
}
