use std::collections::HashSet;

use async_trait::async_trait;
use prassign_models::Team;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AddTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = AddTeamInterface)]
pub(crate) struct AddTeam;

impl AddTeam {
    fn validate(team: &Team) -> Result<()> {
        if team.team_name.trim().is_empty() {
            return Err(DomainError::invalid_input("team_name must not be empty"));
        }

        let mut known = HashSet::new();
        for member in &team.members {
            if member.user_id.trim().is_empty() {
                return Err(DomainError::invalid_input("user_id must not be empty"));
            }

            if !known.insert(member.user_id.as_str()) {
                return Err(DomainError::invalid_input(format!(
                    "duplicate member '{}'",
                    member.user_id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl AddTeamInterface for AddTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team> {
        Self::validate(&team)?;

        Ok(ctx.db_service.teams_create(team).await?)
    }
}
