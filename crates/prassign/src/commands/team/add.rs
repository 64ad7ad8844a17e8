use std::str::FromStr;

use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::teams::AddTeamInterface;
use prassign_models::{Team, TeamMember};
use shaku::HasComponent;
use thiserror::Error;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

#[derive(Debug, Error)]
#[error("Invalid member '{0}', expected 'id:name' or 'id:name:inactive'")]
pub(crate) struct MemberParseError(String);

/// Team member, written as `id:name` or `id:name:inactive`.
#[derive(Debug, Clone)]
pub(crate) struct MemberArg(TeamMember);

impl FromStr for MemberArg {
    type Err = MemberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MemberParseError(s.into());

        let mut parts = s.split(':');
        let user_id = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let username = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let is_active = match parts.next() {
            None => true,
            Some("inactive") => false,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(TeamMember {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }))
    }
}

/// Create a team with its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    team_name: String,

    /// Team member (`id:name` or `id:name:inactive`)
    #[arg(long = "member")]
    members: Vec<MemberArg>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
        let team = add_team
            .run(
                &ctx.as_core_context(),
                Team {
                    team_name: self.team_name,
                    members: self.members.into_iter().map(|m| m.0).collect(),
                },
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' added with {} member(s).",
            team.team_name,
            team.members.len()
        )?;

        Ok(())
    }
}
