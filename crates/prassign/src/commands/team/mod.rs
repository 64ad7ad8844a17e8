//! Team commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod add;
mod show;

use self::{add::TeamAddCommand, show::TeamShowCommand};

/// Manage teams
#[derive(Parser)]
pub(crate) struct TeamCommand {
    #[clap(subcommand)]
    inner: TeamSubCommand,
}

#[async_trait]
impl Command for TeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum TeamSubCommand {
    Add(TeamAddCommand),
    Show(TeamShowCommand),
}

#[async_trait]
impl Command for TeamSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Add(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
        }
    }
}
