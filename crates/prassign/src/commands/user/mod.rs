//! User commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod reviews;
mod set_active;

use self::{reviews::UserReviewsCommand, set_active::UserSetActiveCommand};

/// Manage users
#[derive(Parser)]
pub(crate) struct UserCommand {
    #[clap(subcommand)]
    inner: UserSubCommand,
}

#[async_trait]
impl Command for UserCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum UserSubCommand {
    SetActive(UserSetActiveCommand),
    Reviews(UserReviewsCommand),
}

#[async_trait]
impl Command for UserSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::SetActive(sub) => sub.execute(ctx).await,
            Self::Reviews(sub) => sub.execute(ctx).await,
        }
    }
}
