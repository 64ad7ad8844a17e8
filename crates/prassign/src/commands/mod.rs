//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use prassign_config::Config;
use prassign_core::{AssignmentEngine, CoreContext, CoreModule};
use prassign_database_interface::DbService;
use tokio::sync::RwLock;

use self::{
    pull_request::PullRequestCommand, server::ServerCommand, team::TeamCommand,
    user::UserCommand,
};
use crate::Result;

mod pull_request;
mod server;
mod team;
mod user;

pub(crate) struct CommandContext {
    pub config: Config,
    pub db_service: Box<dyn DbService>,
    pub core_module: CoreModule,
    pub assignment_engine: AssignmentEngine,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            assignment_engine: &self.assignment_engine,
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Teams(TeamCommand),
    Users(UserCommand),
    PullRequests(PullRequestCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Teams(sub) => sub.execute(ctx).await,
            Self::Users(sub) => sub.execute(ctx).await,
            Self::PullRequests(sub) => sub.execute(ctx).await,
        }
    }
}
