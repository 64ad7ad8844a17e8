use std::{io::Write, sync::Arc};

use clap::Parser;
use prassign_config::Config;
use prassign_core::{AssignmentEngine, CoreModule};
use prassign_database_interface::DbService;
use prassign_database_memory::MemoryDb;
use prassign_models::{Team, TeamMember};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
    pub assignment_engine: AssignmentEngine,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version(),
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
            assignment_engine: AssignmentEngine::new(Some(42)),
        }
    }

    /// Store a team whose members are `(user_id, is_active)` pairs.
    pub async fn with_team(self, team_name: &str, members: &[(&str, bool)]) -> Self {
        self.db_service
            .teams_create(Team {
                team_name: team_name.into(),
                members: members
                    .iter()
                    .map(|(user_id, is_active)| TeamMember {
                        user_id: user_id.to_string(),
                        username: format!("User {user_id}"),
                        is_active: *is_active,
                    })
                    .collect(),
            })
            .await
            .unwrap();

        self
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            assignment_engine: self.assignment_engine,
            writer,
        }
    }
}

async fn run_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (crate::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["prassign"];
            tmp_args.extend(command_args);
            tmp_args
        };

        match Args::try_parse_from(command_args) {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail, returning the error message.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err().to_string()
}
