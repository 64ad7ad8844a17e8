use async_trait::async_trait;
use clap::{ArgAction, Parser};
use prassign_core::use_cases::users::SetUserActiveInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Toggle whether a user can be picked as reviewer
#[derive(Parser)]
pub(crate) struct UserSetActiveCommand {
    /// User ID
    user_id: String,

    /// Active status
    #[arg(action = ArgAction::Set)]
    is_active: bool,
}

#[async_trait]
impl Command for UserSetActiveCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
        let user = set_user_active
            .run(&ctx.as_core_context(), &self.user_id, self.is_active)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "User '{}' is now {}.",
            user.user_id,
            if user.is_active { "active" } else { "inactive" }
        )?;

        Ok(())
    }
}
