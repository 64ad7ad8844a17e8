use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::pulls::CreatePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Open a pull request and assign its reviewers
#[derive(Parser)]
pub(crate) struct PullRequestCreateCommand {
    /// Pull request ID
    pull_request_id: String,

    /// Pull request name
    pull_request_name: String,

    /// Author user ID
    author_id: String,
}

#[async_trait]
impl Command for PullRequestCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
        let pull_request = create_pull_request
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.pull_request_name,
                &self.author_id,
            )
            .await?;

        let reviewers = if pull_request.assigned_reviewers.is_empty() {
            "none".to_string()
        } else {
            pull_request.assigned_reviewers.join(", ")
        };

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Pull request '{}' created.",
            pull_request.pull_request_id
        )?;
        writeln!(writer, "Reviewers: {reviewers}")?;

        Ok(())
    }
}
