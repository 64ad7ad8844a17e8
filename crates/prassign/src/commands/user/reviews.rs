use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::users::ListUserReviewPullRequestsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests a user reviews
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User ID
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_reviews: &dyn ListUserReviewPullRequestsInterface =
            ctx.core_module.resolve_ref();
        let pull_requests = list_reviews
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "No pull request to review for '{}'.", self.user_id)?;
        } else {
            writeln!(writer, "Pull requests reviewed by '{}':", self.user_id)?;
            for pr in pull_requests {
                writeln!(
                    writer,
                    "- {} ({}) by {} [{}]",
                    pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status
                )?;
            }
        }

        Ok(())
    }
}
