//! General Discord commands - ping and help.
//! These commands don't touch the database and provide basic bot functionality.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**OutcomeBuddy Help**\n\
        Track outcomes, the outputs that feed them, and the jobs that move them.\n\n\
        **Progress**\n\
        • `/progress` - Achieved vs expected progress for every outcome.\n\n\
        **Jobs**\n\
        • `/jobs` - Lists active jobs and their status.\n\
        • `/complete_job <title>` - Marks a job as done.\n\
        • `/reopen_job <title>` - Marks a job as not done.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Outcomes, outputs and mappings are managed through the web dashboard.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
