//! Job Discord commands - `jobs`, `complete_job` and `reopen_job`.
//!
//! Completion changes go through the same core service as the REST API, so the
//! dashboard hears about them on the event bus.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::job,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    async fn set_done_by_title(
        ctx: poise::Context<'_, BotData, Error>,
        title: &str,
        is_done: bool,
    ) -> Result<()> {
        let data = ctx.data();
        let Some(found) = job::get_active_job_by_title(&data.database, title).await? else {
            ctx.say(format!(
                "❌ Job '{title}' not found. Use `/jobs` to see active jobs."
            ))
            .await?;
            return Ok(());
        };

        if found.is_done == is_done {
            let state = if is_done { "already done" } else { "already open" };
            ctx.say(format!("ℹ️ Job '{}' is {state}.", found.title))
                .await?;
            return Ok(());
        }

        let updated = job::set_job_done(&data.database, &data.events, &found.id, is_done).await?;
        let verb = if is_done { "Completed" } else { "Reopened" };
        ctx.say(format!("✅ {verb} job '{}'", updated.title)).await?;
        Ok(())
    }

    /// Lists all active jobs with their status and due date.
    #[poise::command(slash_command, prefix_command)]
    pub async fn jobs(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let all_jobs = job::get_active_jobs(&ctx.data().database).await?;

        if all_jobs.is_empty() {
            ctx.say("📋 No active jobs.").await?;
            return Ok(());
        }

        let mut response = String::from("📋 **Active Jobs**\n\n");
        for j in &all_jobs {
            let mark = if j.is_done { "✅" } else { "⬜" };
            write!(&mut response, "{mark} {}", j.title)?;
            if let Some(due) = j.due_date {
                write!(&mut response, " (due {due})")?;
            }
            writeln!(&mut response)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Marks a job as done.
    #[poise::command(slash_command, prefix_command)]
    pub async fn complete_job(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Title of the job"]
        #[autocomplete = "autocomplete::autocomplete_job_title"]
        title: String,
    ) -> Result<()> {
        set_done_by_title(ctx, &title, true).await
    }

    /// Marks a job as not done.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reopen_job(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Title of the job"]
        #[autocomplete = "autocomplete::autocomplete_job_title"]
        title: String,
    ) -> Result<()> {
        set_done_by_title(ctx, &title, false).await
    }
}

// Re-export all commands
pub use inner::*;
