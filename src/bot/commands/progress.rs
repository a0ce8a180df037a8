//! Progress Discord command - renders the dashboard chart as paged embeds.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{
            progress::{self, TimeFilter},
            report,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;

    /// Discord rejects embeds with more fields than this.
    const MAX_EMBED_FIELDS: usize = 25;

    /// Shows achieved vs expected progress for every outcome.
    ///
    /// Achieved progress comes from each outcome's measured value; expected progress
    /// is what completed jobs imply through the output mappings. Optional dates
    /// (YYYY-MM-DD) limit which jobs count by due date.
    #[poise::command(slash_command, prefix_command)]
    pub async fn progress(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only count jobs due on or after this date (YYYY-MM-DD)"]
        from: Option<String>,
        #[description = "Only count jobs due on or before this date (YYYY-MM-DD)"]
        to: Option<String>,
    ) -> Result<()> {
        use poise::serenity_prelude as serenity;

        let parse = |raw: Option<String>| -> Result<Option<NaiveDate>> {
            raw.map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|e| Error::invalid_input(format!("invalid date '{s}': {e}")))
            })
            .transpose()
        };
        let filter = TimeFilter {
            from: parse(from)?,
            to: parse(to)?,
        };

        ctx.defer().await?;
        let entries = progress::chart_for_dashboard(&ctx.data().database, filter).await?;

        if entries.is_empty() {
            ctx.say("📊 No outcomes defined yet. Add some through the dashboard to get started!")
                .await?;
            return Ok(());
        }

        let description = if filter.is_active() {
            format!(
                "Jobs due {} → {}",
                filter.from.map_or_else(|| "any".to_string(), |d| d.to_string()),
                filter.to.map_or_else(|| "any".to_string(), |d| d.to_string()),
            )
        } else {
            "All jobs".to_string()
        };
        let footer = format!(
            "OutcomeBuddy v{} | {} outcome{}",
            env!("CARGO_PKG_VERSION"),
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );

        // One embed per reply keeps each message under Discord's field and size caps.
        let pages = report::report_pages(&entries, MAX_EMBED_FIELDS);
        let page_count = pages.len();
        for (index, page) in pages.into_iter().enumerate() {
            let title = if page_count > 1 {
                format!("📊 Outcome Progress ({}/{page_count})", index + 1)
            } else {
                "📊 Outcome Progress".to_string()
            };
            let fields = page
                .into_iter()
                .map(|(heading, body)| (heading, body, false));

            let embed = serenity::CreateEmbed::default()
                .title(title)
                .description(description.as_str())
                .color(0x0034_98DB)
                .fields(fields)
                .footer(serenity::CreateEmbedFooter::new(footer.as_str()));

            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
