//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for OutcomeBuddy: slash commands
//! for reading the progress chart and completing jobs, autocomplete handlers,
//! and the bot context shared by all commands.

/// Discord command implementations (progress, jobs, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    errors::{Error, Result},
    events::EventBus,
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the event bus so that
/// job changes made from Discord reach every other subscriber.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Change notification bus
    pub events: EventBus,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and bus.
    #[must_use]
    pub const fn new(database: DatabaseConnection, events: EventBus) -> Self {
        Self { database, events }
    }
}

/// Poise context type used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and runs the bot until the client stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::progress(),
                commands::jobs(),
                commands::complete_job(),
                commands::reopen_job(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await.map_err(Error::from)
}
