use dotenvy::dotenv;
use outcome_buddy::{
    api::{self, AppState},
    bot::{self, BotData},
    config::{database, settings},
    core::seed,
    errors::Result,
    events::EventBus,
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    if dotenv().is_err() {
        info!("No .env file loaded, using process environment.");
    }

    // 3. Load config.toml (optional)
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed outcomes and outputs listed in config.toml
    seed::seed_initial_data(&db, &app_settings)
        .await
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;

    // 6. Run the API, and the bot when a token is configured
    let events = EventBus::new(app_settings.events.capacity);
    let bind_addr = app_settings.bind_addr();
    let state = AppState::new(db.clone(), events.clone());

    match env::var("DISCORD_BOT_TOKEN") {
        Ok(token) => {
            info!("DISCORD_BOT_TOKEN found, starting bot alongside the API.");
            tokio::try_join!(
                api::serve(&bind_addr, state),
                bot::run_bot(token, BotData::new(db, events)),
            )?;
        }
        Err(_) => {
            warn!("DISCORD_BOT_TOKEN not set, running the API only.");
            api::serve(&bind_addr, state).await?;
        }
    }

    Ok(())
}
