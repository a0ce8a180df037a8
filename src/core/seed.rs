//! First-run seeding of outcomes and outputs listed in config.toml.
//!
//! Seeding is keyed by name: an entry is inserted only when no row with the same
//! name exists, so restarting with the same config never duplicates data and
//! edits made through the API are never overwritten.

use crate::{
    config::settings::Settings,
    core::{
        outcome::{self, OutcomeInput},
        output::{self, OutputInput},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

/// Counts of what a seeding pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Outcomes inserted
    pub outcomes_created: usize,
    /// Outputs inserted
    pub outputs_created: usize,
    /// Entries skipped because a row with that name already existed
    pub skipped: usize,
}

/// Inserts the outcomes and outputs from `settings` that do not exist yet.
#[instrument(skip_all)]
pub async fn seed_initial_data(db: &DatabaseConnection, settings: &Settings) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for seed in &settings.outcomes {
        if outcome::get_outcome_by_name(db, seed.name.trim()).await?.is_some() {
            debug!("Outcome '{}' already exists. Skipping.", seed.name);
            summary.skipped += 1;
            continue;
        }
        outcome::create_outcome(
            db,
            OutcomeInput {
                name: seed.name.clone(),
                unit: seed.unit.clone(),
                beginning_value: seed.beginning_value,
                current_value: seed.current_value,
                target_value: seed.target_value,
                points: seed.points,
            },
        )
        .await?;
        summary.outcomes_created += 1;
    }

    for seed in &settings.outputs {
        if output::get_output_by_name(db, seed.name.trim()).await?.is_some() {
            debug!("Output '{}' already exists. Skipping.", seed.name);
            summary.skipped += 1;
            continue;
        }
        output::create_output(
            db,
            OutputInput {
                name: seed.name.clone(),
                unit: seed.unit.clone(),
                beginning_value: seed.beginning_value,
                target_value: seed.target_value,
            },
        )
        .await?;
        summary.outputs_created += 1;
    }

    info!(
        outcomes = summary.outcomes_created,
        outputs = summary.outputs_created,
        skipped = summary.skipped,
        "Finished seeding initial data"
    );
    Ok(summary)
}
