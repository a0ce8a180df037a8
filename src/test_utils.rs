//! Shared test utilities for `OutcomeBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        job::{self, JobInput},
        mapping::{self, JobOutputMappingInput, OutcomeOutputMappingInput},
        outcome::{self, OutcomeInput},
        output::{self, OutputInput},
    },
    entities,
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::DateTime};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed timestamp for models built by hand in pure tests.
#[must_use]
pub fn fixed_timestamp() -> DateTime {
    chrono::DateTime::from_timestamp(1_767_225_600, 0)
        .unwrap_or_default()
        .naive_utc()
}

/// Builds an [`OutcomeInput`] whose current value starts at the beginning value.
#[must_use]
pub fn outcome_input(name: &str, beginning_value: f64, target_value: f64) -> OutcomeInput {
    OutcomeInput {
        name: name.to_string(),
        unit: None,
        beginning_value,
        current_value: None,
        target_value,
        points: 1.0,
    }
}

/// Creates a test outcome with sensible defaults.
///
/// # Defaults
/// * range: 0 → 100, current 0
/// * points: 1
pub async fn create_test_outcome(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::outcome::Model> {
    outcome::create_outcome(db, outcome_input(name, 0.0, 100.0)).await
}

/// Creates a test outcome with custom values.
pub async fn create_custom_outcome(
    db: &DatabaseConnection,
    name: &str,
    beginning_value: f64,
    current_value: f64,
    target_value: f64,
) -> Result<entities::outcome::Model> {
    outcome::create_outcome(
        db,
        OutcomeInput {
            current_value: Some(current_value),
            ..outcome_input(name, beginning_value, target_value)
        },
    )
    .await
}

/// Creates a test output spanning 0 → 100.
pub async fn create_test_output(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::output::Model> {
    create_custom_output(db, name, 0.0, 100.0).await
}

/// Creates a test output with a custom range.
pub async fn create_custom_output(
    db: &DatabaseConnection,
    name: &str,
    beginning_value: f64,
    target_value: f64,
) -> Result<entities::output::Model> {
    output::create_output(
        db,
        OutputInput {
            name: name.to_string(),
            unit: None,
            beginning_value,
            target_value,
        },
    )
    .await
}

/// Creates an open test job with no due date and impact 1.
pub async fn create_test_job(db: &DatabaseConnection, title: &str) -> Result<entities::job::Model> {
    job::create_job(
        db,
        JobInput {
            title: title.to_string(),
            due_date: None,
            impact: 1.0,
            is_done: None,
        },
    )
    .await
}

/// Links an output to an outcome with the given weight.
pub async fn link_output_to_outcome(
    db: &DatabaseConnection,
    output_id: &str,
    outcome_id: &str,
    qbo_impact: f64,
) -> Result<entities::outcome_output_mapping::Model> {
    mapping::create_outcome_output_mapping(
        db,
        OutcomeOutputMappingInput {
            output_id: output_id.to_string(),
            outcome_id: outcome_id.to_string(),
            qbo_impact,
        },
    )
    .await
}

/// Links a job to an output with the given impact value.
pub async fn link_job_to_output(
    db: &DatabaseConnection,
    job_id: &str,
    output_id: &str,
    pi_impact_value: f64,
) -> Result<entities::job_output_mapping::Model> {
    mapping::create_job_output_mapping(
        db,
        JobOutputMappingInput {
            job_id: job_id.to_string(),
            output_id: output_id.to_string(),
            pi_impact_value,
        },
    )
    .await
}
