//! Core business logic - framework-agnostic services shared by the REST API and
//! the Discord bot.

/// Job CRUD and completion toggling
pub mod job;
/// Outcome–output and job–output mapping CRUD
pub mod mapping;
/// Outcome (QBO) CRUD
pub mod outcome;
/// Output (PI) CRUD
pub mod output;
/// Outcome progress propagation engine
pub mod progress;
/// Text rendering of progress for chat surfaces
pub mod report;
/// First-run seeding from `config.toml`
pub mod seed;

use crate::errors::{Error, Result};

/// Trims a required name and rejects it if nothing is left.
pub(crate) fn require_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Rejects `NaN` and infinities.
pub(crate) fn require_finite(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::invalid_input(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(value)
}

/// Rejects a `from`/`to` pair whose difference overflows to an infinity.
///
/// Progress divides by `to - from`, so two finite but huge values of opposite sign
/// would otherwise read as zero progress.
pub(crate) fn require_finite_span(field: &str, from: f64, to: f64) -> Result<()> {
    if !(to - from).is_finite() {
        return Err(Error::invalid_input(format!(
            "{field} span from {from} to {to} is too large"
        )));
    }
    Ok(())
}

/// Generates a fresh opaque id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
