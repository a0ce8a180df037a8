//! Outcome business logic - create, read, update and delete QBOs.
//!
//! Deleting an outcome also removes every outcome–output mapping that points at it.

use crate::{
    core::{new_id, require_finite, require_finite_span, require_name},
    entities::{Outcome, OutcomeOutputMapping, outcome, outcome_output_mapping},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Fields a caller supplies when creating or replacing an outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeInput {
    /// Display name
    pub name: String,
    /// Optional unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Starting value
    pub beginning_value: f64,
    /// Current value; defaults to the beginning value on create
    #[serde(default)]
    pub current_value: Option<f64>,
    /// Target value
    pub target_value: f64,
    /// Priority weight
    #[serde(default)]
    pub points: f64,
}

struct ValidatedOutcome {
    name: String,
    unit: Option<String>,
    beginning_value: f64,
    current_value: f64,
    target_value: f64,
    points: f64,
}

fn validate(input: OutcomeInput) -> Result<ValidatedOutcome> {
    let beginning_value = require_finite("beginningValue", input.beginning_value)?;
    let current_value = require_finite(
        "currentValue",
        input.current_value.unwrap_or(beginning_value),
    )?;
    let target_value = require_finite("targetValue", input.target_value)?;
    require_finite_span("Outcome range", beginning_value, target_value)?;
    require_finite_span("Outcome progress", beginning_value, current_value)?;

    Ok(ValidatedOutcome {
        name: require_name("Outcome name", &input.name)?,
        unit: input.unit.filter(|u| !u.trim().is_empty()),
        beginning_value,
        current_value,
        target_value,
        points: require_finite("points", input.points)?,
    })
}

/// Creates a new outcome after validating its name and numeric fields.
#[instrument(skip(db))]
pub async fn create_outcome(db: &DatabaseConnection, input: OutcomeInput) -> Result<outcome::Model> {
    let v = validate(input)?;
    let now = chrono::Utc::now().naive_utc();

    let model = outcome::ActiveModel {
        id: Set(new_id()),
        name: Set(v.name),
        unit: Set(v.unit),
        beginning_value: Set(v.beginning_value),
        current_value: Set(v.current_value),
        target_value: Set(v.target_value),
        points: Set(v.points),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(outcome_id = %created.id, "Created outcome '{}'", created.name);
    Ok(created)
}

/// Retrieves all outcomes in creation order.
///
/// Outcomes created within the same timestamp tick are listed by name.
pub async fn get_all_outcomes(db: &DatabaseConnection) -> Result<Vec<outcome::Model>> {
    Outcome::find()
        .order_by_asc(outcome::Column::CreatedAt)
        .order_by_asc(outcome::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an outcome by id.
pub async fn get_outcome_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<outcome::Model>> {
    Outcome::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an outcome by its exact name.
pub async fn get_outcome_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<outcome::Model>> {
    Outcome::find()
        .filter(outcome::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_outcome(db: &DatabaseConnection, id: &str) -> Result<outcome::Model> {
    get_outcome_by_id(db, id)
        .await?
        .ok_or_else(|| Error::OutcomeNotFound { id: id.to_string() })
}

/// Replaces every editable field of an outcome.
///
/// When `current_value` is omitted the stored current value is kept.
#[instrument(skip(db))]
pub async fn update_outcome(
    db: &DatabaseConnection,
    id: &str,
    input: OutcomeInput,
) -> Result<outcome::Model> {
    let existing = require_outcome(db, id).await?;
    let keep_current = input.current_value.is_none();
    let v = validate(input)?;
    let current_value = if keep_current {
        existing.current_value
    } else {
        v.current_value
    };
    require_finite_span("Outcome progress", v.beginning_value, current_value)?;

    let mut active: outcome::ActiveModel = existing.into();
    active.name = Set(v.name);
    active.unit = Set(v.unit);
    active.beginning_value = Set(v.beginning_value);
    active.current_value = Set(current_value);
    active.target_value = Set(v.target_value);
    active.points = Set(v.points);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

/// Records a new measured value for an outcome.
#[instrument(skip(db))]
pub async fn set_outcome_current_value(
    db: &DatabaseConnection,
    id: &str,
    current_value: f64,
) -> Result<outcome::Model> {
    let current_value = require_finite("currentValue", current_value)?;
    let existing = require_outcome(db, id).await?;
    require_finite_span("Outcome progress", existing.beginning_value, current_value)?;

    let mut active: outcome::ActiveModel = existing.into();
    active.current_value = Set(current_value);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Deletes an outcome together with the mappings that feed it.
#[instrument(skip(db))]
pub async fn delete_outcome(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;

    let removed_links = OutcomeOutputMapping::delete_many()
        .filter(outcome_output_mapping::Column::OutcomeId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = Outcome::delete_by_id(id.to_string()).exec(&txn).await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Err(Error::OutcomeNotFound { id: id.to_string() });
    }

    txn.commit().await?;
    info!(outcome_id = id, removed_links, "Deleted outcome");
    Ok(())
}
