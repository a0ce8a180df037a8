//! Output business logic - create, read, update and delete PIs.
//!
//! An output sits between jobs and outcomes, so deleting one removes the mappings
//! on both sides of it.

use crate::{
    core::{new_id, require_finite, require_finite_span, require_name},
    entities::{
        JobOutputMapping, OutcomeOutputMapping, Output, job_output_mapping,
        outcome_output_mapping, output,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Fields a caller supplies when creating or replacing an output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputInput {
    /// Display name
    pub name: String,
    /// Optional unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Starting value
    pub beginning_value: f64,
    /// Target value
    pub target_value: f64,
}

/// Creates a new output.
#[instrument(skip(db))]
pub async fn create_output(db: &DatabaseConnection, input: OutputInput) -> Result<output::Model> {
    let name = require_name("Output name", &input.name)?;
    let beginning_value = require_finite("beginningValue", input.beginning_value)?;
    let target_value = require_finite("targetValue", input.target_value)?;
    require_finite_span("Output range", beginning_value, target_value)?;
    let now = chrono::Utc::now().naive_utc();

    let model = output::ActiveModel {
        id: Set(new_id()),
        name: Set(name),
        unit: Set(input.unit.filter(|u| !u.trim().is_empty())),
        beginning_value: Set(beginning_value),
        target_value: Set(target_value),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(output_id = %created.id, "Created output '{}'", created.name);
    Ok(created)
}

/// Retrieves all outputs in creation order.
pub async fn get_all_outputs(db: &DatabaseConnection) -> Result<Vec<output::Model>> {
    Output::find()
        .order_by_asc(output::Column::CreatedAt)
        .order_by_asc(output::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an output by id.
pub async fn get_output_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<output::Model>> {
    Output::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an output by its exact name.
pub async fn get_output_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<output::Model>> {
    Output::find()
        .filter(output::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces every editable field of an output.
#[instrument(skip(db))]
pub async fn update_output(
    db: &DatabaseConnection,
    id: &str,
    input: OutputInput,
) -> Result<output::Model> {
    let name = require_name("Output name", &input.name)?;
    let beginning_value = require_finite("beginningValue", input.beginning_value)?;
    let target_value = require_finite("targetValue", input.target_value)?;
    require_finite_span("Output range", beginning_value, target_value)?;

    let existing = get_output_by_id(db, id)
        .await?
        .ok_or_else(|| Error::OutputNotFound { id: id.to_string() })?;

    let mut active: output::ActiveModel = existing.into();
    active.name = Set(name);
    active.unit = Set(input.unit.filter(|u| !u.trim().is_empty()));
    active.beginning_value = Set(beginning_value);
    active.target_value = Set(target_value);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

/// Deletes an output and every mapping that references it.
#[instrument(skip(db))]
pub async fn delete_output(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;

    OutcomeOutputMapping::delete_many()
        .filter(outcome_output_mapping::Column::OutputId.eq(id))
        .exec(&txn)
        .await?;
    JobOutputMapping::delete_many()
        .filter(job_output_mapping::Column::OutputId.eq(id))
        .exec(&txn)
        .await?;

    let result = Output::delete_by_id(id.to_string()).exec(&txn).await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Err(Error::OutputNotFound { id: id.to_string() });
    }

    txn.commit().await?;
    info!(output_id = id, "Deleted output");
    Ok(())
}
