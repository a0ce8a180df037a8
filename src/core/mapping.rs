//! Mapping business logic - the weighted links that carry progress upward.
//!
//! Two kinds exist: job → output (`pi_impact_value`) and output → outcome
//! (`qbo_impact`). Creating a mapping checks that both endpoints exist. The read
//! views report target figures taken from the current output/outcome rows; the
//! legacy snapshot columns are only used when the referenced row has gone away.

use crate::{
    core::{job, new_id, outcome, output, require_finite},
    entities::{
        JobOutputMapping, Outcome, OutcomeOutputMapping, Output, job_output_mapping,
        outcome_output_mapping,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Fields for a new output → outcome mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeOutputMappingInput {
    /// Contributing output
    pub output_id: String,
    /// Receiving outcome
    pub outcome_id: String,
    /// Contribution weight
    pub qbo_impact: f64,
}

/// Fields for a new job → output mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutputMappingInput {
    /// Contributing job
    pub job_id: String,
    /// Receiving output
    pub output_id: String,
    /// Amount of the output's range the job delivers
    pub pi_impact_value: f64,
}

/// Output → outcome mapping with target figures derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeOutputMappingView {
    /// Mapping id
    pub id: String,
    /// Contributing output
    pub output_id: String,
    /// Receiving outcome
    pub outcome_id: String,
    /// Contribution weight
    pub qbo_impact: f64,
    /// Target of the output
    pub pi_target: Option<f64>,
    /// Target of the outcome
    pub qbo_target: Option<f64>,
}

/// Job → output mapping with the output target derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutputMappingView {
    /// Mapping id
    pub id: String,
    /// Contributing job
    pub job_id: String,
    /// Receiving output
    pub output_id: String,
    /// Amount delivered on completion
    pub pi_impact_value: f64,
    /// Target of the output
    pub pi_target: Option<f64>,
}

/// Links an output to an outcome.
#[instrument(skip(db))]
pub async fn create_outcome_output_mapping(
    db: &DatabaseConnection,
    input: OutcomeOutputMappingInput,
) -> Result<outcome_output_mapping::Model> {
    let qbo_impact = require_finite("qboImpact", input.qbo_impact)?;
    if output::get_output_by_id(db, &input.output_id).await?.is_none() {
        return Err(Error::OutputNotFound { id: input.output_id });
    }
    if outcome::get_outcome_by_id(db, &input.outcome_id).await?.is_none() {
        return Err(Error::OutcomeNotFound { id: input.outcome_id });
    }

    let model = outcome_output_mapping::ActiveModel {
        id: Set(new_id()),
        output_id: Set(input.output_id),
        outcome_id: Set(input.outcome_id),
        qbo_impact: Set(qbo_impact),
        pi_target: Set(None),
        qbo_target: Set(None),
    };
    let created = model.insert(db).await?;
    info!(mapping_id = %created.id, "Linked output {} to outcome {}", created.output_id, created.outcome_id);
    Ok(created)
}

/// Links a job to an output. Soft-deleted jobs cannot be linked.
#[instrument(skip(db))]
pub async fn create_job_output_mapping(
    db: &DatabaseConnection,
    input: JobOutputMappingInput,
) -> Result<job_output_mapping::Model> {
    let pi_impact_value = require_finite("piImpactValue", input.pi_impact_value)?;
    match job::get_job_by_id(db, &input.job_id).await? {
        Some(j) if !j.is_deleted => {}
        _ => return Err(Error::JobNotFound { id: input.job_id }),
    }
    if output::get_output_by_id(db, &input.output_id).await?.is_none() {
        return Err(Error::OutputNotFound { id: input.output_id });
    }

    let model = job_output_mapping::ActiveModel {
        id: Set(new_id()),
        job_id: Set(input.job_id),
        output_id: Set(input.output_id),
        pi_impact_value: Set(pi_impact_value),
        pi_target: Set(None),
    };
    let created = model.insert(db).await?;
    info!(mapping_id = %created.id, "Linked job {} to output {}", created.job_id, created.output_id);
    Ok(created)
}

/// Retrieves every output → outcome mapping.
pub async fn get_all_outcome_output_mappings(
    db: &DatabaseConnection,
) -> Result<Vec<outcome_output_mapping::Model>> {
    OutcomeOutputMapping::find().all(db).await.map_err(Into::into)
}

/// Retrieves every job → output mapping.
pub async fn get_all_job_output_mappings(
    db: &DatabaseConnection,
) -> Result<Vec<job_output_mapping::Model>> {
    JobOutputMapping::find().all(db).await.map_err(Into::into)
}

/// Output → outcome mappings with current target figures.
pub async fn list_outcome_output_mapping_views(
    db: &DatabaseConnection,
) -> Result<Vec<OutcomeOutputMappingView>> {
    let mappings = get_all_outcome_output_mappings(db).await?;
    let output_targets: HashMap<String, f64> = Output::find()
        .all(db)
        .await?
        .into_iter()
        .map(|o| (o.id, o.target_value))
        .collect();
    let outcome_targets: HashMap<String, f64> = Outcome::find()
        .all(db)
        .await?
        .into_iter()
        .map(|o| (o.id, o.target_value))
        .collect();

    Ok(mappings
        .into_iter()
        .map(|m| OutcomeOutputMappingView {
            pi_target: output_targets.get(&m.output_id).copied().or(m.pi_target),
            qbo_target: outcome_targets.get(&m.outcome_id).copied().or(m.qbo_target),
            id: m.id,
            output_id: m.output_id,
            outcome_id: m.outcome_id,
            qbo_impact: m.qbo_impact,
        })
        .collect())
}

/// Job → output mappings with current output targets.
pub async fn list_job_output_mapping_views(
    db: &DatabaseConnection,
) -> Result<Vec<JobOutputMappingView>> {
    let mappings = get_all_job_output_mappings(db).await?;
    let output_targets: HashMap<String, f64> = Output::find()
        .all(db)
        .await?
        .into_iter()
        .map(|o| (o.id, o.target_value))
        .collect();

    Ok(mappings
        .into_iter()
        .map(|m| JobOutputMappingView {
            pi_target: output_targets.get(&m.output_id).copied().or(m.pi_target),
            id: m.id,
            job_id: m.job_id,
            output_id: m.output_id,
            pi_impact_value: m.pi_impact_value,
        })
        .collect())
}

/// Deletes an output → outcome mapping.
#[instrument(skip(db))]
pub async fn delete_outcome_output_mapping(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = OutcomeOutputMapping::delete_by_id(id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::MappingNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Deletes a job → output mapping.
#[instrument(skip(db))]
pub async fn delete_job_output_mapping(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = JobOutputMapping::delete_by_id(id.to_string())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::MappingNotFound { id: id.to_string() });
    }
    Ok(())
}
