//! Job business logic - create, edit, complete and delete jobs.
//!
//! Completing or reopening a job is the one mutation that changes expected outcome
//! progress directly, so [`set_job_done`] announces it on the [`EventBus`].
//! Jobs can be soft-deleted (hidden, mappings kept) or hard-deleted (row and
//! job–output mappings removed).

use crate::{
    core::{new_id, require_finite, require_name},
    entities::{Job, JobOutputMapping, job, job_output_mapping},
    errors::{Error, Result},
    events::{DashboardEvent, EventBus},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Fields a caller supplies when creating or replacing a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    /// Short description of the work
    pub title: String,
    /// Optional due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Owner-assigned impact score
    #[serde(default)]
    pub impact: f64,
    /// Completion status; new jobs default to not done, edits keep the stored value
    #[serde(default)]
    pub is_done: Option<bool>,
}

/// Creates a new job.
#[instrument(skip(db))]
pub async fn create_job(db: &DatabaseConnection, input: JobInput) -> Result<job::Model> {
    let title = require_name("Job title", &input.title)?;
    let impact = require_finite("impact", input.impact)?;
    let now = chrono::Utc::now().naive_utc();

    let model = job::ActiveModel {
        id: Set(new_id()),
        title: Set(title),
        is_done: Set(input.is_done.unwrap_or(false)),
        due_date: Set(input.due_date),
        impact: Set(impact),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(job_id = %created.id, "Created job '{}'", created.title);
    Ok(created)
}

/// Retrieves all jobs that have not been soft-deleted, in creation order.
pub async fn get_active_jobs(db: &DatabaseConnection) -> Result<Vec<job::Model>> {
    Job::find()
        .filter(job::Column::IsDeleted.eq(false))
        .order_by_asc(job::Column::CreatedAt)
        .order_by_asc(job::Column::Title)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a job by id, including soft-deleted ones.
pub async fn get_job_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<job::Model>> {
    Job::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active job by its exact title, as typed in chat commands.
pub async fn get_active_job_by_title(
    db: &DatabaseConnection,
    title: &str,
) -> Result<Option<job::Model>> {
    Job::find()
        .filter(job::Column::Title.eq(title))
        .filter(job::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_active_job(db: &DatabaseConnection, id: &str) -> Result<job::Model> {
    match get_job_by_id(db, id).await? {
        Some(job) if !job.is_deleted => Ok(job),
        _ => Err(Error::JobNotFound { id: id.to_string() }),
    }
}

/// Replaces the editable fields of an active job.
#[instrument(skip(db))]
pub async fn update_job(db: &DatabaseConnection, id: &str, input: JobInput) -> Result<job::Model> {
    let existing = require_active_job(db, id).await?;
    let is_done = input.is_done.unwrap_or(existing.is_done);

    let mut active: job::ActiveModel = existing.into();
    active.title = Set(require_name("Job title", &input.title)?);
    active.due_date = Set(input.due_date);
    active.impact = Set(require_finite("impact", input.impact)?);
    active.is_done = Set(is_done);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

/// Marks a job done or not done and publishes [`DashboardEvent::JobProgressUpdated`].
///
/// Setting the status it already has is a no-op that publishes nothing.
#[instrument(skip(db, events))]
pub async fn set_job_done(
    db: &DatabaseConnection,
    events: &EventBus,
    id: &str,
    is_done: bool,
) -> Result<job::Model> {
    let existing = require_active_job(db, id).await?;
    if existing.is_done == is_done {
        return Ok(existing);
    }

    let mut active: job::ActiveModel = existing.into();
    active.is_done = Set(is_done);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active.update(db).await?;

    info!(job_id = id, is_done, "Job completion changed");
    events.publish(DashboardEvent::JobProgressUpdated {
        job_id: updated.id.clone(),
        is_done,
        timestamp: chrono::Utc::now(),
    });
    Ok(updated)
}

/// Hides a job without removing its data or mappings.
#[instrument(skip(db))]
pub async fn soft_delete_job(db: &DatabaseConnection, id: &str) -> Result<job::Model> {
    let existing = require_active_job(db, id).await?;

    let mut active: job::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Permanently removes a job and its job–output mappings.
#[instrument(skip(db))]
pub async fn hard_delete_job(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;

    let removed_links = JobOutputMapping::delete_many()
        .filter(job_output_mapping::Column::JobId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = Job::delete_by_id(id.to_string()).exec(&txn).await?;
    if result.rows_affected == 0 {
        txn.rollback().await?;
        warn!(job_id = id, "Hard delete requested for unknown job");
        return Err(Error::JobNotFound { id: id.to_string() });
    }

    txn.commit().await?;
    info!(job_id = id, removed_links, "Hard-deleted job");
    Ok(())
}
