//! Outcome progress propagation.
//!
//! For every outcome this module computes two percentages:
//!
//! - **achieved**: measured directly from the outcome's own beginning, current
//!   and target values.
//! - **expected**: inferred by pushing the impact of completed jobs up the
//!   mapping graph, job → output → outcome.
//!
//! The arithmetic is pure and synchronous. [`load_progress_inputs`] gathers the
//! five collections it needs from the database concurrently and fails as a
//! whole if any single fetch fails.

use crate::{
    core::{job, mapping, outcome, output},
    entities::{
        JobModel, JobOutputMappingModel, OutcomeModel, OutcomeOutputMappingModel, OutputModel,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// One bar of the dashboard progress chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    /// Outcome id the entry was computed for
    pub outcome_id: String,
    /// Outcome display name
    pub name: String,
    /// Directly measured progress, in `[0, 100]`
    pub achieved_outcome: f64,
    /// Progress implied by completed jobs, in `[0, 100]`
    pub expected_outcome: f64,
}

/// Everything the engine reads, already materialized in memory.
#[derive(Debug, Clone, Default)]
pub struct ProgressInputs {
    /// Outcomes, in the order the chart should list them
    pub outcomes: Vec<OutcomeModel>,
    /// All outputs
    pub outputs: Vec<OutputModel>,
    /// Output → outcome weights
    pub outcome_output_mappings: Vec<OutcomeOutputMappingModel>,
    /// Jobs whose completion status drives expected progress
    pub jobs: Vec<JobModel>,
    /// Job → output weights
    pub job_output_mappings: Vec<JobOutputMappingModel>,
}

impl ProgressInputs {
    /// Runs [`transform_for_chart`] over these inputs.
    #[must_use]
    pub fn chart(&self) -> Vec<ChartEntry> {
        transform_for_chart(
            &self.outcomes,
            &self.outputs,
            &self.outcome_output_mappings,
            &self.jobs,
            &self.job_output_mappings,
        )
    }
}

/// Inclusive due-date window applied to jobs before expected progress is computed.
///
/// With no bound set every job is kept. Once either bound is set, jobs without a
/// due date are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFilter {
    /// Earliest due date to keep
    pub from: Option<NaiveDate>,
    /// Latest due date to keep
    pub to: Option<NaiveDate>,
}

impl TimeFilter {
    /// Filter that keeps every job.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Whether any bound is set.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Rejects windows whose start lies after their end.
    pub fn validate(&self) -> Result<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(Error::invalid_input(format!(
                "time filter start {from} is after end {to}"
            ))),
            _ => Ok(()),
        }
    }

    /// Whether a job with this due date passes the filter.
    #[must_use]
    pub fn includes(&self, due_date: Option<NaiveDate>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(due) = due_date else {
            return false;
        };
        self.from.is_none_or(|from| due >= from) && self.to.is_none_or(|to| due <= to)
    }

    /// Keeps only the jobs that pass the filter.
    #[must_use]
    pub fn apply(&self, jobs: Vec<JobModel>) -> Vec<JobModel> {
        if !self.is_active() {
            return jobs;
        }
        jobs.into_iter()
            .filter(|j| self.includes(j.due_date))
            .collect()
    }
}

/// Divides, treating a zero denominator as "no progress".
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Scales a fraction to a percentage in `[0, 100]`. `NaN` becomes 0.
fn to_clamped_percent(fraction: f64) -> f64 {
    let percent = fraction * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

/// Directly measured progress for every outcome, keyed by outcome id.
///
/// `(current - beginning) / (target - beginning)` as a percentage clamped to
/// `[0, 100]`; an outcome whose target equals its beginning value reads 0.
#[must_use]
pub fn compute_actual_progress(outcomes: &[OutcomeModel]) -> HashMap<String, f64> {
    outcomes
        .iter()
        .map(|o| {
            let ratio = guarded_ratio(
                o.current_value - o.beginning_value,
                o.target_value - o.beginning_value,
            );
            (o.id.clone(), to_clamped_percent(ratio))
        })
        .collect()
}

/// Fractional progress of every output delivered by completed jobs, keyed by output id.
///
/// Only mappings whose job is done count. Mappings that point at unknown jobs or
/// outputs contribute nothing. The result is a fraction of the output's range and
/// is left unclamped.
#[must_use]
pub fn compute_output_progress(
    outputs: &[OutputModel],
    jobs: &[JobModel],
    job_output_mappings: &[JobOutputMappingModel],
) -> HashMap<String, f64> {
    let completed: HashSet<&str> = jobs
        .iter()
        .filter(|j| j.is_done)
        .map(|j| j.id.as_str())
        .collect();

    let mut delivered: HashMap<&str, f64> = outputs.iter().map(|o| (o.id.as_str(), 0.0)).collect();
    for mapping in job_output_mappings {
        if !completed.contains(mapping.job_id.as_str()) {
            continue;
        }
        if let Some(total) = delivered.get_mut(mapping.output_id.as_str()) {
            *total += mapping.pi_impact_value;
        }
    }

    outputs
        .iter()
        .map(|o| {
            let total = delivered.get(o.id.as_str()).copied().unwrap_or(0.0);
            let progress = guarded_ratio(total, o.target_value - o.beginning_value);
            (o.id.clone(), progress)
        })
        .collect()
}

/// Progress implied by completed jobs for every outcome, keyed by outcome id.
///
/// Each outcome–output mapping adds
/// `qbo_impact * output_progress / (target - beginning)` to its outcome. The sum is
/// only clamped at the end, so many heavily weighted outputs can push an outcome
/// past 100% before it is capped.
#[must_use]
pub fn compute_expected_progress(
    outcomes: &[OutcomeModel],
    outputs: &[OutputModel],
    outcome_output_mappings: &[OutcomeOutputMappingModel],
    jobs: &[JobModel],
    job_output_mappings: &[JobOutputMappingModel],
) -> HashMap<String, f64> {
    let output_progress = compute_output_progress(outputs, jobs, job_output_mappings);
    let by_id: HashMap<&str, &OutcomeModel> = outcomes.iter().map(|o| (o.id.as_str(), o)).collect();

    let mut accumulated: HashMap<&str, f64> = outcomes.iter().map(|o| (o.id.as_str(), 0.0)).collect();
    for mapping in outcome_output_mappings {
        let Some(outcome) = by_id.get(mapping.outcome_id.as_str()) else {
            continue;
        };
        let progress = output_progress
            .get(&mapping.output_id)
            .copied()
            .unwrap_or(0.0);
        let contribution = guarded_ratio(
            mapping.qbo_impact * progress,
            outcome.target_value - outcome.beginning_value,
        );
        if let Some(total) = accumulated.get_mut(mapping.outcome_id.as_str()) {
            *total += contribution;
        }
    }

    accumulated
        .into_iter()
        .map(|(id, total)| (id.to_string(), to_clamped_percent(total)))
        .collect()
}

/// Merges achieved and expected progress into chart entries, one per outcome,
/// in the order of `outcomes`.
#[must_use]
pub fn transform_for_chart(
    outcomes: &[OutcomeModel],
    outputs: &[OutputModel],
    outcome_output_mappings: &[OutcomeOutputMappingModel],
    jobs: &[JobModel],
    job_output_mappings: &[JobOutputMappingModel],
) -> Vec<ChartEntry> {
    let actual = compute_actual_progress(outcomes);
    let expected = compute_expected_progress(
        outcomes,
        outputs,
        outcome_output_mappings,
        jobs,
        job_output_mappings,
    );

    outcomes
        .iter()
        .map(|o| ChartEntry {
            outcome_id: o.id.clone(),
            name: o.name.clone(),
            achieved_outcome: actual.get(&o.id).copied().unwrap_or(0.0),
            expected_outcome: expected.get(&o.id).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Fetches the five collections the engine needs, concurrently.
///
/// Soft-deleted jobs are excluded and `filter` is applied to the rest. If any
/// fetch fails the whole load fails.
#[instrument(skip(db))]
pub async fn load_progress_inputs(
    db: &DatabaseConnection,
    filter: TimeFilter,
) -> Result<ProgressInputs> {
    filter.validate()?;

    let (outcomes, outputs, outcome_output_mappings, jobs, job_output_mappings) = tokio::try_join!(
        outcome::get_all_outcomes(db),
        output::get_all_outputs(db),
        mapping::get_all_outcome_output_mappings(db),
        job::get_active_jobs(db),
        mapping::get_all_job_output_mappings(db),
    )?;

    let jobs = filter.apply(jobs);
    debug!(
        outcomes = outcomes.len(),
        outputs = outputs.len(),
        jobs = jobs.len(),
        "Loaded progress inputs"
    );

    Ok(ProgressInputs {
        outcomes,
        outputs,
        outcome_output_mappings,
        jobs,
        job_output_mappings,
    })
}

/// Loads everything and returns the dashboard chart.
pub async fn chart_for_dashboard(
    db: &DatabaseConnection,
    filter: TimeFilter,
) -> Result<Vec<ChartEntry>> {
    let inputs = load_progress_inputs(db, filter).await?;
    Ok(inputs.chart())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn outcome_model(id: &str, beginning: f64, current: f64, target: f64) -> OutcomeModel {
        OutcomeModel {
            id: id.to_string(),
            name: format!("Outcome {id}"),
            unit: None,
            beginning_value: beginning,
            current_value: current,
            target_value: target,
            points: 1.0,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    fn output_model(id: &str, beginning: f64, target: f64) -> OutputModel {
        OutputModel {
            id: id.to_string(),
            name: format!("Output {id}"),
            unit: None,
            beginning_value: beginning,
            target_value: target,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    fn job_model(id: &str, is_done: bool, due_date: Option<NaiveDate>) -> JobModel {
        JobModel {
            id: id.to_string(),
            title: format!("Job {id}"),
            is_done,
            due_date,
            impact: 1.0,
            is_deleted: false,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    fn job_link(job_id: &str, output_id: &str, value: f64) -> JobOutputMappingModel {
        JobOutputMappingModel {
            id: format!("{job_id}->{output_id}"),
            job_id: job_id.to_string(),
            output_id: output_id.to_string(),
            pi_impact_value: value,
            pi_target: None,
        }
    }

    fn outcome_link(output_id: &str, outcome_id: &str, impact: f64) -> OutcomeOutputMappingModel {
        OutcomeOutputMappingModel {
            id: format!("{output_id}->{outcome_id}"),
            output_id: output_id.to_string(),
            outcome_id: outcome_id.to_string(),
            qbo_impact: impact,
            pi_target: None,
            qbo_target: None,
        }
    }

    /// Output {0..50} with one job worth 25, feeding outcome {0..10} at weight 10.
    fn single_chain(job_done: bool) -> ProgressInputs {
        ProgressInputs {
            outcomes: vec![outcome_model("q1", 0.0, 0.0, 10.0)],
            outputs: vec![output_model("p1", 0.0, 50.0)],
            outcome_output_mappings: vec![outcome_link("p1", "q1", 10.0)],
            jobs: vec![job_model("j1", job_done, None)],
            job_output_mappings: vec![job_link("j1", "p1", 25.0)],
        }
    }

    #[test]
    fn test_actual_progress_midway() {
        let outcomes = vec![outcome_model("q1", 0.0, 40.0, 100.0)];
        let actual = compute_actual_progress(&outcomes);
        assert_eq!(actual["q1"], 40.0);
    }

    #[test]
    fn test_actual_progress_zero_range_is_zero() {
        let outcomes = vec![
            outcome_model("q1", 20.0, 20.0, 20.0),
            outcome_model("q2", 20.0, 75.0, 20.0),
        ];
        let actual = compute_actual_progress(&outcomes);
        assert_eq!(actual["q1"], 0.0);
        assert_eq!(actual["q2"], 0.0);
    }

    #[test]
    fn test_actual_progress_is_clamped() {
        let outcomes = vec![
            outcome_model("over", 0.0, 250.0, 100.0),
            outcome_model("under", 50.0, 10.0, 100.0),
        ];
        let actual = compute_actual_progress(&outcomes);
        assert_eq!(actual["over"], 100.0);
        assert_eq!(actual["under"], 0.0);
    }

    #[test]
    fn test_actual_progress_decreasing_target() {
        // Reducing churn from 10 to 2: currently at 6 is halfway
        let outcomes = vec![outcome_model("q1", 10.0, 6.0, 2.0)];
        let actual = compute_actual_progress(&outcomes);
        assert_eq!(actual["q1"], 50.0);
    }

    #[test]
    fn test_output_progress_from_completed_job() {
        let inputs = single_chain(true);
        let progress =
            compute_output_progress(&inputs.outputs, &inputs.jobs, &inputs.job_output_mappings);
        assert_eq!(progress["p1"], 0.5);
    }

    #[test]
    fn test_expected_progress_from_completed_job() {
        let chart = single_chain(true).chart();
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].expected_outcome, 50.0);
    }

    #[test]
    fn test_incomplete_job_contributes_nothing() {
        let inputs = single_chain(false);
        let progress =
            compute_output_progress(&inputs.outputs, &inputs.jobs, &inputs.job_output_mappings);
        assert_eq!(progress["p1"], 0.0);
        assert_eq!(inputs.chart()[0].expected_outcome, 0.0);
    }

    #[test]
    fn test_outcome_without_mappings_keeps_its_name() {
        let mut inputs = single_chain(true);
        inputs
            .outcomes
            .push(outcome_model("lonely", 0.0, 3.0, 12.0));

        let chart = inputs.chart();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[1].name, "Outcome lonely");
        assert_eq!(chart[1].expected_outcome, 0.0);
        assert_eq!(chart[1].achieved_outcome, 25.0);
    }

    #[test]
    fn test_chart_preserves_outcome_order() {
        let inputs = ProgressInputs {
            outcomes: vec![
                outcome_model("c", 0.0, 1.0, 10.0),
                outcome_model("a", 0.0, 2.0, 10.0),
                outcome_model("b", 0.0, 3.0, 10.0),
            ],
            ..Default::default()
        };
        let ids: Vec<String> = inputs.chart().into_iter().map(|e| e.outcome_id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_zero_range_output_and_outcome_yield_zero() {
        let inputs = ProgressInputs {
            outcomes: vec![
                outcome_model("flat", 5.0, 5.0, 5.0),
                outcome_model("q2", 0.0, 0.0, 10.0),
            ],
            outputs: vec![output_model("flat_out", 7.0, 7.0), output_model("p2", 0.0, 10.0)],
            outcome_output_mappings: vec![
                outcome_link("flat_out", "q2", 10.0),
                outcome_link("p2", "flat", 10.0),
            ],
            jobs: vec![job_model("j1", true, None)],
            job_output_mappings: vec![job_link("j1", "flat_out", 3.0), job_link("j1", "p2", 5.0)],
        };

        let expected = compute_expected_progress(
            &inputs.outcomes,
            &inputs.outputs,
            &inputs.outcome_output_mappings,
            &inputs.jobs,
            &inputs.job_output_mappings,
        );
        assert_eq!(expected["flat"], 0.0);
        assert_eq!(expected["q2"], 0.0);
        assert!(expected.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_fan_in_sums_then_clamps() {
        // Two outputs each at 100% with weight 8 toward an outcome spanning 10
        let inputs = ProgressInputs {
            outcomes: vec![outcome_model("q1", 0.0, 0.0, 10.0)],
            outputs: vec![output_model("p1", 0.0, 1.0), output_model("p2", 0.0, 1.0)],
            outcome_output_mappings: vec![outcome_link("p1", "q1", 8.0), outcome_link("p2", "q1", 8.0)],
            jobs: vec![job_model("j1", true, None)],
            job_output_mappings: vec![job_link("j1", "p1", 1.0), job_link("j1", "p2", 1.0)],
        };
        assert_eq!(inputs.chart()[0].expected_outcome, 100.0);

        // Below the cap the contributions add up exactly
        let mut half = inputs;
        half.job_output_mappings = vec![job_link("j1", "p1", 0.25), job_link("j1", "p2", 0.25)];
        assert_eq!(half.chart()[0].expected_outcome, 40.0);
    }

    #[test]
    fn test_fan_out_feeds_every_mapped_outcome() {
        let inputs = ProgressInputs {
            outcomes: vec![
                outcome_model("q1", 0.0, 0.0, 10.0),
                outcome_model("q2", 0.0, 0.0, 20.0),
            ],
            outputs: vec![output_model("p1", 0.0, 4.0)],
            outcome_output_mappings: vec![outcome_link("p1", "q1", 5.0), outcome_link("p1", "q2", 5.0)],
            jobs: vec![job_model("j1", true, None)],
            job_output_mappings: vec![job_link("j1", "p1", 2.0)],
        };
        let chart = inputs.chart();
        assert_eq!(chart[0].expected_outcome, 25.0);
        assert_eq!(chart[1].expected_outcome, 12.5);
    }

    #[test]
    fn test_dangling_references_are_ignored() {
        let inputs = ProgressInputs {
            outcomes: vec![outcome_model("q1", 0.0, 0.0, 10.0)],
            outputs: vec![output_model("p1", 0.0, 10.0)],
            outcome_output_mappings: vec![
                outcome_link("missing_output", "q1", 10.0),
                outcome_link("p1", "missing_outcome", 10.0),
            ],
            jobs: vec![job_model("j1", true, None)],
            job_output_mappings: vec![
                job_link("missing_job", "p1", 10.0),
                job_link("j1", "missing_output", 10.0),
            ],
        };
        let chart = inputs.chart();
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].expected_outcome, 0.0);
    }

    #[test]
    fn test_toggling_job_moves_expected_progress_symmetrically() {
        let mut inputs = ProgressInputs {
            outcomes: vec![outcome_model("q1", 0.0, 0.0, 100.0)],
            outputs: vec![output_model("p1", 0.0, 10.0)],
            outcome_output_mappings: vec![outcome_link("p1", "q1", 50.0)],
            jobs: vec![job_model("j1", true, None), job_model("j2", false, None)],
            job_output_mappings: vec![job_link("j1", "p1", 2.0), job_link("j2", "p1", 3.0)],
        };
        let before = inputs.chart()[0].expected_outcome;

        inputs.jobs[1].is_done = true;
        let after = inputs.chart()[0].expected_outcome;
        assert!(after > before);

        inputs.jobs[1].is_done = false;
        let reverted = inputs.chart()[0].expected_outcome;
        assert_eq!(reverted, before);
        assert!((after - before - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_is_idempotent_and_bounded() {
        let inputs = ProgressInputs {
            outcomes: vec![
                outcome_model("q1", 0.0, 40.0, 100.0),
                outcome_model("q2", 100.0, -5.0, 0.0),
                outcome_model("q3", 3.0, 9.0, 3.0),
            ],
            outputs: vec![output_model("p1", 0.0, 1.0)],
            outcome_output_mappings: vec![
                outcome_link("p1", "q1", 1000.0),
                outcome_link("p1", "q2", 50.0),
                outcome_link("p1", "q3", 50.0),
            ],
            jobs: vec![job_model("j1", true, None)],
            job_output_mappings: vec![job_link("j1", "p1", 1.0)],
        };

        let first = inputs.chart();
        let second = inputs.chart();
        assert_eq!(first, second);
        for entry in &first {
            assert!((0.0..=100.0).contains(&entry.achieved_outcome));
            assert!((0.0..=100.0).contains(&entry.expected_outcome));
        }
    }

    #[test]
    fn test_time_filter_window() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
        let filter = TimeFilter {
            from: Some(d(10)),
            to: Some(d(20)),
        };
        assert!(filter.includes(Some(d(10))));
        assert!(filter.includes(Some(d(20))));
        assert!(!filter.includes(Some(d(21))));
        assert!(!filter.includes(None));
        assert!(TimeFilter::all().includes(None));

        let jobs = vec![
            job_model("early", true, Some(d(1))),
            job_model("inside", true, Some(d(15))),
            job_model("undated", true, None),
        ];
        let kept: Vec<String> = filter.apply(jobs).into_iter().map(|j| j.id).collect();
        assert_eq!(kept, vec!["inside"]);
    }

    #[test]
    fn test_time_filter_rejects_inverted_range() {
        let filter = TimeFilter {
            from: NaiveDate::from_ymd_opt(2026, 5, 2),
            to: NaiveDate::from_ymd_opt(2026, 5, 1),
        };
        assert!(matches!(filter.validate(), Err(Error::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_chart_for_dashboard_from_database() -> Result<()> {
        let db = setup_test_db().await?;
        let outcome = create_custom_outcome(&db, "Revenue", 0.0, 4.0, 10.0).await?;
        let output = create_custom_output(&db, "Deals closed", 0.0, 50.0).await?;
        let job = create_test_job(&db, "Call leads").await?;
        link_output_to_outcome(&db, &output.id, &outcome.id, 10.0).await?;
        link_job_to_output(&db, &job.id, &output.id, 25.0).await?;

        let chart = chart_for_dashboard(&db, TimeFilter::all()).await?;
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].name, "Revenue");
        assert_eq!(chart[0].achieved_outcome, 40.0);
        assert_eq!(chart[0].expected_outcome, 0.0);

        crate::core::job::set_job_done(&db, &crate::events::EventBus::new(8), &job.id, true)
            .await?;
        let chart = chart_for_dashboard(&db, TimeFilter::all()).await?;
        assert_eq!(chart[0].expected_outcome, 50.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_excludes_soft_deleted_jobs() -> Result<()> {
        let db = setup_test_db().await?;
        let kept = create_test_job(&db, "Keep").await?;
        let gone = create_test_job(&db, "Gone").await?;
        crate::core::job::soft_delete_job(&db, &gone.id).await?;

        let inputs = load_progress_inputs(&db, TimeFilter::all()).await?;
        let ids: Vec<&str> = inputs.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec![kept.id.as_str()]);
        Ok(())
    }
}
