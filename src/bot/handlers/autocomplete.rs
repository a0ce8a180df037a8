//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, core::job, entities::JobModel, errors::Error};

/// Discord caps autocomplete suggestions at 25.
const MAX_SUGGESTIONS: usize = 25;

/// Titles of `jobs` containing `partial` (case-insensitive), sorted, at most 25.
#[must_use]
pub fn matching_job_titles(jobs: Vec<JobModel>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = jobs
        .into_iter()
        .filter(|j| j.title.to_lowercase().contains(&partial_lower))
        .map(|j| j.title)
        .collect();

    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for active job titles.
pub async fn autocomplete_job_title(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(jobs) = job::get_active_jobs(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_job_titles(jobs, partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixed_timestamp;

    fn job_titled(title: &str) -> JobModel {
        JobModel {
            id: title.to_string(),
            title: title.to_string(),
            is_done: false,
            due_date: None,
            impact: 0.0,
            is_deleted: false,
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        }
    }

    #[test]
    fn test_matching_is_case_insensitive_and_sorted() {
        let jobs = vec![
            job_titled("Send invoices"),
            job_titled("call suppliers"),
            job_titled("Call leads"),
        ];
        let titles = matching_job_titles(jobs, "CALL");
        assert_eq!(titles, vec!["Call leads", "call suppliers"]);
    }

    #[test]
    fn test_matching_caps_suggestions() {
        let jobs = (0..40).map(|i| job_titled(&format!("Job {i:02}"))).collect();
        assert_eq!(matching_job_titles(jobs, "job").len(), MAX_SUGGESTIONS);
    }
}
