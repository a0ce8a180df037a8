//! Report rendering for chat surfaces.
//!
//! Turns [`ChartEntry`] values into text: progress bars, per-outcome fields split
//! into pages, and an on-track indicator comparing achieved against expected.

use crate::core::progress::ChartEntry;

/// Points achieved may trail expected before an outcome counts as behind.
pub const BEHIND_THRESHOLD: f64 = 20.0;

/// How an outcome's measured progress compares with what completed jobs imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Achieved is at or above expected
    Ahead,
    /// Achieved trails expected by at most [`BEHIND_THRESHOLD`] points
    OnTrack,
    /// Achieved trails expected by more than [`BEHIND_THRESHOLD`] points
    Behind,
}

impl ProgressStatus {
    /// Emoji used in chat output.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Ahead => "🟢",
            Self::OnTrack => "🟡",
            Self::Behind => "🔴",
        }
    }
}

/// Classifies a chart entry.
#[must_use]
pub fn progress_status(entry: &ChartEntry) -> ProgressStatus {
    let gap = entry.expected_outcome - entry.achieved_outcome;
    if gap <= 0.0 {
        ProgressStatus::Ahead
    } else if gap <= BEHIND_THRESHOLD {
        ProgressStatus::OnTrack
    } else {
        ProgressStatus::Behind
    }
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`. The bar is
/// clamped to `[0, 100]`; the printed number is not.
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // clamped_progress ∈ [0, 100] and length is small, so the cast stays in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Heading and two-bar body shown for one outcome.
#[must_use]
pub fn format_entry_field(entry: &ChartEntry) -> (String, String) {
    let heading = format!("{} {}", progress_status(entry).emoji(), entry.name);
    let body = format!(
        "**Achieved:** {}\n**Expected:** {}",
        format_progress_bar(entry.achieved_outcome, Some(10)),
        format_progress_bar(entry.expected_outcome, Some(10))
    );
    (heading, body)
}

/// Splits a chart into pages of at most `per_page` outcome fields, in chart order.
///
/// A `per_page` of 0 is treated as 1.
#[must_use]
pub fn report_pages(entries: &[ChartEntry], per_page: usize) -> Vec<Vec<(String, String)>> {
    entries
        .chunks(per_page.max(1))
        .map(|page| page.iter().map(format_entry_field).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, achieved: f64, expected: f64) -> ChartEntry {
        ChartEntry {
            outcome_id: name.to_lowercase(),
            name: name.to_string(),
            achieved_outcome: achieved,
            expected_outcome: expected,
        }
    }

    #[test]
    fn test_format_progress_bar_full() {
        assert_eq!(format_progress_bar(100.0, Some(10)), "[██████████] 100.0%");
    }

    #[test]
    fn test_format_progress_bar_half() {
        assert_eq!(format_progress_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
    }

    #[test]
    fn test_format_progress_bar_zero_and_default_length() {
        assert_eq!(format_progress_bar(0.0, None), "[░░░░░░░░░░] 0.0%");
    }

    #[test]
    fn test_progress_status_thresholds() {
        assert_eq!(progress_status(&entry("A", 60.0, 50.0)), ProgressStatus::Ahead);
        assert_eq!(progress_status(&entry("B", 50.0, 50.0)), ProgressStatus::Ahead);
        assert_eq!(progress_status(&entry("C", 40.0, 60.0)), ProgressStatus::OnTrack);
        assert_eq!(progress_status(&entry("D", 10.0, 60.0)), ProgressStatus::Behind);
    }

    #[test]
    fn test_format_entry_field() {
        let (heading, body) = format_entry_field(&entry("Revenue", 40.0, 50.0));
        assert_eq!(heading, "🟡 Revenue");
        assert_eq!(
            body,
            "**Achieved:** [████░░░░░░] 40.0%\n**Expected:** [█████░░░░░] 50.0%"
        );
    }

    #[test]
    fn test_report_pages_split_in_order() {
        let entries: Vec<ChartEntry> = (0..26)
            .map(|i| entry(&format!("Outcome {i:02}"), 0.0, 0.0))
            .collect();

        let pages = report_pages(&entries, 25);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 25);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[0][0].0, "🟢 Outcome 00");
        assert_eq!(pages[1][0].0, "🟢 Outcome 25");
    }

    #[test]
    fn test_report_pages_edge_sizes() {
        assert!(report_pages(&[], 25).is_empty());
        let one = [entry("Solo", 10.0, 10.0)];
        assert_eq!(report_pages(&one, 0).len(), 1);
    }
}
