use std::io::Write;

use chrono::{DateTime, Utc};

use super::{RepositoryMetrics, NO_LANGUAGE};
use crate::repository::RepositoryRecord;

const SECONDS_PER_DAY: i64 = 86_400;
const DIVIDER_WIDTH: usize = 50;

/// Whole days elapsed from `since` to `now`, floored.
fn days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Percentage of closed issues, 0 when the repository has none at all.
fn closed_issue_ratio(closed: u64, total: u64) -> f64 {
    if total == 0 {
        0.
    } else {
        closed as f64 / total as f64 * 100.
    }
}

/// Derives the six metrics of `record` against the `now` snapshot.
pub(crate) fn compute_metrics(record: &RepositoryRecord, now: DateTime<Utc>) -> RepositoryMetrics {
    RepositoryMetrics {
        full_name: record.full_name.clone(),
        age_days: days_between(record.created_at, now),
        merged_pr_count: record.merged_pr_count,
        release_count: record.release_count,
        days_since_update: days_between(record.updated_at, now),
        primary_language: record
            .primary_language
            .clone()
            .unwrap_or_else(|| NO_LANGUAGE.to_owned()),
        closed_issue_ratio: closed_issue_ratio(
            record.closed_issue_count,
            record.total_issue_count,
        ),
        closed_issue_count: record.closed_issue_count,
        total_issue_count: record.total_issue_count,
    }
}

/// Writes one block per present record, in order, each followed by a divider.
/// Null records are skipped. Returns how many blocks were written.
pub(crate) fn write_report<W: Write>(
    out: &mut W,
    repositories: &[Option<RepositoryRecord>],
    now: DateTime<Utc>,
) -> std::io::Result<usize> {
    let divider = "-".repeat(DIVIDER_WIDTH);
    let mut analyzed = 0;
    for record in repositories.iter().flatten() {
        writeln!(out, "{}", compute_metrics(record, now))?;
        writeln!(out, "{divider}")?;
        analyzed += 1;
    }
    let skipped = repositories.len() - analyzed;
    if skipped > 0 {
        debug!("Skipped {} null repositories", skipped);
    }
    Ok(analyzed)
}
