use std::fmt;

pub mod metrics_helper;

/// Label printed when a repository has no primary language.
pub(crate) const NO_LANGUAGE: &str = "None";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RepositoryMetrics {
    full_name: String,
    age_days: i64,
    merged_pr_count: u64,
    release_count: u64,
    days_since_update: i64,
    primary_language: String,
    closed_issue_ratio: f64,
    closed_issue_count: u64,
    total_issue_count: u64,
}

impl fmt::Display for RepositoryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository: {}", self.full_name)?;
        writeln!(f, "RQ 01 (Age): {} days", self.age_days)?;
        writeln!(f, "RQ 02 (Merged PRs): {}", self.merged_pr_count)?;
        writeln!(f, "RQ 03 (Releases): {}", self.release_count)?;
        writeln!(f, "RQ 04 (Days since update): {} days", self.days_since_update)?;
        writeln!(f, "RQ 05 (Primary language): {}", self.primary_language)?;
        write!(
            f,
            "RQ 06 (Closed issues ratio): {:.2}% ({} of {})",
            self.closed_issue_ratio, self.closed_issue_count, self.total_issue_count
        )
    }
}
