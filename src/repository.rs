use chrono::{DateTime, Utc};

use crate::{error::CrawlerError, gh_api_search_repo_response::Repo};

/// One repository as returned by the search, with counts already flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepositoryRecord {
    pub(crate) full_name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) primary_language: Option<String>,
    pub(crate) release_count: u64,
    pub(crate) merged_pr_count: u64,
    pub(crate) total_issue_count: u64,
    pub(crate) closed_issue_count: u64,
}

impl TryFrom<Repo> for RepositoryRecord {
    type Error = CrawlerError;

    fn try_from(repo: Repo) -> Result<Self, Self::Error> {
        let total_issue_count = repo.total_issues.total_count;
        let closed_issue_count = repo.closed_issues.total_count;
        if closed_issue_count > total_issue_count {
            return Err(CrawlerError::MalformedResponse(format!(
                "{} reports {} closed issues out of {}",
                repo.full_name, closed_issue_count, total_issue_count
            )));
        }
        Ok(RepositoryRecord {
            full_name: repo.full_name,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            primary_language: repo.primary_language.map(|language| language.name),
            release_count: repo.releases.total_count,
            merged_pr_count: repo.merged_pull_requests.total_count,
            total_issue_count,
            closed_issue_count,
        })
    }
}
