pub mod github_api_helper;
pub mod pagination;

use crate::{error::CrawlerError, repository::RepositoryRecord};

/// One page of search results. `None` entries are null nodes from the API.
#[derive(Debug, Default)]
pub(crate) struct SearchPage {
    pub(crate) records: Vec<Option<RepositoryRecord>>,
    /// Continuation token, present iff another page exists.
    pub(crate) next_cursor: Option<String>,
}

/// Source of search pages. A failed page is always fatal for the caller.
#[async_trait::async_trait]
pub(crate) trait SearchPageFetcher: Sync {
    async fn fetch_page(&self, first: usize, cursor: Option<&str>)
        -> Result<SearchPage, CrawlerError>;
}
