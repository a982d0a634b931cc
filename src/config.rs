use std::time::Duration;

use crate::error::CrawlerError;

const DEFAULT_API_URL: &str = "https://api.github.com/graphql";
const DEFAULT_USER_AGENT: &str = "popular-repo-metrics";
const DEFAULT_SEARCH_QUERY: &str = "stars:>10000 sort:stars-desc";

const TARGET_COUNT: usize = 100;
const PAGE_SIZE: usize = 10;
const COURTESY_DELAY: Duration = Duration::from_secs(1);

/// Run configuration, read once at startup and passed by reference afterwards.
#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) api_key: String,
    pub(crate) user_agent: String,
    pub(crate) api_url: String,
    pub(crate) search_query: String,
    pub(crate) target_count: usize,
    pub(crate) pagination: PaginationSettings,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaginationSettings {
    pub(crate) page_size: usize,
    /// Fixed pause between two page requests. This is the whole throttling policy.
    pub(crate) courtesy_delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        PaginationSettings {
            page_size: PAGE_SIZE,
            courtesy_delay: COURTESY_DELAY,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment (call `dotenv()` first).
    pub(crate) fn from_env() -> Result<Config, CrawlerError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup:
    /// 1. **GH_API_KEY**, falling back to **GITHUB_TOKEN**, the bearer token (required).
    /// 2. **GH_API_USER_AGENT**, the user-agent header.
    /// 3. **GH_API_URL**, the graphql endpoint.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Config, CrawlerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_blank("GH_API_KEY")
            .or_else(|| non_blank("GITHUB_TOKEN"))
            .ok_or(CrawlerError::MissingCredential)?;

        Ok(Config {
            api_key: api_key.trim().to_owned(),
            user_agent: non_blank("GH_API_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            api_url: non_blank("GH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            search_query: DEFAULT_SEARCH_QUERY.to_owned(),
            target_count: TARGET_COUNT,
            pagination: PaginationSettings::default(),
        })
    }
}
