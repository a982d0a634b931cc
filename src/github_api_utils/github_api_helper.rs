use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use super::{SearchPage, SearchPageFetcher};
use crate::{
    config::Config,
    error::CrawlerError,
    gh_api_search_repo_response::{GetRepoResponse, GraphqlRequest, SearchVariables},
    repository::RepositoryRecord,
};

const GITHUB_API_VERSION: &str = "2022-11-28";

const SEARCH_REPOSITORIES_QUERY: &str = "query($searchQuery: String!, $first: Int!, $cursor: String)
{
    search(query: $searchQuery, type: REPOSITORY, first: $first, after: $cursor)
    {
        pageInfo
        {
            endCursor
            hasNextPage
        }
        nodes
        {
            ... on Repository
            {
                nameWithOwner
                createdAt
                updatedAt
                primaryLanguage { name }
                releases { totalCount }
                pullRequests(states: MERGED) { totalCount }
                totalIssues: issues { totalCount }
                closedIssues: issues(states: CLOSED) { totalCount }
            }
        }
    }
}";

/// Creates and sets standard github api request headers:
/// 1. **authorization**, bearer token from the configuration.
/// 2. **X-GitHub-Api-Version**, github api version.
/// 3. **user-agent**, github refuses requests without one.
fn get_requests_headers(config: &Config) -> Result<HeaderMap, CrawlerError> {
    let mut headers = HeaderMap::new();
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
        .map_err(|_| CrawlerError::InvalidHeader {
            name: "authorization",
        })?;
    authorization.set_sensitive(true);
    headers.insert("authorization", authorization);
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    headers.insert(
        "user-agent",
        HeaderValue::from_str(&config.user_agent).map_err(|_| CrawlerError::InvalidHeader {
            name: "user-agent",
        })?,
    );
    Ok(headers)
}

/// Turns a graphql response body into a page of records.
/// An `errors` member anywhere at the top level fails the page, whatever `data` holds.
fn parse_search_page(body: &str) -> Result<SearchPage, CrawlerError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(errors) = value.get("errors").filter(|errors| !errors.is_null()) {
        return Err(CrawlerError::Api {
            detail: errors.to_string(),
        });
    }

    let get_repo_response: GetRepoResponse = serde_json::from_value(value)?;
    let search = get_repo_response
        .data
        .ok_or_else(|| CrawlerError::MalformedResponse("missing 'data'".to_owned()))?
        .search;

    let next_cursor = if search.page_info.has_next_page {
        match search.page_info.end_cursor {
            Some(cursor) => Some(cursor),
            None => {
                return Err(CrawlerError::MalformedResponse(
                    "'hasNextPage' is true but 'endCursor' is missing".to_owned(),
                ))
            }
        }
    } else {
        None
    };

    let records = search
        .repositories
        .into_iter()
        .map(|node| node.map(RepositoryRecord::try_from).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchPage {
        records,
        next_cursor,
    })
}

/// Github graphql client running the popular repositories search.
pub(crate) struct GithubClient {
    client: Client,
    api_url: String,
    search_query: String,
}

impl GithubClient {
    pub(crate) fn new(config: &Config) -> Result<GithubClient, CrawlerError> {
        let client = Client::builder()
            .default_headers(get_requests_headers(config)?)
            .build()?;
        Ok(GithubClient {
            client,
            api_url: config.api_url.clone(),
            search_query: config.search_query.clone(),
        })
    }
}

#[async_trait::async_trait]
impl SearchPageFetcher for GithubClient {
    async fn fetch_page(
        &self,
        first: usize,
        cursor: Option<&str>,
    ) -> Result<SearchPage, CrawlerError> {
        debug!("Requesting {} repositories after cursor {:?}", first, cursor);
        let response = self
            .client
            .post(&self.api_url)
            .json(&GraphqlRequest {
                query: SEARCH_REPOSITORIES_QUERY,
                variables: SearchVariables {
                    search_query: &self.search_query,
                    first,
                    cursor,
                },
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Request failed: {}", status);
            return Err(CrawlerError::Status { status, body });
        }
        info!("Request successful: {}", status);

        parse_search_page(&body)
    }
}
