use chrono::{DateTime, Utc};

/// Variables bound to the `$searchQuery`, `$first` and `$cursor` parameters of the search query.
#[derive(serde::Serialize, Debug)]
pub(crate) struct SearchVariables<'a> {
    #[serde(rename = "searchQuery")]
    pub(crate) search_query: &'a str,
    pub(crate) first: usize,
    pub(crate) cursor: Option<&'a str>,
}

#[derive(serde::Serialize, Debug)]
pub(crate) struct GraphqlRequest<'a> {
    pub(crate) query: &'a str,
    pub(crate) variables: SearchVariables<'a>,
}

/// Top level graphql envelope, decoded once the `errors` member has been ruled out.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct GetRepoResponse {
    pub(crate) data: Option<ResponseData>,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct ResponseData {
    pub(crate) search: SearchResponse,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct SearchResponse {
    #[serde(rename = "nodes")]
    pub(crate) repositories: Vec<Option<Repo>>,
    #[serde(rename = "pageInfo")]
    pub(crate) page_info: GithubPageInfo,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct GithubPageInfo {
    #[serde(rename = "endCursor")]
    pub(crate) end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub(crate) has_next_page: bool,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct Repo {
    #[serde(rename = "nameWithOwner")]
    pub(crate) full_name: String,
    // offsets other than Z are converted to UTC while parsing
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
    #[serde(rename = "primaryLanguage")]
    pub(crate) primary_language: Option<Language>,
    pub(crate) releases: TotalCount,
    #[serde(rename = "pullRequests")]
    pub(crate) merged_pull_requests: TotalCount,
    #[serde(rename = "totalIssues")]
    pub(crate) total_issues: TotalCount,
    #[serde(rename = "closedIssues")]
    pub(crate) closed_issues: TotalCount,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct Language {
    pub(crate) name: String,
}

#[derive(serde::Deserialize, Debug)]
pub(crate) struct TotalCount {
    #[serde(rename = "totalCount")]
    pub(crate) total_count: u64,
}
