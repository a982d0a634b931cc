use reqwest::StatusCode;
use thiserror::Error;

/// Every way a run can fail. All variants are fatal: the fetch is aborted and
/// no partial report is printed.
#[derive(Debug, Error)]
pub(crate) enum CrawlerError {
    #[error("Github API token not found, set 'GH_API_KEY' (or 'GITHUB_TOKEN') in the .env")]
    MissingCredential,

    #[error("invalid value for header '{name}'")]
    InvalidHeader { name: &'static str },

    #[error("request to the Github API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed: {status} - {body}")]
    Status { status: StatusCode, body: String },

    /// The response carried a GraphQL `errors` array; `detail` is its raw JSON.
    #[error("Github API returned errors: {detail}")]
    Api { detail: String },

    #[error("couldn't decode Github API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed Github API response: {0}")]
    MalformedResponse(String),

    #[error("couldn't write report: {0}")]
    Io(#[from] std::io::Error),
}
