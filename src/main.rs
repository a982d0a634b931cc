mod config;
mod error;
mod gh_api_search_repo_response;
mod github_api_utils;
mod metrics_utils;
mod repository;

use config::Config;
use error::CrawlerError;
use github_api_utils::{github_api_helper::GithubClient, pagination::fetch_repositories};
use metrics_utils::metrics_helper::write_report;

use chrono::Utc;
use dotenv::dotenv;
use std::{io::Write, process::ExitCode};

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

/// Fetches the most starred repositories and prints their metrics.
async fn run(config: &Config) -> Result<(), CrawlerError> {
    let client = GithubClient::new(config)?;

    info!("Fetching repositories in small batches to avoid overloading the API");
    let repositories =
        fetch_repositories(&client, &config.pagination, config.target_count).await?;

    let now = Utc::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\nComputing metrics...\n")?;
    let analyzed = write_report(&mut out, &repositories, now)?;
    writeln!(out, "Total repositories analyzed: {}", analyzed)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // load env variables
    dotenv().ok();
    pretty_env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error during execution: {err}");
            ExitCode::FAILURE
        }
    }
}
