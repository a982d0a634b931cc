use tokio::time::sleep;

use super::SearchPageFetcher;
use crate::{config::PaginationSettings, error::CrawlerError, repository::RepositoryRecord};

/// Follows the search cursor until `target_count` records are collected or the
/// source is exhausted, sleeping for the courtesy delay between requests.
///
/// Records keep their arrival order and the result never exceeds `target_count`.
/// Any failed page aborts the whole fetch: nothing collected so far is returned.
pub(crate) async fn fetch_repositories<F>(
    fetcher: &F,
    settings: &PaginationSettings,
    target_count: usize,
) -> Result<Vec<Option<RepositoryRecord>>, CrawlerError>
where
    F: SearchPageFetcher + ?Sized,
{
    let mut repositories: Vec<Option<RepositoryRecord>> = Vec::with_capacity(target_count);
    let mut cursor: Option<String> = None;

    while repositories.len() < target_count {
        let page = fetcher
            .fetch_page(settings.page_size, cursor.as_deref())
            .await?;
        let page_len = page.records.len();
        repositories.extend(page.records);

        info!("Collected {} repositories...", repositories.len());

        match page.next_cursor {
            Some(_) if page_len == 0 => {
                // the endpoint claims more pages but stopped yielding nodes
                warn!(
                    "Empty page with 'hasNextPage' set, stopping at {} repositories",
                    repositories.len()
                );
                break;
            }
            Some(next_cursor) => cursor = Some(next_cursor),
            None => {
                if repositories.len() < target_count {
                    info!(
                        "Search exhausted after {} of {} repositories",
                        repositories.len(),
                        target_count
                    );
                }
                break;
            }
        }

        if repositories.len() < target_count {
            info!("Sleeping for {} ms", settings.courtesy_delay.as_millis());
            sleep(settings.courtesy_delay).await;
        }
    }

    repositories.truncate(target_count);
    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github_api_utils::SearchPage;
    use chrono::{TimeZone, Utc};
    use reqwest::StatusCode;
    use std::{collections::VecDeque, sync::Mutex, time::Duration};

    /// Replays scripted pages and records the cursors it was asked for.
    struct ScriptedFetcher {
        pages: Mutex<VecDeque<Result<SearchPage, CrawlerError>>>,
        requests: Mutex<Vec<(usize, Option<String>)>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<SearchPage, CrawlerError>>) -> Self {
            ScriptedFetcher {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(usize, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl SearchPageFetcher for ScriptedFetcher {
        async fn fetch_page(
            &self,
            first: usize,
            cursor: Option<&str>,
        ) -> Result<SearchPage, CrawlerError> {
            self.requests
                .lock()
                .unwrap()
                .push((first, cursor.map(str::to_owned)));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetcher asked for more pages than scripted")
        }
    }

    fn record(n: usize) -> RepositoryRecord {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        RepositoryRecord {
            full_name: format!("owner/repo-{n}"),
            created_at: date,
            updated_at: date,
            primary_language: None,
            release_count: 0,
            merged_pr_count: 0,
            total_issue_count: 0,
            closed_issue_count: 0,
        }
    }

    /// A full page of `size` records starting at `first`, linked to the next one if `more`.
    fn page(first: usize, size: usize, more: bool) -> Result<SearchPage, CrawlerError> {
        Ok(SearchPage {
            records: (first..first + size).map(|n| Some(record(n))).collect(),
            next_cursor: more.then(|| format!("cursor-{}", first + size)),
        })
    }

    fn names(records: &[Option<RepositoryRecord>]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.as_ref().map(|r| r.full_name.clone()).unwrap_or_default())
            .collect()
    }

    fn settings() -> PaginationSettings {
        PaginationSettings {
            page_size: 10,
            courtesy_delay: Duration::from_secs(1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_target_and_follows_cursor() {
        let fetcher = ScriptedFetcher::new(vec![
            page(0, 10, true),
            page(10, 10, true),
            page(20, 10, true),
        ]);

        let repositories = fetch_repositories(&fetcher, &settings(), 30).await.unwrap();

        assert_eq!(repositories.len(), 30);
        assert_eq!(
            fetcher.requests(),
            vec![
                (10, None),
                (10, Some("cursor-10".to_owned())),
                (10, Some("cursor-20".to_owned())),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn truncates_overshooting_last_page() {
        let fetcher = ScriptedFetcher::new(vec![
            page(0, 10, true),
            page(10, 10, true),
            page(20, 10, true),
        ]);

        let repositories = fetch_repositories(&fetcher, &settings(), 25).await.unwrap();

        assert_eq!(repositories.len(), 25);
        // ceil(25 / 10) requests, no more
        assert_eq!(fetcher.requests().len(), 3);
        let names = names(&repositories);
        assert_eq!(names.first().unwrap(), "owner/repo-0");
        assert_eq!(names.last().unwrap(), "owner/repo-24");
    }

    #[tokio::test(start_paused = true)]
    async fn tolerates_under_fill() {
        let fetcher = ScriptedFetcher::new(vec![page(0, 10, true), page(10, 4, false)]);

        let repositories = fetch_repositories(&fetcher, &settings(), 100).await.unwrap();

        assert_eq!(repositories.len(), 14);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_on_any_page_is_fatal() {
        let fetcher = ScriptedFetcher::new(vec![
            page(0, 10, true),
            Err(CrawlerError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: String::from("Bad Gateway"),
            }),
            page(20, 10, true),
        ]);

        let result = fetch_repositories(&fetcher, &settings(), 100).await;

        assert!(matches!(result, Err(CrawlerError::Status { .. })));
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_page_with_next_page_stops_the_loop() {
        let fetcher = ScriptedFetcher::new(vec![
            page(0, 10, true),
            Ok(SearchPage {
                records: Vec::new(),
                next_cursor: Some(String::from("stuck")),
            }),
        ]);

        let repositories = fetch_repositories(&fetcher, &settings(), 100).await.unwrap();

        assert_eq!(repositories.len(), 10);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn null_nodes_are_kept_in_place() {
        let fetcher = ScriptedFetcher::new(vec![Ok(SearchPage {
            records: vec![Some(record(0)), None, Some(record(2))],
            next_cursor: None,
        })]);

        let repositories = fetch_repositories(&fetcher, &settings(), 100).await.unwrap();

        assert_eq!(repositories.len(), 3);
        assert!(repositories[1].is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_between_pages_only() {
        let fetcher = ScriptedFetcher::new(vec![
            page(0, 10, true),
            page(10, 10, true),
            page(20, 10, true),
        ]);
        let started = tokio::time::Instant::now();

        fetch_repositories(&fetcher, &settings(), 30).await.unwrap();

        // two pauses between three pages, none after the target is met
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn zero_target_makes_no_request() {
        let fetcher = ScriptedFetcher::new(Vec::new());

        let repositories = fetch_repositories(&fetcher, &settings(), 0).await.unwrap();

        assert!(repositories.is_empty());
        assert!(fetcher.requests().is_empty());
    }
}
