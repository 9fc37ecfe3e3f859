use crate::api::{HotPostData, Listing, RedditClientConfig, RedditHotClient, DEFAULT_USER_AGENT};
use crate::pagination::{
    collect_hot_titles, fold_hot_pages, HotPageWalk, PageSource, FULL_PAGE_LIMIT, MAX_PAGES,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use subtally_core::{CoreError, HotPage, HotPost, RedditApiError};

fn page(prefix: &str, posts: usize, after: Option<&str>) -> HotPage {
    HotPage {
        posts: (0..posts)
            .map(|i| HotPost {
                title: format!("{}-{}", prefix, i),
            })
            .collect(),
        after: after.map(String::from),
    }
}

/// Serves a fixed script of pages, recording each cursor it was asked for.
/// Optionally fails on the fetch at `fail_at` (zero-based).
struct ScriptedSource {
    pages: Vec<HotPage>,
    fail_at: Option<usize>,
    calls: AtomicUsize,
    cursors_seen: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn new(pages: Vec<HotPage>) -> Self {
        Self {
            pages,
            fail_at: None,
            calls: AtomicUsize::new(0),
            cursors_seen: Mutex::new(Vec::new()),
        }
    }

    fn failing_at(pages: Vec<HotPage>, fail_at: usize) -> Self {
        Self {
            fail_at: Some(fail_at),
            ..Self::new(pages)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn hot_page(
        &self,
        subreddit: &str,
        _limit: u32,
        after: Option<&str>,
    ) -> Result<HotPage, CoreError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.cursors_seen
            .lock()
            .unwrap()
            .push(after.map(String::from));
        if self.fail_at == Some(index) {
            return Err(CoreError::RedditApi(RedditApiError::ListingUnavailable {
                subreddit: subreddit.to_string(),
                status_code: 404,
            }));
        }
        Ok(self.pages[index].clone())
    }
}

/// Always returns another page with a cursor; the listing never ends.
struct EndlessSource;

#[async_trait]
impl PageSource for EndlessSource {
    async fn hot_page(
        &self,
        _subreddit: &str,
        _limit: u32,
        _after: Option<&str>,
    ) -> Result<HotPage, CoreError> {
        Ok(page("endless", 100, Some("t3_more")))
    }
}

#[tokio::test]
async fn test_short_listing_terminates_after_one_fetch() {
    let source = ScriptedSource::new(vec![page("only", 3, None)]);

    let titles = collect_hot_titles(&source, "rust").await.unwrap();
    assert_eq!(titles, vec!["only-0", "only-1", "only-2"]);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_three_page_listing_preserves_cross_page_order() {
    let source = ScriptedSource::new(vec![
        page("p0", 100, Some("t3_aaa")),
        page("p1", 100, Some("t3_bbb")),
        page("p2", 37, None),
    ]);

    let titles = collect_hot_titles(&source, "programming").await.unwrap();
    assert_eq!(titles.len(), 237);
    assert_eq!(titles[0], "p0-0");
    assert_eq!(titles[99], "p0-99");
    assert_eq!(titles[100], "p1-0");
    assert_eq!(titles[200], "p2-0");
    assert_eq!(titles[236], "p2-36");
    assert_eq!(source.calls(), 3);

    // Cursors must be passed back exactly as received.
    let cursors = source.cursors_seen.lock().unwrap().clone();
    assert_eq!(
        cursors,
        vec![
            None,
            Some("t3_aaa".to_string()),
            Some("t3_bbb".to_string())
        ]
    );
}

#[tokio::test]
async fn test_first_fetch_failure_propagates() {
    let source = ScriptedSource::failing_at(vec![page("p0", 10, None)], 0);

    let result = collect_hot_titles(&source, "doesnotexist").await;
    assert!(matches!(
        result,
        Err(CoreError::RedditApi(RedditApiError::ListingUnavailable {
            status_code: 404,
            ..
        }))
    ));
}

#[tokio::test]
async fn test_mid_walk_failure_propagates_without_partial_result() {
    let source = ScriptedSource::failing_at(
        vec![
            page("p0", 100, Some("t3_aaa")),
            page("p1", 100, Some("t3_bbb")),
        ],
        1,
    );

    let result = collect_hot_titles(&source, "programming").await;
    assert!(result.is_err());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_walk_stays_exhausted_after_last_page() {
    let source = ScriptedSource::new(vec![page("only", 5, None)]);
    let mut walk = HotPageWalk::new(&source, "rust", FULL_PAGE_LIMIT);

    assert!(walk.next_page().await.unwrap().is_some());
    assert!(walk.next_page().await.unwrap().is_none());
    assert!(walk.next_page().await.unwrap().is_none());
    // Exhaustion is remembered; no further fetches are issued.
    assert_eq!(source.calls(), 1);
    assert_eq!(walk.pages_seen(), 1);
}

#[tokio::test]
async fn test_endless_listing_stops_at_max_pages() {
    let source = EndlessSource;

    let result = collect_hot_titles(&source, "askreddit").await;
    match result {
        Err(CoreError::RedditApi(RedditApiError::PaginationOverrun {
            subreddit,
            max_pages,
        })) => {
            assert_eq!(subreddit, "askreddit");
            assert_eq!(max_pages, MAX_PAGES);
        }
        other => panic!("Expected PaginationOverrun, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn test_fold_threads_accumulator_through_pages() {
    let source = ScriptedSource::new(vec![
        page("p0", 4, Some("t3_aaa")),
        page("p1", 6, None),
    ]);

    let total = fold_hot_pages(&source, "rust", FULL_PAGE_LIMIT, 0usize, |count, page| {
        *count += page.posts.len();
    })
    .await
    .unwrap();
    assert_eq!(total, 10);
}

#[tokio::test]
async fn test_repeated_runs_over_same_fixtures_are_identical() {
    let script = || {
        ScriptedSource::new(vec![
            page("p0", 100, Some("t3_aaa")),
            page("p1", 42, None),
        ])
    };

    let first = collect_hot_titles(&script(), "rust").await.unwrap();
    let second = collect_hot_titles(&script(), "rust").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_subreddit_rejected_before_any_request() {
    let client = RedditHotClient::new(RedditClientConfig::default()).unwrap();

    let result = client.fetch_hot_page("", FULL_PAGE_LIMIT, None).await;
    assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
}

#[test]
fn test_client_config_defaults() {
    let config = RedditClientConfig::default();
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.request_timeout.as_secs(), 10);

    let client = RedditHotClient::new(config).unwrap();
    assert!(client.user_agent().contains("subtally"));
}

#[test]
fn test_listing_decodes_with_extra_fields_ignored() {
    let fixture = json!({
        "kind": "Listing",
        "data": {
            "modhash": "",
            "dist": 2,
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "title": "First post",
                        "author": "someone",
                        "score": 1234,
                        "over_18": false
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "title": "Second post",
                        "author": "someone_else",
                        "score": 99
                    }
                }
            ],
            "after": "t3_abc123",
            "before": null
        }
    });

    let listing: Listing<HotPostData> = serde_json::from_value(fixture).unwrap();
    let page = HotPage::from(listing);
    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.posts[0].title, "First post");
    assert_eq!(page.after.as_deref(), Some("t3_abc123"));
}

#[test]
fn test_listing_null_after_signals_end() {
    let fixture = json!({
        "kind": "Listing",
        "data": {
            "children": [],
            "after": null,
            "before": null,
            "dist": 0
        }
    });

    let listing: Listing<HotPostData> = serde_json::from_value(fixture).unwrap();
    let page = HotPage::from(listing);
    assert!(page.posts.is_empty());
    assert!(page.after.is_none());
}
