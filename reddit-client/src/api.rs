use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use subtally_core::{CoreError, HotPage, HotPost, RedditApiError};
use tracing::{debug, error, info};

const REDDIT_API_BASE: &str = "https://www.reddit.com";

/// Identifies this client to Reddit; the public API throttles anonymous
/// default user agents aggressively.
pub const DEFAULT_USER_AGENT: &str = "subtally/0.1 (hot listing scanner)";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RedditClientConfig {
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl RedditClientConfig {
    pub fn new(user_agent: String, request_timeout: Duration) -> Self {
        Self {
            user_agent,
            request_timeout,
        }
    }
}

impl Default for RedditClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub kind: String,
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<ListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingChild<T> {
    pub kind: String,
    pub data: T,
}

/// Wire shape of a post as this client consumes it. Reddit sends dozens of
/// fields per post; only the title is read, the rest are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotPostData {
    pub title: String,
}

#[derive(Debug)]
pub struct RedditHotClient {
    http_client: Client,
    config: RedditClientConfig,
}

impl RedditHotClient {
    pub fn new(config: RedditClientConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Fetches one page of the hot listing for a subreddit.
    ///
    /// `after` is the opaque cursor returned by the previous page, absent on
    /// the first request. Exactly one round trip: any non-success status or
    /// undecodable body is returned as an error, never retried.
    pub async fn fetch_hot_page(
        &self,
        subreddit: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<HotPage, CoreError> {
        if subreddit.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "subreddit must not be empty".to_string(),
            });
        }

        let url = format!("{}/r/{}/hot.json", REDDIT_API_BASE, subreddit);
        let limit_str = limit.to_string();
        let mut params = Vec::with_capacity(2);
        params.push(("limit", limit_str.as_str()));
        if let Some(after_val) = after {
            params.push(("after", after_val));
        }

        info!(
            "Fetching hot listing page for r/{} (after: {:?})",
            subreddit, after
        );
        let response = match self.http_client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for r/{}: {}", subreddit, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            // Invalid, private and rate-limited subreddits all land here;
            // the status code is carried but not acted on.
            error!("Request failed with status {} for r/{}", status, subreddit);
            return Err(CoreError::RedditApi(RedditApiError::ListingUnavailable {
                subreddit: subreddit.to_string(),
                status_code: status.as_u16(),
            }));
        }

        let listing: Listing<HotPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse hot listing for r/{}: {}", subreddit, e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse hot listing for r/{}", subreddit),
            })
        })?;

        let page = HotPage::from(listing);
        debug!(
            "Retrieved {} posts from r/{} (next cursor: {:?})",
            page.posts.len(),
            subreddit,
            page.after
        );
        Ok(page)
    }
}

impl From<Listing<HotPostData>> for HotPage {
    fn from(listing: Listing<HotPostData>) -> Self {
        Self {
            posts: listing
                .data
                .children
                .into_iter()
                .map(|child| HotPost {
                    title: child.data.title,
                })
                .collect(),
            after: listing.data.after,
        }
    }
}
