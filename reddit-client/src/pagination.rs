use async_trait::async_trait;
use subtally_core::{CoreError, HotPage, RedditApiError};
use tracing::debug;

use crate::api::RedditHotClient;

/// Page size for the single-shot "top ten" query.
pub const TOP_PAGE_LIMIT: u32 = 10;

/// Page size for full-pagination queries.
pub const FULL_PAGE_LIMIT: u32 = 100;

/// Hard trip bound: termination otherwise depends entirely on the remote
/// eventually returning a page without a cursor.
pub const MAX_PAGES: u32 = 1000;

/// Source of hot-listing pages. The production implementation is
/// [`RedditHotClient`]; tests drive the walk from in-memory fixtures.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn hot_page(
        &self,
        subreddit: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<HotPage, CoreError>;
}

#[async_trait]
impl PageSource for RedditHotClient {
    async fn hot_page(
        &self,
        subreddit: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<HotPage, CoreError> {
        self.fetch_hot_page(subreddit, limit, after).await
    }
}

/// Iterative cursor walk over a subreddit's hot listing.
///
/// Owns the cursor and trip count for one session; each `next_page` call
/// issues exactly one fetch. The walk ends when a page carries no cursor
/// (`Ok(None)` from then on), or with an error on the first failed fetch.
pub struct HotPageWalk<'a, S: PageSource + ?Sized> {
    source: &'a S,
    subreddit: &'a str,
    limit: u32,
    cursor: Option<String>,
    pages_seen: u32,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> HotPageWalk<'a, S> {
    pub fn new(source: &'a S, subreddit: &'a str, limit: u32) -> Self {
        Self {
            source,
            subreddit,
            limit,
            cursor: None,
            pages_seen: 0,
            done: false,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<HotPage>, CoreError> {
        if self.done {
            return Ok(None);
        }
        if self.pages_seen >= MAX_PAGES {
            return Err(CoreError::RedditApi(RedditApiError::PaginationOverrun {
                subreddit: self.subreddit.to_string(),
                max_pages: MAX_PAGES,
            }));
        }

        let page = self
            .source
            .hot_page(self.subreddit, self.limit, self.cursor.as_deref())
            .await?;
        self.pages_seen += 1;
        self.cursor = page.after.clone();
        if self.cursor.is_none() {
            self.done = true;
        }
        debug!(
            "Walked page {} of r/{} ({} posts)",
            self.pages_seen,
            self.subreddit,
            page.posts.len()
        );
        Ok(Some(page))
    }

    pub fn pages_seen(&self) -> u32 {
        self.pages_seen
    }
}

/// Folds every hot page of a subreddit into a caller-owned accumulator.
///
/// The accumulator is threaded through the walk and returned; it is never
/// shared between sessions. Any fetch failure ends the session as an error
/// and the partially-filled accumulator is dropped.
pub async fn fold_hot_pages<S, A, F>(
    source: &S,
    subreddit: &str,
    limit: u32,
    mut acc: A,
    mut fold: F,
) -> Result<A, CoreError>
where
    S: PageSource + ?Sized,
    F: FnMut(&mut A, HotPage),
{
    let mut walk = HotPageWalk::new(source, subreddit, limit);
    while let Some(page) = walk.next_page().await? {
        fold(&mut acc, page);
    }
    Ok(acc)
}

/// Collects the titles of every hot post, first page first, post order
/// preserved within each page.
pub async fn collect_hot_titles<S>(source: &S, subreddit: &str) -> Result<Vec<String>, CoreError>
where
    S: PageSource + ?Sized,
{
    fold_hot_pages(
        source,
        subreddit,
        FULL_PAGE_LIMIT,
        Vec::new(),
        |titles: &mut Vec<String>, page| {
            titles.extend(page.posts.into_iter().map(|p| p.title));
        },
    )
    .await
}
