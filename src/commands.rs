use keyword_engine::{KeywordSet, KeywordTally};
use reddit_client::{collect_hot_titles, fold_hot_pages, PageSource, FULL_PAGE_LIMIT, TOP_PAGE_LIMIT};
use subtally_core::ErrorExt;
use tracing::info;

/// Titles of the first page of hot posts, one per line, no pagination.
///
/// A failed fetch renders the literal `None` line instead of titles; the
/// error itself is logged to stderr.
pub async fn top<S: PageSource + ?Sized>(source: &S, community: &str) -> String {
    match source.hot_page(community, TOP_PAGE_LIMIT, None).await {
        Ok(page) => render_lines(page.titles()),
        Err(e) => {
            e.log_error();
            "None\n".to_string()
        }
    }
}

/// Every hot title across the full pagination, one per line.
///
/// Failure at any page renders the literal `None` line; partial listings
/// are never printed.
pub async fn titles<S: PageSource + ?Sized>(source: &S, community: &str) -> String {
    match collect_hot_titles(source, community).await {
        Ok(titles) => {
            info!("Collected {} hot titles from r/{}", titles.len(), community);
            render_lines(titles.iter().map(|t| t.as_str()))
        }
        Err(e) => {
            e.log_error();
            "None\n".to_string()
        }
    }
}

/// `<keyword>: <count>` lines over the full pagination, sorted by
/// descending count then ascending keyword.
///
/// Failure at any page renders nothing; the error is logged to stderr.
pub async fn count<S: PageSource + ?Sized>(source: &S, community: &str, keywords: &str) -> String {
    let keywords = KeywordSet::new(keywords.split_whitespace());
    let tally = KeywordTally::new(keywords);

    let result = fold_hot_pages(
        source,
        community,
        FULL_PAGE_LIMIT,
        tally,
        |tally: &mut KeywordTally, page| {
            tally.observe_titles(page.titles());
        },
    )
    .await;

    match result {
        Ok(tally) => tally
            .finalize()
            .into_iter()
            .map(|row| format!("{}: {}\n", row.keyword, row.count))
            .collect(),
        Err(e) => {
            e.log_error();
            String::new()
        }
    }
}

fn render_lines<'a, I>(lines: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
