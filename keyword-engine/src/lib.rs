use std::collections::HashMap;
use tracing::debug;

/// Keywords to search for, lowercased and deduplicated once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || keywords.contains(&word) {
                continue;
            }
            keywords.push(word);
        }
        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.as_str())
    }
}

/// One finalized tally row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u32,
}

/// Occurrence tally of a keyword set over post titles.
///
/// A keyword matches a title when it equals a whole whitespace-delimited
/// token of the lowercased title, so keywords at the start or end of a title
/// count, while occurrences embedded in longer tokens ("pythonic") or fused
/// to punctuation ("python!") do not. Each matching title increments a
/// keyword once, no matter how often the keyword repeats within it.
#[derive(Debug)]
pub struct KeywordTally {
    keywords: KeywordSet,
    counts: HashMap<String, u32>,
}

impl KeywordTally {
    pub fn new(keywords: KeywordSet) -> Self {
        Self {
            keywords,
            counts: HashMap::new(),
        }
    }

    pub fn observe_title(&mut self, title: &str) {
        if self.keywords.is_empty() {
            return;
        }
        let title = title.to_lowercase();
        for keyword in self.keywords.iter() {
            if title.split_whitespace().any(|token| token == keyword) {
                *self.counts.entry(keyword.to_string()).or_insert(0) += 1;
            }
        }
    }

    pub fn observe_titles<'a, I>(&mut self, titles: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for title in titles {
            self.observe_title(title);
        }
    }

    /// Rows sorted by descending count, ties broken by ascending keyword.
    /// Keywords that never matched are omitted.
    pub fn finalize(self) -> Vec<KeywordCount> {
        let mut rows: Vec<KeywordCount> = self
            .counts
            .into_iter()
            .map(|(keyword, count)| KeywordCount { keyword, count })
            .collect();
        rows.sort_unstable_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        debug!(
            "Finalized tally: {} of {} keywords matched",
            rows.len(),
            self.keywords.len()
        );
        rows
    }
}
