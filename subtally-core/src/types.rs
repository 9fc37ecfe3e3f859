use serde::{Deserialize, Serialize};

/// A single post from a hot listing. Only the title survives decoding;
/// everything else Reddit sends about a post is dropped at the wire layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotPost {
    pub title: String,
}

/// One decoded page of a hot listing. `after` is the opaque cursor for the
/// next page; `None` means the listing is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotPage {
    pub posts: Vec<HotPost>,
    pub after: Option<String>,
}

impl HotPage {
    /// Titles of this page's posts, in listing order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|p| p.title.as_str())
    }
}
