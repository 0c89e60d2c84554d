//! Request path construction for the PoetryDB API.
//!
//! Turns loosely structured search input into an escaped request path.
//! Fields are normalized first (whitespace collapsed, trimmed, lowercased
//! unless exact) and only then percent-encoded.

use serde::{Deserialize, Serialize};

/// Default PoetryDB origin.
pub const DEFAULT_BASE_URL: &str = "https://poetrydb.org";

/// Suffix that asks PoetryDB for a literal match on a field.
const EXACT_SUFFIX: &str = ":abs";

/// Fields requested from the random endpoint.
const RANDOM_FIELDS: &str = "author,title,lines";

/// Search input as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub exact: bool,
}

impl SearchCriteria {
    pub fn new(author: Option<&str>, title: Option<&str>, exact: bool) -> Self {
        Self {
            author: author.map(String::from),
            title: title.map(String::from),
            exact,
        }
    }

    /// Whether at least one of author or title has non-blank content.
    pub fn can_search(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.author) || filled(&self.title)
    }
}

/// Collapse whitespace runs to one space and trim; lowercase when asked.
/// Blank input yields `None`.
pub fn normalize(input: Option<&str>, lowercase: bool) -> Option<String> {
    let collapsed = input?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(if lowercase {
        collapsed.to_lowercase()
    } else {
        collapsed
    })
}

/// Encode a normalized field and append the exact-match suffix if needed.
fn encode_field(value: &str, exact: bool) -> String {
    let encoded = urlencoding::encode(value);
    if exact {
        format!("{}{}", encoded, EXACT_SUFFIX)
    } else {
        encoded.into_owned()
    }
}

/// Build the request path (without origin) for a search.
///
/// With neither field present this is the author listing, `/author`.
pub fn build_path(author: Option<&str>, title: Option<&str>, exact: bool) -> String {
    let author = normalize(author, !exact);
    let title = normalize(title, !exact);

    match (author, title) {
        (Some(a), Some(t)) => format!(
            "/author,title/{};{}",
            encode_field(&a, exact),
            encode_field(&t, exact)
        ),
        (Some(a), None) => format!("/author/{}", encode_field(&a, exact)),
        (None, Some(t)) => format!("/title/{}", encode_field(&t, exact)),
        (None, None) => "/author".to_string(),
    }
}

/// Builds full request URLs against a fixed PoetryDB origin.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
}

impl QueryBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an author/title search.
    pub fn build_url(&self, author: Option<&str>, title: Option<&str>, exact: bool) -> String {
        format!("{}{}", self.base_url, build_path(author, title, exact))
    }

    /// Full URL for the given criteria.
    pub fn search_url(&self, criteria: &SearchCriteria) -> String {
        self.build_url(
            criteria.author.as_deref(),
            criteria.title.as_deref(),
            criteria.exact,
        )
    }

    /// Full URL for a random sample of `count` poems.
    pub fn random_url(&self, count: u32) -> String {
        format!("{}/random/{}/{}", self.base_url, count, RANDOM_FIELDS)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
