//! Types for PoetryDB records and request failures.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Title given to the synthetic entries produced from an author listing.
pub const AUTHOR_LISTING_TITLE: &str = "(author listing)";

/// A poem as returned by PoetryDB.
///
/// Poems carry no stable identity; within a result batch they are addressed
/// by position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Poem lines in order. Empty for author-listing entries.
    #[serde(default, deserialize_with = "lenient_lines")]
    pub lines: Vec<String>,
    /// Line count as reported by the service (a string on most endpoints).
    /// Values that are neither a string nor a whole number are dropped.
    #[serde(
        default,
        deserialize_with = "lenient_linecount",
        skip_serializing_if = "Option::is_none"
    )]
    pub linecount: Option<LineCount>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Lines as a list of strings; null means no lines and non-string entries
/// are skipped.
fn lenient_lines<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|line| match line {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn lenient_linecount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<LineCount>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(LineCount::Text(s)),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .map(LineCount::Number),
        _ => None,
    })
}

impl Poem {
    /// Create a poem from a title, an author and its lines.
    pub fn new(title: impl Into<String>, author: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            lines,
            linecount: None,
        }
    }

    /// Synthetic entry standing in for an author in an author listing.
    pub fn author_listing(author: impl Into<String>) -> Self {
        Self::new(AUTHOR_LISTING_TITLE, author, Vec::new())
    }

    /// Full text of the poem, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Text suitable for putting on a clipboard: a title/author header,
    /// a blank line, then the poem text.
    pub fn copy_text(&self) -> String {
        format!("{} — {}\n\n{}", self.title, self.author, self.text())
    }
}

/// Line count field, which PoetryDB reports either as a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LineCount {
    Number(u64),
    Text(String),
}

impl LineCount {
    /// Numeric value, if the field can be read as one.
    pub fn value(&self) -> Option<u64> {
        match self {
            LineCount::Number(n) => Some(*n),
            LineCount::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Normalized failure record for a PoetryDB request.
///
/// Any transport failure (unreachable host, timeout, non-2xx status,
/// malformed body) is reduced to this shape before it reaches the session.
/// `status` is 0 when no HTTP status was received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("request to {url} failed with status {status}: {message}")]
pub struct PoetryDbError {
    pub status: u16,
    pub url: String,
    pub message: String,
}

impl PoetryDbError {
    pub fn new(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            url: url.into(),
            message: if message.is_empty() {
                "Request failed".to_string()
            } else {
                message
            },
        }
    }

    /// Build from a reqwest error, keeping the status when one was received.
    pub fn from_transport(err: &reqwest::Error, url: &str) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| url.to_string());
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else if err.is_connect() {
            format!("Connection failed: {}", err)
        } else {
            err.to_string()
        };
        Self::new(status, url, message)
    }

    /// True when the failure happened before any HTTP status was received.
    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}
