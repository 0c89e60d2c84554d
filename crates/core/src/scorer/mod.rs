//! Word scoring over poems.
//!
//! Counts literal, whole-word, case-insensitive occurrences of a word,
//! ranks poems by that count and renders escaped highlights.

mod highlight;
mod matcher;
mod ranking;
mod types;

pub use highlight::{escape_html, highlight_poem, highlight_text, MARK_CLOSE, MARK_OPEN};
pub use matcher::{count_word, WordMatcher};
pub use ranking::{best_match, rank, rank_with, top_k_by_word, TopK};
pub use types::ScoreEntry;
