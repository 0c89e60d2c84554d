//! Ranking result types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of ranking poems by occurrences of a word.
///
/// `poem_index` is `None` for the "no poem matched" result, which is
/// serialized as index `-1` with count 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(with = "sentinel_index")]
    pub poem_index: Option<usize>,
    pub count: usize,
    pub word: String,
}

impl ScoreEntry {
    pub fn new(poem_index: usize, count: usize, word: impl Into<String>) -> Self {
        Self {
            poem_index: Some(poem_index),
            count,
            word: word.into(),
        }
    }

    /// The canonical result when no poem contains the word.
    pub fn no_match(word: impl Into<String>) -> Self {
        Self {
            poem_index: None,
            count: 0,
            word: word.into(),
        }
    }

    pub fn is_no_match(&self) -> bool {
        self.poem_index.is_none()
    }
}

mod sentinel_index {
    use super::*;

    pub fn serialize<S: Serializer>(index: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match index {
            Some(i) => s.serialize_i64(*i as i64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(d)?;
        Ok(usize::try_from(raw).ok())
    }
}
