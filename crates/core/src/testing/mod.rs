//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`PoetrySource`](crate::poetry::PoetrySource)
//! and poem fixtures, allowing the session and the server to be tested
//! without reaching PoetryDB.
//!
//! # Example
//!
//! ```rust,ignore
//! use stanza_core::testing::{fixtures, MockPoetrySource};
//!
//! let source = Arc::new(MockPoetrySource::with_poems(fixtures::library()));
//! let orchestrator = SearchOrchestrator::new(source.clone(), SessionConfig::default());
//! ```

mod mock_poetry_source;

pub use mock_poetry_source::{MockPoetrySource, RecordedCall, ScriptedResponse};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::poetry::{Poem, PoetryDbError};

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    /// A small library of public-domain poems.
    pub fn library() -> Vec<Poem> {
        vec![
            Poem::new(
                "Fire and Ice",
                "Robert Frost",
                lines(&[
                    "Some say the world will end in fire,",
                    "Some say in ice.",
                    "From what I've tasted of desire",
                    "I hold with those who favor fire.",
                ]),
            ),
            Poem::new(
                "Dust of Snow",
                "Robert Frost",
                lines(&[
                    "The way a crow",
                    "Shook down on me",
                    "The dust of snow",
                    "From a hemlock tree",
                ]),
            ),
            Poem::new(
                "Hope is the thing with feathers",
                "Emily Dickinson",
                lines(&[
                    "Hope is the thing with feathers",
                    "That perches in the soul,",
                    "And sings the tune without the words,",
                    "And never stops at all,",
                ]),
            ),
            Poem::new(
                "Ozymandias",
                "Percy Bysshe Shelley",
                lines(&[
                    "I met a traveller from an antique land",
                    "Who said: Two vast and trunkless legs of stone",
                    "Stand in the desert. Near them, on the sand,",
                ]),
            ),
        ]
    }

    /// A poem whose text contains `word` exactly `times` times.
    pub fn poem_with_word(title: &str, word: &str, times: usize) -> Poem {
        let mut text = vec!["An opening line".to_string()];
        text.extend((0..times).map(|i| format!("line {} with {} in it", i, word)));
        Poem::new(title, "Anonymous", text)
    }

    /// An HTTP 500 failure for `path`.
    pub fn server_error(path: &str) -> PoetryDbError {
        PoetryDbError::new(
            500,
            format!("https://poetrydb.org{}", path),
            "Internal Server Error",
        )
    }

    /// A failure without an HTTP status, as for an unreachable host.
    pub fn network_error(path: &str) -> PoetryDbError {
        PoetryDbError::new(
            0,
            format!("https://poetrydb.org{}", path),
            "Connection failed",
        )
    }
}
