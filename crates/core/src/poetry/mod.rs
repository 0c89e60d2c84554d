//! PoetryDB integration.
//!
//! This module provides request construction, response decoding and an
//! HTTP client for the public PoetryDB service, behind the `PoetrySource`
//! trait so the session can be driven by a mock in tests.

mod client;
mod decoder;
mod query;
mod types;

pub use client::{PoetryDbClient, PoetryDbConfig};
pub use decoder::{decode, decode_poems};
pub use query::{build_path, normalize, QueryBuilder, SearchCriteria, DEFAULT_BASE_URL};
pub use types::*;

use async_trait::async_trait;

/// A source of poems.
///
/// Implementations own transport concerns (timeouts, headers) and must
/// report every failure as a [`PoetryDbError`].
#[async_trait]
pub trait PoetrySource: Send + Sync {
    /// Search by author and/or title. With neither present the author
    /// listing is returned as synthetic entries.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Poem>, PoetryDbError>;

    /// Fetch `count` random poems with author, title and lines populated.
    async fn random(&self, count: u32) -> Result<Vec<Poem>, PoetryDbError>;
}
