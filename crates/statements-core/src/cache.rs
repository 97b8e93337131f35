//! Cache trait for storing fetched disclosures.
//!
//! This module defines the [`FactsCache`] trait that lets a run reuse a company-facts
//! document instead of fetching it again.

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    error::Result,
    types::{Cik, CompanyFacts},
};

/// Trait for caching fetched company facts.
///
/// Entries are keyed by source name, filer and taxonomy. Implementations can store data
/// in various backends (SQLite, in-memory, etc.).
#[async_trait]
pub trait FactsCache: Send + Sync {
    /// Retrieves cached facts.
    ///
    /// Returns `Ok(Some(facts))` if cached, `Ok(None)` if not cached.
    async fn get_facts(
        &self,
        source: &str,
        cik: &Cik,
        taxonomy: &str,
    ) -> Result<Option<CompanyFacts>>;

    /// Stores facts in the cache, replacing any previous entry.
    async fn put_facts(&self, source: &str, cik: &Cik, facts: &CompanyFacts) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
