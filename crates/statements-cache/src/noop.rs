//! No-op cache implementation.

use async_trait::async_trait;
use statements_core::{Cik, CompanyFacts, FactsCache, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get_facts` always returns `Ok(None)` and `put_facts` always returns `Ok(())`.
/// Every run then fetches from the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FactsCache for NoopCache {
    async fn get_facts(
        &self,
        _source: &str,
        _cik: &Cik,
        _taxonomy: &str,
    ) -> Result<Option<CompanyFacts>> {
        trace!("NoopCache: get_facts called, returning None");
        Ok(None)
    }

    async fn put_facts(&self, _source: &str, _cik: &Cik, _facts: &CompanyFacts) -> Result<()> {
        trace!("NoopCache: put_facts called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}
