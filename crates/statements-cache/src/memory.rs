//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use statements_core::{Cik, CompanyFacts, FactsCache, Result};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: chrono::DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Key for company-facts entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FactsKey {
    source: String,
    cik: Cik,
    taxonomy: String,
}

/// Simple in-memory cache for testing and development.
///
/// Entries live in a `RwLock`-protected `HashMap` and are lost when the cache is
/// dropped. Facts are cloned on get and put.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    facts: RwLock<HashMap<FactsKey, CacheEntry<CompanyFacts>>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FactsCache for InMemoryCache {
    #[instrument(skip(self, cik), fields(source = %source, cik = %cik))]
    async fn get_facts(
        &self,
        source: &str,
        cik: &Cik,
        taxonomy: &str,
    ) -> Result<Option<CompanyFacts>> {
        let key = FactsKey {
            source: source.to_string(),
            cik: cik.clone(),
            taxonomy: taxonomy.to_string(),
        };

        let cache = self.facts.read().await;
        match cache.get(&key) {
            Some(entry) => {
                debug!("Cache hit for company facts");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for company facts");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, cik, facts), fields(source = %source, cik = %cik, concepts = facts.len()))]
    async fn put_facts(&self, source: &str, cik: &Cik, facts: &CompanyFacts) -> Result<()> {
        let key = FactsKey {
            source: source.to_string(),
            cik: cik.clone(),
            taxonomy: facts.taxonomy.clone(),
        };

        let mut cache = self.facts.write().await;
        cache.insert(key, CacheEntry::new(facts.clone()));
        debug!("Cached company facts");
        Ok(())
    }

    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.facts.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();
        debug!("Invalidated {removed} stale cache entries");
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        self.facts.write().await.clear();
        debug!("Cleared in-memory cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::{RawFact, Unit};

    fn sample() -> CompanyFacts {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("Assets", &Unit::usd(), vec![RawFact::new(1.0e9, "10-K")]);
        facts
    }

    #[tokio::test]
    async fn test_facts_round_trip() {
        let cache = InMemoryCache::new();
        let cik = Cik::from_number(320_193);

        assert!(cache.get_facts("test", &cik, "us-gaap").await.unwrap().is_none());

        cache.put_facts("test", &cik, &sample()).await.unwrap();
        let cached = cache.get_facts("test", &cik, "us-gaap").await.unwrap();
        assert_eq!(cached, Some(sample()));

        // keyed by source and taxonomy as well
        assert!(cache.get_facts("other", &cik, "us-gaap").await.unwrap().is_none());
        assert!(cache.get_facts("test", &cik, "ifrs-full").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = InMemoryCache::new();
        let cik = Cik::from_number(1);
        cache.put_facts("test", &cik, &sample()).await.unwrap();

        assert_eq!(cache.invalidate_stale(Duration::from_secs(3600)).await.unwrap(), 0);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.invalidate_stale(Duration::ZERO).await.unwrap(), 1);

        cache.put_facts("test", &cik, &sample()).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.get_facts("test", &cik, "us-gaap").await.unwrap().is_none());
    }
}
