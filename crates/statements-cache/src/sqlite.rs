//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use statements_core::{Cik, CompanyFacts, FactsCache, Result, StatementsError};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};

/// Timestamps are stored with a fixed width so they order as text.
fn timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn cache_err(e: impl std::fmt::Display) -> StatementsError {
    StatementsError::Cache(e.to_string())
}

/// SQLite-based cache for company facts.
///
/// Each document is stored as one JSON blob, so a cached run skips both the download
/// and the parse of the source document.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(cache_err)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(cache_err)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS facts_cache (
                source TEXT NOT NULL,
                cik TEXT NOT NULL,
                taxonomy TEXT NOT NULL,
                entity_name TEXT NOT NULL,
                data_json TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (source, cik, taxonomy)
            )",
            [],
        )
        .map_err(cache_err)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_facts_cached_at ON facts_cache(cached_at)",
            [],
        )
        .map_err(cache_err)?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }
}

#[async_trait]
impl FactsCache for SqliteCache {
    #[instrument(skip(self, cik), fields(source = %source, cik = %cik))]
    async fn get_facts(
        &self,
        source: &str,
        cik: &Cik,
        taxonomy: &str,
    ) -> Result<Option<CompanyFacts>> {
        let conn = self.conn.lock().map_err(cache_err)?;

        let json: Option<String> = conn
            .query_row(
                "SELECT data_json FROM facts_cache
                 WHERE source = ?1 AND cik = ?2 AND taxonomy = ?3",
                params![source, cik.as_str(), taxonomy],
                |row| row.get(0),
            )
            .optional()
            .map_err(cache_err)?;

        match json {
            Some(json) => {
                let facts: CompanyFacts = serde_json::from_str(&json)
                    .map_err(|e| StatementsError::Cache(format!("Corrupt cache entry: {e}")))?;
                debug!(concepts = facts.len(), "Cache hit for company facts");
                Ok(Some(facts))
            }
            None => {
                debug!("Cache miss for company facts");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, cik, facts), fields(source = %source, cik = %cik, concepts = facts.len()))]
    async fn put_facts(&self, source: &str, cik: &Cik, facts: &CompanyFacts) -> Result<()> {
        let json = serde_json::to_string(facts).map_err(cache_err)?;
        let conn = self.conn.lock().map_err(cache_err)?;

        conn.execute(
            "INSERT OR REPLACE INTO facts_cache
             (source, cik, taxonomy, entity_name, data_json, cached_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                source,
                cik.as_str(),
                facts.taxonomy,
                facts.entity_name,
                json,
                timestamp(Utc::now()),
            ],
        )
        .map_err(cache_err)?;

        debug!(bytes = json.len(), "Cached company facts");
        Ok(())
    }

    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl)
                .map_err(|e| StatementsError::Cache(format!("Invalid TTL duration: {e}")))?;

        let conn = self.conn.lock().map_err(cache_err)?;
        let deleted = conn
            .execute(
                "DELETE FROM facts_cache WHERE cached_at < ?1",
                params![timestamp(cutoff)],
            )
            .map_err(cache_err)?;

        debug!("Invalidated {deleted} stale cache entries");
        Ok(deleted)
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(cache_err)?;
        conn.execute("DELETE FROM facts_cache", []).map_err(cache_err)?;
        debug!("Cleared SQLite cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::{ConceptLookup, RawFact, Unit};

    fn sample() -> CompanyFacts {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.cik = Some(Cik::from_number(320_193));
        facts.entity_name = "Apple Inc.".to_string();
        facts.insert(
            "Assets",
            &Unit::usd(),
            vec![
                RawFact::new(352_755_000_000.0, "10-K")
                    .with_fiscal_year(2022)
                    .with_period(None, "2022-09-24")
                    .with_frame("CY2022Q3I"),
            ],
        );
        facts
    }

    #[tokio::test]
    async fn test_sqlite_cache_initialization() {
        let cache = SqliteCache::in_memory();
        assert!(cache.is_ok());
    }

    #[tokio::test]
    async fn test_facts_cache() {
        let cache = SqliteCache::in_memory().unwrap();
        let cik = Cik::from_number(320_193);

        // Initially no data
        let result = cache.get_facts("test", &cik, "us-gaap").await.unwrap();
        assert!(result.is_none());

        cache.put_facts("test", &cik, &sample()).await.unwrap();
        let cached = cache
            .get_facts("test", &cik, "us-gaap")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached, sample());
        let ConceptLookup::Found(assets) = cached.lookup("Assets", &Unit::usd()) else {
            panic!("assets missing from cached facts");
        };
        assert_eq!(assets[0].frame.as_deref(), Some("CY2022Q3I"));

        // replacing keeps a single entry
        cache.put_facts("test", &cik, &sample()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.invalidate_stale(Duration::ZERO).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_stale_keeps_fresh_entries() {
        let cache = SqliteCache::in_memory().unwrap();
        let cik = Cik::from_number(320_193);
        cache.put_facts("test", &cik, &sample()).await.unwrap();

        let removed = cache
            .invalidate_stale(Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(removed, 0);
        assert!(cache.get_facts("test", &cik, "us-gaap").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let cache = SqliteCache::in_memory().unwrap();
        let cik = Cik::from_number(320_193);
        cache.put_facts("test", &cik, &sample()).await.unwrap();

        cache.clear().await.unwrap();

        let result = cache.get_facts("test", &cik, "us-gaap").await.unwrap();
        assert!(result.is_none());
    }
}
