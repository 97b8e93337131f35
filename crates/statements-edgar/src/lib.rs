#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR source for company facts.
//!
//! # Example
//!
//! ```no_run
//! use statements_core::{DisclosureSource, FilerDirectory};
//! use statements_edgar::EdgarSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = EdgarSource::new("MyApp/1.0 (contact@example.com)")?;
//!
//!     let cik = source.lookup_cik("AAPL").await?;
//!     let facts = source.company_facts(&cik, "us-gaap").await?;
//!     println!("{} disclosed {} concepts", facts.entity_name, facts.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use statements_core::{
    Cik, CompanyFacts, ConceptFacts, DisclosureSource, FilerDirectory, RawFact, Result,
    StatementsError,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Spaces requests at least `min_interval` apart.
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// SEC EDGAR disclosure source.
///
/// Fetches company-facts documents and resolves tickers. The ticker directory is
/// downloaded once per source and kept for its lifetime.
#[derive(Debug)]
pub struct EdgarSource {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    tickers: OnceCell<HashMap<String, Cik>>,
}

impl EdgarSource {
    /// Creates a source with the identifying user agent the SEC requires,
    /// e.g. `"AppName/Version (contact@email.com)"`.
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] if the user agent is empty, or
    /// [`StatementsError::Network`] if the HTTP client cannot be built.
    pub fn new(user_agent: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(StatementsError::InvalidParameter(
                "SEC EDGAR requires an identifying user agent".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StatementsError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client))
    }

    /// Creates a source with a pre-configured client. The client must already send an
    /// identifying user agent.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            tickers: OnceCell::new(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "Requesting");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StatementsError::Network(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            warn!(url, ?retry_after, "Rate limited by SEC EDGAR");
            return Err(StatementsError::RateLimited {
                source_name: "SEC EDGAR".to_string(),
                retry_after,
            });
        }
        Ok(response)
    }

    async fn ticker_directory(&self) -> Result<&HashMap<String, Cik>> {
        self.tickers
            .get_or_try_init(|| async {
                let response = self.get(COMPANY_TICKERS_URL).await?;
                if !response.status().is_success() {
                    return Err(StatementsError::Network(format!(
                        "Failed to fetch company tickers: HTTP {}",
                        response.status()
                    )));
                }
                let body = response
                    .text()
                    .await
                    .map_err(|e| StatementsError::Network(e.to_string()))?;
                let directory = parse_ticker_directory(&body)?;
                debug!(tickers = directory.len(), "Loaded ticker directory");
                Ok(directory)
            })
            .await
    }
}

#[async_trait]
impl DisclosureSource for EdgarSource {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    #[instrument(skip(self, cik), fields(cik = %cik))]
    async fn company_facts(&self, cik: &Cik, taxonomy: &str) -> Result<CompanyFacts> {
        let url = format!("{EDGAR_BASE_URL}/api/xbrl/companyfacts/CIK{cik}.json");
        let response = self.get(&url).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StatementsError::DataNotAvailable {
                cik: cik.to_string(),
                taxonomy: taxonomy.to_string(),
            });
        }
        if !status.is_success() {
            return Err(StatementsError::Network(format!(
                "Failed to fetch company facts for CIK {cik}: HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StatementsError::Network(e.to_string()))?;
        let facts = parse_company_facts(&body, taxonomy)?;
        debug!(
            entity = %facts.entity_name,
            concepts = facts.len(),
            "Fetched company facts"
        );
        Ok(facts)
    }
}

#[async_trait]
impl FilerDirectory for EdgarSource {
    #[instrument(skip(self))]
    async fn lookup_cik(&self, ticker: &str) -> Result<Cik> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(StatementsError::InvalidParameter("Empty ticker".to_string()));
        }
        let cik = self
            .ticker_directory()
            .await?
            .get(&ticker)
            .cloned()
            .ok_or_else(|| StatementsError::FilerNotFound(ticker.clone()))?;
        debug!(%cik, %ticker, "Resolved ticker");
        Ok(cik)
    }
}

/// Parses a company-facts document and keeps the facts of one taxonomy.
///
/// # Errors
/// Returns [`StatementsError::Parse`] if the document does not have the company-facts
/// shape, or [`StatementsError::DataNotAvailable`] if it has no facts for `taxonomy`.
pub fn parse_company_facts(body: &str, taxonomy: &str) -> Result<CompanyFacts> {
    let response: CompanyFactsResponse = serde_json::from_str(body)
        .map_err(|e| StatementsError::Parse(format!("Failed to parse company facts: {e}")))?;
    let cik = response.cik.map(Cik::from_number);

    let mut facts = response.facts;
    let Some(tags) = facts.remove(taxonomy) else {
        let available: Vec<&String> = facts.keys().collect();
        debug!(?available, "Taxonomy missing from company facts");
        return Err(StatementsError::DataNotAvailable {
            cik: cik.as_ref().map_or_else(|| "unknown".to_string(), ToString::to_string),
            taxonomy: taxonomy.to_string(),
        });
    };

    let concepts = tags
        .into_iter()
        .map(|(tag, tag_facts)| {
            (
                tag,
                ConceptFacts {
                    label: tag_facts.label,
                    units: tag_facts.units.unwrap_or_default(),
                },
            )
        })
        .collect();

    Ok(CompanyFacts {
        cik,
        entity_name: response.entity_name,
        taxonomy: taxonomy.to_string(),
        concepts,
    })
}

/// Parses the SEC company-tickers document into `TICKER -> CIK`.
///
/// # Errors
/// Returns [`StatementsError::Parse`] if the document does not have the expected shape.
pub fn parse_ticker_directory(body: &str) -> Result<HashMap<String, Cik>> {
    let data: HashMap<String, CompanyTickerInfo> = serde_json::from_str(body)
        .map_err(|e| StatementsError::Parse(format!("Failed to parse company tickers: {e}")))?;
    Ok(data
        .into_values()
        .map(|company| (company.ticker.to_uppercase(), Cik::from_number(company.cik_str)))
        .collect())
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerInfo {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
}

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyFactsResponse {
    #[serde(default)]
    cik: Option<u64>,
    #[serde(default)]
    entity_name: String,
    /// Facts organized by taxonomy and tag
    #[serde(default)]
    facts: HashMap<String, HashMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Deserialize)]
struct TagFacts {
    #[serde(default)]
    label: Option<String>,
    /// Units (USD, shares, etc.) containing the actual fact values
    #[serde(default)]
    units: Option<HashMap<String, Vec<RawFact>>>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::{ConceptLookup, Unit};

    const FACTS: &str = r#"{
        "cik": 320193,
        "entityName": "Apple Inc.",
        "facts": {
            "dei": {
                "EntityCommonStockSharesOutstanding": {
                    "label": "Entity Common Stock, Shares Outstanding",
                    "units": { "shares": [ { "end": "2022-10-14", "val": 15908118000, "fy": 2022, "form": "10-K" } ] }
                }
            },
            "us-gaap": {
                "Revenues": {
                    "label": "Revenues",
                    "description": "Amount of revenue recognized.",
                    "units": {
                        "USD": [
                            { "start": "2021-09-26", "end": "2022-09-24", "val": 394328000000, "accn": "0000320193-22-000108", "fy": 2022, "fp": "FY", "form": "10-K", "filed": "2022-10-28", "frame": "CY2022" },
                            { "start": "2022-06-26", "end": "2022-09-24", "val": 90146000000, "fy": "2022", "fp": "FY", "form": "10-K", "qtrs": 1 }
                        ]
                    }
                },
                "Goodwill": { "label": "Goodwill" }
            }
        }
    }"#;

    #[test]
    fn test_parse_company_facts() {
        let facts = parse_company_facts(FACTS, "us-gaap").unwrap();

        assert_eq!(facts.cik.as_ref().map(Cik::as_str), Some("0000320193"));
        assert_eq!(facts.entity_name, "Apple Inc.");
        assert_eq!(facts.taxonomy, "us-gaap");
        assert_eq!(facts.len(), 2);

        let ConceptLookup::Found(revenue) = facts.lookup("Revenues", &Unit::usd()) else {
            panic!("revenues not found");
        };
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].fiscal_year_declared, Some(2022));
        assert_eq!(revenue[0].frame.as_deref(), Some("CY2022"));
        assert_eq!(revenue[0].duration_days(), Some(363));
        // numeric strings are accepted for fy
        assert_eq!(revenue[1].fiscal_year_declared, Some(2022));
        assert_eq!(revenue[1].period_quarters, Some(1));

        // a tag without units is kept but has nothing to look up
        assert!(matches!(
            facts.lookup("Goodwill", &Unit::usd()),
            ConceptLookup::MissingUnit { .. }
        ));
    }

    #[test]
    fn test_other_taxonomy() {
        let facts = parse_company_facts(FACTS, "dei").unwrap();
        assert!(matches!(
            facts.lookup("EntityCommonStockSharesOutstanding", &Unit::shares()),
            ConceptLookup::Found(_)
        ));
    }

    #[test]
    fn test_missing_taxonomy_is_data_not_available() {
        let err = parse_company_facts(FACTS, "ifrs-full").unwrap_err();
        match err {
            StatementsError::DataNotAvailable { cik, taxonomy } => {
                assert_eq!(cik, "0000320193");
                assert_eq!(taxonomy, "ifrs-full");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        assert!(matches!(
            parse_company_facts("<html>blocked</html>", "us-gaap"),
            Err(StatementsError::Parse(_))
        ));
        assert!(matches!(
            parse_company_facts(r#"{"facts": []}"#, "us-gaap"),
            Err(StatementsError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_ticker_directory() {
        let body = r#"{
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": 789019, "ticker": "msft", "title": "MICROSOFT CORP"}
        }"#;
        let directory = parse_ticker_directory(body).unwrap();
        assert_eq!(directory.get("AAPL").map(Cik::as_str), Some("0000320193"));
        assert_eq!(directory.get("MSFT").map(Cik::as_str), Some("0000789019"));
        assert!(!directory.contains_key("GOOG"));
    }

    #[tokio::test]
    async fn test_source_requires_user_agent() {
        assert!(matches!(
            EdgarSource::new("  "),
            Err(StatementsError::InvalidParameter(_))
        ));
        let source = EdgarSource::new("Test/1.0 (test@example.com)").unwrap();
        assert_eq!(source.name(), "SEC EDGAR");
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
