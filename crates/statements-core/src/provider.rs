//! Source traits for fetching raw disclosures.
//!
//! This module defines the external-collaborator seams of the pipeline:
//!
//! - [`DisclosureSource`] - Fetches every fact a filer disclosed under one taxonomy
//! - [`FilerDirectory`] - Resolves ticker symbols to filer ids

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{Cik, CompanyFacts},
};

/// Source of raw disclosure facts.
///
/// A failed fetch (transport error, non-success status, unrecognised document shape)
/// must be returned as an error; the pipeline then produces no statement for the run.
#[async_trait]
pub trait DisclosureSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches `concept_id -> unit -> [fact]` for a filer under `taxonomy`.
    async fn company_facts(&self, cik: &Cik, taxonomy: &str) -> Result<CompanyFacts>;
}

/// Directory mapping ticker symbols to filer ids.
#[async_trait]
pub trait FilerDirectory: Send + Sync + Debug {
    /// Looks up the CIK registered for a ticker symbol.
    ///
    /// Returns [`StatementsError::FilerNotFound`](crate::StatementsError::FilerNotFound)
    /// when the ticker is unknown.
    async fn lookup_cik(&self, ticker: &str) -> Result<Cik>;
}
