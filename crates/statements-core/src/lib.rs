#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types, catalogs and traits for annual statement extraction.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`RawFact`](types::RawFact) / [`CompanyFacts`](types::CompanyFacts) - Raw disclosures
//! - [`ConceptCatalog`](catalog::ConceptCatalog) - Concept → label, unit, category
//! - [`AnalysisConfig`](config::AnalysisConfig) / [`RunContext`](config::RunContext) - Run parameters
//! - [`DisclosureSource`](provider::DisclosureSource) - Where raw facts come from
//! - [`FactsCache`](cache::FactsCache) - Caching abstraction

/// Cache trait for storing fetched disclosures.
pub mod cache;
/// Concept catalogs, including the standard US-GAAP catalogs.
pub mod catalog;
/// Run configuration and context.
pub mod config;
/// Error types for statement extraction.
pub mod error;
/// Filing form classification.
pub mod form;
/// Source traits for fetching disclosures.
pub mod provider;
/// Core data types (facts, units, filer ids, statement kinds).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::FactsCache;
pub use catalog::{ConceptCatalog, ConceptEntry};
pub use config::{AnalysisConfig, RunContext, YearRange, haircut_percent};
pub use error::{Result, StatementsError};
pub use form::{ANNUAL_FORMS, FilingForm};
pub use provider::{DisclosureSource, FilerDirectory};
pub use types::{
    Cik, CompanyFacts, ConceptFacts, ConceptLookup, Filer, FiscalYear, MILLIONS, RawFact,
    ResolvedValue, StatementKind, Unit, master_file_name,
};
