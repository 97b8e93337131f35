#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Core types and traits
pub use statements_core::*;

// Resolution, assembly, merging and ratios
pub use statements_engine::{
    Analysis, Analyzer, DerivedMetrics, Expr, FactResolver, MergedSeries, MetricDefinition,
    MetricValue, RatioEngine, StatementBuilder, StatementGrid, StatementTable, TableRow,
};

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use statements_cache::SqliteCache;
pub use statements_cache::{InMemoryCache, NoopCache};

// Sources
#[cfg(feature = "edgar")]
pub use statements_edgar::EdgarSource;

/// CSV output.
pub mod output;
mod pipeline;
pub use pipeline::{Pipeline, RunReport};
