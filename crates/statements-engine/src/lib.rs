#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/statements/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Full pipeline over in-memory facts.
pub mod analysis;
/// Catalog-driven statement assembly.
pub mod builder;
/// Outer join of rendered statements on fiscal year.
pub mod merge;
/// Derived metric expressions and their evaluation.
pub mod ratios;
/// Tabular rendering of statement grids.
pub mod render;
/// Annual value selection per concept and fiscal year.
pub mod resolver;

pub use analysis::{Analysis, Analyzer};
pub use builder::{GridCell, StatementBuilder, StatementGrid};
pub use merge::MergedSeries;
pub use ratios::{DerivedMetrics, Expr, MetricDefinition, MetricValue, RatioEngine};
pub use render::{StatementTable, TableRow};
pub use resolver::{Admitted, FactResolver, Rejection};
