//! Statement merging.
//!
//! Turns rendered statements into one wide series keyed by fiscal year. Every line item
//! becomes a column named `"{code}_{label}"`, so a label that appears on two statements
//! stays distinguishable.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use statements_core::FiscalYear;
use tracing::debug;

use crate::render::StatementTable;

/// Name of the key column in a merged frame.
pub const YEAR_COLUMN: &str = "Year";

/// Wide series of every statement line, one row per fiscal year.
///
/// A cell without a value is absent, never zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedSeries {
    columns: Vec<String>,
    rows: BTreeMap<FiscalYear, BTreeMap<String, f64>>,
}

impl MergedSeries {
    /// Full outer join of `tables` on fiscal year.
    ///
    /// Columns keep table order, then row order within a table. A year present in any
    /// table gets a row. When a label repeats inside one table, later rows overwrite the
    /// cells they have values for.
    #[must_use]
    pub fn merge(tables: &[StatementTable]) -> Self {
        let mut merged = Self::default();
        let mut seen = BTreeSet::new();

        for table in tables {
            let code = table.kind().code();
            for year in table.years() {
                merged.rows.entry(*year).or_default();
            }
            for (label, values) in table.lines() {
                let column = format!("{code}_{label}");
                if seen.insert(column.clone()) {
                    merged.columns.push(column.clone());
                } else {
                    debug!(column = %column, "Repeated label within statement");
                }
                for (year, value) in table.years().iter().zip(values) {
                    if let Some(v) = value {
                        merged
                            .rows
                            .entry(*year)
                            .or_default()
                            .insert(column.clone(), *v);
                    }
                }
            }
        }

        debug!(
            columns = merged.columns.len(),
            years = merged.rows.len(),
            "Merged statements"
        );
        merged
    }

    /// Column names in merge order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if `column` appeared in any merged statement.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fiscal years with a row, ascending.
    pub fn years(&self) -> impl Iterator<Item = FiscalYear> + '_ {
        self.rows.keys().copied()
    }

    /// Value of `column` in `year`, if present.
    #[must_use]
    pub fn get(&self, year: FiscalYear, column: &str) -> Option<f64> {
        self.rows.get(&year)?.get(column).copied()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no statement contributed a year.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Converts the series into a frame with a leading `Year` column.
    ///
    /// # Errors
    /// Returns an error if polars rejects the columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let years: Vec<FiscalYear> = self.years().collect();
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::new(YEAR_COLUMN.into(), years.clone()));
        for name in &self.columns {
            let values: Vec<Option<f64>> = years.iter().map(|y| self.get(*y, name)).collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StatementGrid;
    use statements_core::{ResolvedValue, StatementKind};

    fn table(kind: StatementKind, cells: &[(&str, FiscalYear, f64)]) -> StatementTable {
        let mut grid = StatementGrid::new(kind);
        for (label, year, value) in cells {
            grid.insert(
                "Main",
                label,
                &ResolvedValue {
                    concept_id: (*label).to_string(),
                    fiscal_year: *year,
                    value: *value,
                    source_form: "10-K".to_string(),
                    source_duration_days: 365,
                    frame: None,
                    period_end: None,
                },
            );
        }
        StatementTable::render(&grid, &["Main".to_string()])
    }

    #[test]
    fn test_year_only_in_one_statement_gets_row() {
        let income = table(
            StatementKind::IncomeStatement,
            &[("Net Income (Loss)", 2015, 1.0), ("Net Income (Loss)", 2016, 2.0)],
        );
        let balance = table(StatementKind::BalanceSheet, &[("Total assets", 2016, 10.0)]);
        let cash = table(StatementKind::CashFlow, &[]);

        let merged = MergedSeries::merge(&[income, balance, cash]);

        assert_eq!(merged.years().collect::<Vec<_>>(), vec![2015, 2016]);
        assert_eq!(merged.get(2015, "IS_Net Income (Loss)"), Some(1.0));
        assert!(merged.has_column("BS_Total assets"));
        assert_eq!(merged.get(2015, "BS_Total assets"), None);
        assert_eq!(merged.get(2016, "BS_Total assets"), Some(10.0));
    }

    #[test]
    fn test_same_label_on_two_statements_stays_distinct() {
        let income = table(StatementKind::IncomeStatement, &[("Depreciation", 2020, 1.0)]);
        let cash = table(StatementKind::CashFlow, &[("Depreciation", 2020, 2.0)]);

        let merged = MergedSeries::merge(&[income, cash]);

        assert_eq!(merged.columns(), &["IS_Depreciation", "CF_Depreciation"]);
        assert_eq!(merged.get(2020, "IS_Depreciation"), Some(1.0));
        assert_eq!(merged.get(2020, "CF_Depreciation"), Some(2.0));
    }

    #[test]
    fn test_dataframe_keeps_absent_cells_null() {
        let income = table(
            StatementKind::IncomeStatement,
            &[("Revenue", 2019, 5.0), ("Net Income (Loss)", 2020, 1.0)],
        );
        let merged = MergedSeries::merge(&[income]);
        let df = merged.to_dataframe().unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let revenue = df.column("IS_Revenue").unwrap();
        assert_eq!(revenue.null_count(), 1);
    }

    #[test]
    fn test_empty_merge() {
        let merged = MergedSeries::merge(&[]);
        assert!(merged.is_empty());
        assert_eq!(merged.len(), 0);
        assert!(merged.columns().is_empty());
    }
}
