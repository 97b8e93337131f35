//! Tabular rendering of statement grids.

use polars::prelude::*;
use statements_core::{FiscalYear, StatementKind};
use tracing::warn;

use crate::builder::StatementGrid;

/// Name of the section column in a rendered statement frame.
pub const CATEGORY_COLUMN: &str = "Category";
/// Name of the label column in a rendered statement frame.
pub const ITEM_COLUMN: &str = "Item";

/// A row of a rendered statement.
#[derive(Clone, Debug, PartialEq)]
pub enum TableRow {
    /// Section header opening a category.
    Section {
        /// Category name.
        category: String,
    },
    /// Line item with one cell per year column; `None` marks an absent value.
    Line {
        /// Row label.
        label: String,
        /// Values aligned with [`StatementTable::years`].
        values: Vec<Option<f64>>,
    },
}

/// A statement flattened into rows, with ascending fiscal years as columns.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementTable {
    kind: StatementKind,
    years: Vec<FiscalYear>,
    rows: Vec<TableRow>,
}

impl StatementTable {
    /// Renders a grid.
    ///
    /// Categories are emitted in `category_order`, skipping those without data. Each
    /// category starts with a section row followed by its labels in lexicographic
    /// order.
    #[must_use]
    pub fn render(grid: &StatementGrid, category_order: &[String]) -> Self {
        let years: Vec<FiscalYear> = grid.years().into_iter().collect();
        let mut rows = Vec::new();

        for category in grid.categories() {
            if !category_order.iter().any(|c| c == category) {
                warn!(statement = %grid.kind(), category, "Category missing from display order");
            }
        }

        for category in category_order {
            let mut labels = grid.labels(category).peekable();
            if labels.peek().is_none() {
                continue;
            }
            rows.push(TableRow::Section {
                category: category.clone(),
            });
            for (label, cells) in labels {
                rows.push(TableRow::Line {
                    label: label.to_string(),
                    values: years
                        .iter()
                        .map(|y| cells.get(y).map(|c| c.value))
                        .collect(),
                });
            }
        }

        Self {
            kind: grid.kind(),
            years,
            rows,
        }
    }

    /// Statement this table renders.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Fiscal-year columns, ascending.
    #[must_use]
    pub fn years(&self) -> &[FiscalYear] {
        &self.years
    }

    /// All rows, section headers included.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Line items only, as `(label, values)`.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Line { label, values } => Some((label.as_str(), values.as_slice())),
            TableRow::Section { .. } => None,
        })
    }

    /// Value of the first line with `label` for `year`.
    #[must_use]
    pub fn value(&self, label: &str, year: FiscalYear) -> Option<f64> {
        let col = self.years.iter().position(|y| *y == year)?;
        self.lines()
            .find(|(l, _)| *l == label)
            .and_then(|(_, values)| values[col])
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Converts the table into a frame with `Category`, `Item` and one column per year.
    ///
    /// Section rows carry the category name and nulls elsewhere; line rows have a null
    /// category. Absent values are null.
    ///
    /// # Errors
    /// Returns an error if polars rejects the columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut categories: Vec<Option<&str>> = Vec::with_capacity(self.rows.len());
        let mut items: Vec<Option<&str>> = Vec::with_capacity(self.rows.len());
        let mut year_values: Vec<Vec<Option<f64>>> =
            vec![Vec::with_capacity(self.rows.len()); self.years.len()];

        for row in &self.rows {
            match row {
                TableRow::Section { category } => {
                    categories.push(Some(category));
                    items.push(None);
                    for column in &mut year_values {
                        column.push(None);
                    }
                }
                TableRow::Line { label, values } => {
                    categories.push(None);
                    items.push(Some(label));
                    for (column, value) in year_values.iter_mut().zip(values) {
                        column.push(*value);
                    }
                }
            }
        }

        let mut columns = Vec::with_capacity(self.years.len() + 2);
        columns.push(Column::new(CATEGORY_COLUMN.into(), categories));
        columns.push(Column::new(ITEM_COLUMN.into(), items));
        for (year, values) in self.years.iter().zip(year_values) {
            columns.push(Column::new(year.to_string().into(), values));
        }
        DataFrame::new(columns)
    }
}
