//! Derived metrics over a merged series.
//!
//! A metric is an arithmetic [`Expr`] over merged columns evaluated once per fiscal
//! year. Evaluation follows three rules:
//!
//! - a column that never appeared in the merge reads as `0` in every row;
//! - a column that exists but has no value in a row makes that row's metric
//!   [`MetricValue::Absent`];
//! - a zero denominator, or any non-finite result, is [`MetricValue::Undefined`].
//!
//! A gap in a column is not filled with zero: a year without, say, a marketable
//! securities value has no quick ratio rather than one computed as if the securities
//! were worth nothing.

use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use statements_core::{FiscalYear, haircut_percent};
use tracing::debug;

use crate::merge::MergedSeries;

/// Merged column holding net income.
pub const NET_INCOME: &str = "IS_Net Income (Loss)";
/// Merged column holding revenue.
pub const REVENUE: &str = "IS_Total Net Revenues";
/// Merged column holding total assets.
pub const TOTAL_ASSETS: &str = "BS_Total assets";
/// Merged column holding total current assets.
pub const CURRENT_ASSETS: &str = "BS_Total current assets";
/// Merged column holding total current liabilities.
pub const CURRENT_LIABILITIES: &str = "BS_Total current liabilities";
/// Merged column holding cash and cash equivalents.
pub const CASH: &str = "BS_Cash and cash equivalents";
/// Merged column holding net receivables.
pub const RECEIVABLES: &str = "BS_Accounts receivable, net";
/// Merged column holding current marketable securities.
pub const SECURITIES: &str = "BS_Marketable securities, current";
/// Merged column holding long-term debt.
pub const LONG_TERM_DEBT: &str = "BS_Long-term debt";
/// Merged column holding total stockholders' equity.
pub const EQUITY: &str = "BS_Total stockholders' equity";
/// Merged column holding operating cash flow.
pub const OPERATING_CASH_FLOW: &str = "CF_Net cash provided by (used in) operating activities";
/// Merged column holding capital expenditure.
pub const CAPEX: &str = "CF_Cash spent on assets more than 1 year";

/// Arithmetic over merged columns.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A merged column.
    Column(String),
    /// A literal.
    Constant(f64),
    /// Sum.
    Add(Box<Expr>, Box<Expr>),
    /// Difference.
    Sub(Box<Expr>, Box<Expr>),
    /// Product.
    Mul(Box<Expr>, Box<Expr>),
    /// Quotient.
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Reference to a merged column.
    #[must_use]
    pub fn col(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Literal value.
    #[must_use]
    pub const fn lit(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Evaluates the expression against one row of `series`.
    #[must_use]
    pub fn evaluate(&self, series: &MergedSeries, year: FiscalYear) -> MetricValue {
        match self {
            Self::Column(name) => {
                if !series.has_column(name) {
                    return MetricValue::Value(0.0);
                }
                series
                    .get(year, name)
                    .map_or(MetricValue::Absent, MetricValue::Value)
            }
            Self::Constant(v) => MetricValue::Value(*v),
            Self::Add(a, b) => {
                MetricValue::combine(a.evaluate(series, year), b.evaluate(series, year), |x, y| {
                    MetricValue::finite(x + y)
                })
            }
            Self::Sub(a, b) => {
                MetricValue::combine(a.evaluate(series, year), b.evaluate(series, year), |x, y| {
                    MetricValue::finite(x - y)
                })
            }
            Self::Mul(a, b) => {
                MetricValue::combine(a.evaluate(series, year), b.evaluate(series, year), |x, y| {
                    MetricValue::finite(x * y)
                })
            }
            Self::Div(a, b) => {
                MetricValue::combine(a.evaluate(series, year), b.evaluate(series, year), |x, y| {
                    if y == 0.0 {
                        MetricValue::Undefined
                    } else {
                        MetricValue::finite(x / y)
                    }
                })
            }
        }
    }
}

impl ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::Mul(Box::new(self), Box::new(rhs))
    }
}

impl ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => write!(f, "[{name}]"),
            Self::Constant(v) => write!(f, "{v}"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
            Self::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

/// Result of evaluating a metric for one year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricValue {
    /// A finite number.
    Value(f64),
    /// The formula has no meaningful value (zero denominator).
    Undefined,
    /// An input column exists but has no value in this row.
    Absent,
}

impl MetricValue {
    const fn finite(v: f64) -> Self {
        if v.is_finite() {
            Self::Value(v)
        } else {
            Self::Undefined
        }
    }

    fn combine(a: Self, b: Self, op: impl FnOnce(f64, f64) -> Self) -> Self {
        match (a, b) {
            (Self::Absent, _) | (_, Self::Absent) => Self::Absent,
            (Self::Undefined, _) | (_, Self::Undefined) => Self::Undefined,
            (Self::Value(x), Self::Value(y)) => op(x, y),
        }
    }

    /// The number, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined | Self::Absent => None,
        }
    }

    /// Cell for a table column: `NaN` when undefined, `None` when absent.
    #[must_use]
    pub const fn to_cell(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined => Some(f64::NAN),
            Self::Absent => None,
        }
    }

    /// Returns true for [`MetricValue::Undefined`].
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// A named derived metric.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDefinition {
    /// Output column name.
    pub name: String,
    /// Formula.
    pub expr: Expr,
}

impl MetricDefinition {
    /// Creates a metric.
    #[must_use]
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// Column name of the stress quick ratio for a haircut, e.g. `0.15 -> Calc_Stress_Quick_15pct`.
#[must_use]
pub fn stress_column_name(haircut: f64) -> String {
    format!("Calc_Stress_Quick_{}pct", haircut_percent(haircut))
}

fn quick_assets(securities_factor: f64) -> Expr {
    let securities = if securities_factor == 1.0 {
        Expr::col(SECURITIES)
    } else {
        Expr::col(SECURITIES) * Expr::lit(securities_factor)
    };
    Expr::col(CASH) + Expr::col(RECEIVABLES) + securities
}

/// Ordered set of metrics evaluated over a merged series.
#[derive(Clone, Debug, Default)]
pub struct RatioEngine {
    metrics: Vec<MetricDefinition>,
}

impl RatioEngine {
    /// Creates an engine with the given metrics.
    #[must_use]
    pub const fn new(metrics: Vec<MetricDefinition>) -> Self {
        Self { metrics }
    }

    /// The standard metric set, with one stress quick ratio per haircut in the order given.
    #[must_use]
    pub fn standard(haircuts: &[f64]) -> Self {
        let mut metrics = vec![
            MetricDefinition::new("Calc_Net_Margin", Expr::col(NET_INCOME) / Expr::col(REVENUE)),
            MetricDefinition::new("Calc_ROE", Expr::col(NET_INCOME) / Expr::col(EQUITY)),
            MetricDefinition::new("Calc_ROA", Expr::col(NET_INCOME) / Expr::col(TOTAL_ASSETS)),
            MetricDefinition::new(
                "Calc_Debt_To_Equity",
                Expr::col(LONG_TERM_DEBT) / Expr::col(EQUITY),
            ),
            MetricDefinition::new(
                "Calc_Current_Ratio",
                Expr::col(CURRENT_ASSETS) / Expr::col(CURRENT_LIABILITIES),
            ),
            MetricDefinition::new(
                "Calc_Quick_Ratio_Base",
                quick_assets(1.0) / Expr::col(CURRENT_LIABILITIES),
            ),
        ];
        for h in haircuts {
            metrics.push(MetricDefinition::new(
                stress_column_name(*h),
                quick_assets(1.0 - h) / Expr::col(CURRENT_LIABILITIES),
            ));
        }
        metrics.push(MetricDefinition::new(
            "Calc_FCF",
            Expr::col(OPERATING_CASH_FLOW) - Expr::col(CAPEX),
        ));
        Self { metrics }
    }

    /// Appends a metric.
    #[must_use]
    pub fn with_metric(mut self, metric: MetricDefinition) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Metrics in evaluation order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    /// Evaluates every metric for every year of `series`.
    #[must_use]
    pub fn evaluate(&self, series: &MergedSeries) -> DerivedMetrics {
        for metric in &self.metrics {
            debug!(metric = %metric.name, formula = %metric.expr, "Evaluating metric");
        }
        let rows = series
            .years()
            .map(|year| {
                let values = self
                    .metrics
                    .iter()
                    .map(|m| m.expr.evaluate(series, year))
                    .collect();
                (year, values)
            })
            .collect();
        DerivedMetrics {
            names: self.metrics.iter().map(|m| m.name.clone()).collect(),
            rows,
        }
    }
}

/// Metric values by fiscal year, columns in engine order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedMetrics {
    names: Vec<String>,
    rows: BTreeMap<FiscalYear, Vec<MetricValue>>,
}

impl DerivedMetrics {
    /// Metric names in column order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Value of `metric` in `year`. `None` if either is unknown.
    #[must_use]
    pub fn get(&self, year: FiscalYear, metric: &str) -> Option<MetricValue> {
        let idx = self.names.iter().position(|n| n == metric)?;
        self.rows.get(&year).map(|values| values[idx])
    }

    /// Values of `metric` for every year, ascending.
    pub fn column<'a>(&'a self, metric: &str) -> impl Iterator<Item = MetricValue> + 'a {
        let idx = self.names.iter().position(|n| n == metric);
        self.rows
            .values()
            .filter_map(move |values| idx.map(|i| values[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StatementGrid;
    use crate::render::StatementTable;
    use approx::assert_relative_eq;
    use rstest::rstest;
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

    fn balance(cells: &[(&str, FiscalYear, f64)]) -> MergedSeries {
        MergedSeries::merge(&[table(StatementKind::BalanceSheet, cells)])
    }

    #[test]
    fn test_zero_current_liabilities_is_undefined() {
        let series = balance(&[
            ("Total current assets", 2022, 100.0),
            ("Total current liabilities", 2022, 0.0),
        ]);
        let derived = RatioEngine::standard(&[0.1]).evaluate(&series);

        assert_eq!(
            derived.get(2022, "Calc_Current_Ratio"),
            Some(MetricValue::Undefined)
        );
        assert_eq!(
            derived.get(2022, "Calc_Quick_Ratio_Base"),
            Some(MetricValue::Undefined)
        );
        assert!(derived.get(2022, "Calc_Current_Ratio").unwrap().to_cell().unwrap().is_nan());
    }

    #[test]
    fn test_missing_column_reads_as_zero() {
        // no securities line anywhere: the quick ratio is cash plus receivables
        let series = balance(&[
            ("Cash and cash equivalents", 2021, 30.0),
            ("Accounts receivable, net", 2021, 20.0),
            ("Total current liabilities", 2021, 25.0),
        ]);
        let derived = RatioEngine::standard(&[]).evaluate(&series);
        let quick = derived.get(2021, "Calc_Quick_Ratio_Base").unwrap().value().unwrap();
        assert_relative_eq!(quick, 2.0);
    }

    #[test]
    fn test_missing_row_value_is_absent() {
        let series = balance(&[
            ("Total current assets", 2020, 50.0),
            ("Total current assets", 2021, 60.0),
            ("Total current liabilities", 2021, 30.0),
        ]);
        let derived = RatioEngine::standard(&[]).evaluate(&series);

        assert_eq!(derived.get(2020, "Calc_Current_Ratio"), Some(MetricValue::Absent));
        assert_eq!(derived.get(2020, "Calc_Current_Ratio").unwrap().to_cell(), None);
        let current = derived.get(2021, "Calc_Current_Ratio").unwrap().value().unwrap();
        assert_relative_eq!(current, 2.0);
    }

    #[test]
    fn test_stress_ratios_apply_haircut_to_securities() {
        let series = balance(&[
            ("Cash and cash equivalents", 2022, 10.0),
            ("Accounts receivable, net", 2022, 10.0),
            ("Marketable securities, current", 2022, 80.0),
            ("Total current liabilities", 2022, 50.0),
        ]);
        let derived = RatioEngine::standard(&[0.10, 0.15, 0.25]).evaluate(&series);

        let base = derived.get(2022, "Calc_Quick_Ratio_Base").unwrap().value().unwrap();
        assert_relative_eq!(base, 2.0);
        let s10 = derived.get(2022, "Calc_Stress_Quick_10pct").unwrap().value().unwrap();
        assert_relative_eq!(s10, (20.0 + 72.0) / 50.0, epsilon = 1e-12);
        let s25 = derived.get(2022, "Calc_Stress_Quick_25pct").unwrap().value().unwrap();
        assert_relative_eq!(s25, (20.0 + 60.0) / 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_free_cash_flow() {
        let series = MergedSeries::merge(&[table(
            StatementKind::CashFlow,
            &[
                ("Net cash provided by (used in) operating activities", 2023, 120.0),
                ("Cash spent on assets more than 1 year", 2023, 45.0),
            ],
        )]);
        let derived = RatioEngine::standard(&[]).evaluate(&series);
        let fcf = derived.get(2023, "Calc_FCF").unwrap().value().unwrap();
        assert_relative_eq!(fcf, 75.0);
    }

    #[test]
    fn test_absent_wins_over_undefined() {
        let a = MetricValue::Absent;
        let u = MetricValue::Undefined;
        let v = MetricValue::Value(1.0);
        assert_eq!(MetricValue::combine(a, u, |_, _| v), MetricValue::Absent);
        assert_eq!(MetricValue::combine(u, v, |_, _| v), MetricValue::Undefined);
        assert_eq!(MetricValue::combine(v, v, |x, y| MetricValue::Value(x + y)), MetricValue::Value(2.0));
    }

    #[rstest]
    #[case(0.10, "Calc_Stress_Quick_10pct")]
    #[case(0.15, "Calc_Stress_Quick_15pct")]
    #[case(0.25, "Calc_Stress_Quick_25pct")]
    #[case(0.125, "Calc_Stress_Quick_12.5pct")]
    #[case(0.0, "Calc_Stress_Quick_0pct")]
    fn test_stress_column_name(#[case] haircut: f64, #[case] expected: &str) {
        assert_eq!(stress_column_name(haircut), expected);
    }

    #[test]
    fn test_standard_metric_order() {
        let engine = RatioEngine::standard(&[0.10, 0.25]);
        let names: Vec<&str> = engine.metrics().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Calc_Net_Margin",
                "Calc_ROE",
                "Calc_ROA",
                "Calc_Debt_To_Equity",
                "Calc_Current_Ratio",
                "Calc_Quick_Ratio_Base",
                "Calc_Stress_Quick_10pct",
                "Calc_Stress_Quick_25pct",
                "Calc_FCF",
            ]
        );
    }

    #[test]
    fn test_expr_display() {
        let expr = (Expr::col("A") + Expr::lit(2.0)) / Expr::col("B");
        assert_eq!(expr.to_string(), "(([A] + 2) / [B])");
    }
}
