//! Core data types for disclosure facts and financial statements.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Cik`] / [`Filer`] - Filer identifiers
//! - [`Unit`] - Unit of measure of a fact, with its display scaling
//! - [`RawFact`] - One disclosed observation of a concept
//! - [`CompanyFacts`] - Every fact a filer disclosed, by concept and unit
//! - [`ResolvedValue`] - The canonical value chosen for a concept and fiscal year
//! - [`StatementKind`] - Balance sheet, income statement or cash-flow statement

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatementsError};
use crate::form::FilingForm;

/// A fiscal year as declared by the filer.
pub type FiscalYear = i32;

/// Central Index Key of an SEC filer, zero-padded to 10 digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK from its textual form, padding it to 10 digits.
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] if the input is empty, contains
    /// anything other than ASCII digits, or is longer than 10 digits.
    pub fn new(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("CIK")
            .or_else(|| trimmed.strip_prefix("cik"))
            .unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StatementsError::InvalidParameter(format!(
                "Invalid CIK: {s:?}"
            )));
        }
        Ok(Self(format!("{digits:0>10}")))
    }

    /// Creates a CIK from its numeric form.
    #[must_use]
    pub fn from_number(n: u64) -> Self {
        Self(format!("{n:0>10}"))
    }

    /// Returns the zero-padded CIK.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cik {
    type Err = StatementsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// How the filer of a run is identified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filer {
    /// A known CIK.
    Cik(Cik),
    /// A ticker symbol that still has to be resolved to a CIK. Uppercased on creation.
    Ticker(String),
}

impl Filer {
    /// Creates a ticker-identified filer.
    #[must_use]
    pub fn ticker(s: impl Into<String>) -> Self {
        Self::Ticker(s.into().trim().to_uppercase())
    }
}

impl fmt::Display for Filer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cik(cik) => write!(f, "CIK{cik}"),
            Self::Ticker(ticker) => write!(f, "{ticker}"),
        }
    }
}

/// Unit of measure a fact is reported in (e.g. `USD`, `shares`, `USD/shares`, `pure`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Unit(String);

/// Divisor applied to monetary and share-count values.
pub const MILLIONS: f64 = 1_000_000.0;

impl Unit {
    /// Creates a unit from its source key.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// US dollars.
    #[must_use]
    pub fn usd() -> Self {
        Self::new("USD")
    }

    /// Share counts.
    #[must_use]
    pub fn shares() -> Self {
        Self::new("shares")
    }

    /// Returns the unit key as used by the disclosure source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for a bare currency code such as `USD` or `EUR`.
    #[must_use]
    pub fn is_monetary(&self) -> bool {
        self.0.len() == 3 && self.0.bytes().all(|b| b.is_ascii_uppercase())
    }

    /// Returns true for share counts.
    #[must_use]
    pub fn is_share_count(&self) -> bool {
        self.0 == "shares"
    }

    /// Returns the factor a raw value is divided by for display.
    ///
    /// Monetary and share-count values are reported in millions; ratios and per-share
    /// amounts pass through unchanged.
    #[must_use]
    pub fn divisor(&self) -> f64 {
        if self.is_monetary() || self.is_share_count() {
            MILLIONS
        } else {
            1.0
        }
    }

    /// Rescales a raw value into display units.
    #[must_use]
    pub fn scale(&self, raw: f64) -> f64 {
        raw / self.divisor()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One disclosure event for a concept/unit pair.
///
/// Field names follow the SEC company-facts document. Dates are kept as the strings the
/// source sent so that an unparseable date only discards the fact it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Reported value, unscaled.
    #[serde(rename = "val")]
    pub value: f64,
    /// Filing form the fact was disclosed in (e.g. `10-K`).
    #[serde(default)]
    pub form: String,
    /// Filer-declared fiscal year, if present and integral.
    #[serde(rename = "fy", default, deserialize_with = "lenient_int")]
    pub fiscal_year_declared: Option<FiscalYear>,
    /// Start of the reporting period (absent for instant facts).
    #[serde(rename = "start", default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    /// End of the reporting period, or the instant for point-in-time facts.
    #[serde(rename = "end", default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
    /// Number of quarters the period spans, if declared and integral.
    #[serde(
        rename = "qtrs",
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_quarters: Option<i32>,
    /// Calendar frame the source assigned to the fact (e.g. `CY2022`, `CY2022Q4I`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    /// Accession number of the filing.
    #[serde(rename = "accn", default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    /// Date the filing was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed: Option<String>,
}

impl RawFact {
    /// Creates a fact with a value and form; every other field is absent.
    #[must_use]
    pub fn new(value: f64, form: impl Into<String>) -> Self {
        Self {
            value,
            form: form.into(),
            fiscal_year_declared: None,
            period_start: None,
            period_end: None,
            period_quarters: None,
            frame: None,
            accession: None,
            filed: None,
        }
    }

    /// Sets the declared fiscal year.
    #[must_use]
    pub const fn with_fiscal_year(mut self, fy: FiscalYear) -> Self {
        self.fiscal_year_declared = Some(fy);
        self
    }

    /// Sets the reporting period.
    #[must_use]
    pub fn with_period(mut self, start: Option<&str>, end: &str) -> Self {
        self.period_start = start.map(str::to_string);
        self.period_end = Some(end.to_string());
        self
    }

    /// Sets the declared quarter count.
    #[must_use]
    pub const fn with_quarters(mut self, qtrs: i32) -> Self {
        self.period_quarters = Some(qtrs);
        self
    }

    /// Sets the calendar frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    /// Classifies the filing form.
    #[must_use]
    pub fn filing_form(&self) -> FilingForm {
        FilingForm::classify(&self.form)
    }

    /// Parsed period start, if present and a valid ISO date.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_date(self.period_start.as_deref()?)
    }

    /// Parsed period end, if present and a valid ISO date.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_date(self.period_end.as_deref()?)
    }

    /// Year taken from the first four characters of the period end.
    #[must_use]
    pub fn end_year(&self) -> Option<FiscalYear> {
        self.period_end.as_deref()?.get(..4)?.parse().ok()
    }

    /// Fiscal year of the fact: the declared year, else the period-end year.
    #[must_use]
    pub fn fiscal_year(&self) -> Option<FiscalYear> {
        self.fiscal_year_declared.or_else(|| self.end_year())
    }

    /// Length of the reporting period in days, when both ends are valid dates.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        let start = self.start_date()?;
        let end = self.end_date()?;
        Some((end - start).num_days())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()
}

/// Accepts an integer, an integral float or a numeric string; anything else is `None`.
fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Facts for a single concept, keyed by unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptFacts {
    /// Source label of the concept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Facts by unit key.
    #[serde(default)]
    pub units: HashMap<String, Vec<RawFact>>,
}

/// Outcome of looking up one concept/unit pair in [`CompanyFacts`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConceptLookup<'a> {
    /// Facts were found in the expected unit.
    Found(&'a [RawFact]),
    /// The concept was not disclosed at all.
    MissingConcept,
    /// The concept was disclosed, but not in the expected unit.
    MissingUnit {
        /// Units the concept is available in, sorted.
        available: Vec<&'a str>,
    },
}

/// Every fact a filer disclosed under one taxonomy: `concept_id -> unit -> [fact]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFacts {
    /// Filer the facts belong to.
    pub cik: Option<Cik>,
    /// Registered name of the filer.
    #[serde(default)]
    pub entity_name: String,
    /// Taxonomy the concepts belong to (e.g. `us-gaap`).
    #[serde(default)]
    pub taxonomy: String,
    /// Facts by concept id.
    #[serde(default)]
    pub concepts: HashMap<String, ConceptFacts>,
}

impl CompanyFacts {
    /// Creates an empty fact set for a taxonomy.
    #[must_use]
    pub fn new(taxonomy: impl Into<String>) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            ..Self::default()
        }
    }

    /// Adds facts for a concept/unit pair, appending to any already present.
    pub fn insert(&mut self, concept_id: &str, unit: &Unit, facts: Vec<RawFact>) {
        self.concepts
            .entry(concept_id.to_string())
            .or_default()
            .units
            .entry(unit.as_str().to_string())
            .or_default()
            .extend(facts);
    }

    /// Looks up the facts for a concept in one unit.
    #[must_use]
    pub fn lookup(&self, concept_id: &str, unit: &Unit) -> ConceptLookup<'_> {
        let Some(concept) = self.concepts.get(concept_id) else {
            return ConceptLookup::MissingConcept;
        };
        match concept.units.get(unit.as_str()) {
            Some(facts) => ConceptLookup::Found(facts),
            None => {
                let mut available: Vec<&str> = concept.units.keys().map(String::as_str).collect();
                available.sort_unstable();
                ConceptLookup::MissingUnit { available }
            }
        }
    }

    /// Number of concepts disclosed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if no concept was disclosed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// The canonical value selected for one concept and fiscal year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    /// Concept the value belongs to.
    pub concept_id: String,
    /// Fiscal year the value is reported for.
    pub fiscal_year: FiscalYear,
    /// Scaled value.
    pub value: f64,
    /// Form of the winning fact.
    pub source_form: String,
    /// Period length of the winning fact in days (0 for instant facts).
    pub source_duration_days: i64,
    /// Frame of the winning fact.
    pub frame: Option<String>,
    /// Period end of the winning fact.
    pub period_end: Option<String>,
}

/// The three canonical annual statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    /// Balance sheet (point-in-time positions).
    BalanceSheet,
    /// Income statement.
    IncomeStatement,
    /// Cash-flow statement.
    CashFlow,
}

impl StatementKind {
    /// All statement kinds, in merge order.
    pub const ALL: [Self; 3] = [Self::IncomeStatement, Self::BalanceSheet, Self::CashFlow];

    /// Short code used to prefix merged column names.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::CashFlow => "CF",
        }
    }

    /// Human-readable statement title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow Statement",
        }
    }

    /// File name suffix for a rendered statement.
    #[must_use]
    pub const fn file_suffix(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "Income_Statement",
            Self::CashFlow => "Cashflow_statement",
        }
    }

    /// Suggested CSV file name for this statement of a filer.
    #[must_use]
    pub fn suggested_file_name(&self, cik: &Cik) -> String {
        format!("{}_{}.csv", cik, self.file_suffix())
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for StatementKind {
    type Err = StatementsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "bs" | "balance-sheet" => Ok(Self::BalanceSheet),
            "is" | "income-statement" | "income" => Ok(Self::IncomeStatement),
            "cf" | "cash-flow" | "cashflow" => Ok(Self::CashFlow),
            _ => Err(StatementsError::InvalidParameter(format!(
                "Unknown statement kind: {s}"
            ))),
        }
    }
}

/// Suggested CSV file name for the merged analysis of a filer.
#[must_use]
pub fn master_file_name(cik: &Cik) -> String {
    format!("{cik}_MASTER_ANALYSIS.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_cik_padding() {
        let cik = Cik::new("1045810").unwrap();
        assert_eq!(cik.as_str(), "0001045810");
        assert_eq!(Cik::new("CIK0001045810").unwrap(), cik);
        assert_eq!(Cik::from_number(1_045_810), cik);
        assert!(Cik::new("").is_err());
        assert!(Cik::new("12a4").is_err());
        assert!(Cik::new("12345678901").is_err());
    }

    #[test]
    fn test_ticker_uppercased() {
        assert_eq!(Filer::ticker(" nvda "), Filer::Ticker("NVDA".to_string()));
    }

    #[rstest]
    #[case("USD", 1_000_000.0)]
    #[case("EUR", 1_000_000.0)]
    #[case("shares", 1_000_000.0)]
    #[case("USD/shares", 1.0)]
    #[case("pure", 1.0)]
    fn test_unit_divisor(#[case] unit: &str, #[case] divisor: f64) {
        assert_eq!(Unit::new(unit).divisor(), divisor);
    }

    #[test]
    fn test_fact_deserialize_from_company_facts_shape() {
        let json = r#"{
            "start": "2022-01-31", "end": "2023-01-29", "val": 26974000000,
            "accn": "0001045810-23-000017", "fy": 2023, "fp": "FY",
            "form": "10-K", "filed": "2023-02-24", "frame": "CY2022"
        }"#;
        let fact: RawFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.value, 26_974_000_000.0);
        assert_eq!(fact.fiscal_year_declared, Some(2023));
        assert_eq!(fact.duration_days(), Some(363));
        assert_eq!(fact.end_year(), Some(2023));
        assert!(fact.filing_form().is_annual());
    }

    #[test]
    fn test_fact_lenient_fields() {
        let json = r#"{"end": "2021-12-31", "val": 1.0, "form": "10-K", "fy": "n/a", "qtrs": "four"}"#;
        let fact: RawFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.fiscal_year_declared, None);
        assert_eq!(fact.period_quarters, None);
        assert_eq!(fact.fiscal_year(), Some(2021));

        let json = r#"{"end": "2021-12-31", "val": 1.0, "form": "10-K", "fy": "2022", "qtrs": 4}"#;
        let fact: RawFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.fiscal_year_declared, Some(2022));
        assert_eq!(fact.period_quarters, Some(4));
    }

    #[test]
    fn test_fact_without_year_or_dates() {
        let fact = RawFact::new(1.0, "10-K");
        assert_eq!(fact.fiscal_year(), None);
        assert_eq!(fact.duration_days(), None);

        let fact = RawFact::new(1.0, "10-K").with_period(Some("garbage"), "20x1-01-01");
        assert_eq!(fact.end_year(), None);
        assert_eq!(fact.duration_days(), None);
    }

    #[test]
    fn test_lookup_outcomes() {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("Assets", &Unit::usd(), vec![RawFact::new(1.0, "10-K")]);

        assert!(matches!(
            facts.lookup("Assets", &Unit::usd()),
            ConceptLookup::Found(f) if f.len() == 1
        ));
        assert_eq!(
            facts.lookup("Goodwill", &Unit::usd()),
            ConceptLookup::MissingConcept
        );
        assert_eq!(
            facts.lookup("Assets", &Unit::shares()),
            ConceptLookup::MissingUnit {
                available: vec!["USD"]
            }
        );
    }

    #[test]
    fn test_statement_kind_names() {
        let cik = Cik::from_number(1_045_810);
        assert_eq!(
            StatementKind::BalanceSheet.suggested_file_name(&cik),
            "0001045810_balance_sheet.csv"
        );
        assert_eq!(master_file_name(&cik), "0001045810_MASTER_ANALYSIS.csv");
        assert_eq!(
            "cash_flow".parse::<StatementKind>().unwrap(),
            StatementKind::CashFlow
        );
        assert!("ledger".parse::<StatementKind>().is_err());
    }
}
