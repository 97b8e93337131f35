//! Fact resolution.
//!
//! A concept is usually disclosed many times for the same fiscal year: in the annual
//! report, in its amendments, as a comparative column of later reports, and in
//! quarterly filings. [`FactResolver`] reduces that history to at most one value per
//! fiscal year by applying, in order:
//!
//! 1. form filter: only annual forms ([`ANNUAL_FORMS`](statements_core::ANNUAL_FORMS))
//! 2. fiscal year: declared `fy`, else the first four characters of the period end
//! 3. analysis window (closed range)
//! 4. full-year period: a declared quarter count must be 4; without one, a known
//!    duration must be at least [`MIN_ANNUAL_DAYS`]. A fact with no start date and no
//!    quarter count (an instant fact) has no known duration and passes; a fact with a
//!    start date whose length cannot be computed is discarded.
//! 5. restatement: the period-end year must equal the fiscal year
//! 6. scaling into display units
//! 7. tie-break: the longest period wins, first seen on equal durations

use std::collections::BTreeMap;
use std::fmt;

use statements_core::{FiscalYear, RawFact, ResolvedValue, Unit, YearRange};
use tracing::{debug, trace};

/// Shortest period accepted as a full year when no quarter count is declared.
pub const MIN_ANNUAL_DAYS: i64 = 300;

/// Quarter count of a full-year period.
pub const ANNUAL_QUARTERS: i32 = 4;

/// Why a fact was discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Filed on a quarterly or other interim form.
    InterimForm(String),
    /// Neither a declared fiscal year nor a usable period end.
    NoFiscalYear,
    /// Fiscal year outside the analysis window.
    OutsideWindow(FiscalYear),
    /// Declared quarter count other than four.
    PartialYearQuarters(i32),
    /// Known period shorter than a full year.
    PartialYearDuration(i64),
    /// Start date given but the period length cannot be computed.
    UnparseablePeriod,
    /// Period ends in a different year than the fiscal year it is filed under.
    Restated {
        /// Fiscal year the fact was filed under.
        fiscal_year: FiscalYear,
        /// Year the period actually ends in.
        end_year: FiscalYear,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InterimForm(form) => write!(f, "interim form {form:?}"),
            Self::NoFiscalYear => write!(f, "no fiscal year"),
            Self::OutsideWindow(year) => write!(f, "fiscal year {year} outside window"),
            Self::PartialYearQuarters(q) => write!(f, "{q} quarters"),
            Self::PartialYearDuration(d) => write!(f, "{d} day period"),
            Self::UnparseablePeriod => write!(f, "unparseable period"),
            Self::Restated {
                fiscal_year,
                end_year,
            } => write!(f, "period ends {end_year} but filed under fiscal year {fiscal_year}"),
        }
    }
}

/// A fact that passed every filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Admitted {
    /// Fiscal year the fact counts toward.
    pub fiscal_year: FiscalYear,
    /// Period length in days, 0 when unknown.
    pub duration_days: i64,
}

/// Reduces the raw facts of one concept/unit pair to one value per fiscal year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactResolver {
    window: YearRange,
}

impl FactResolver {
    /// Creates a resolver for an analysis window.
    #[must_use]
    pub const fn new(window: YearRange) -> Self {
        Self { window }
    }

    /// Analysis window of this resolver.
    #[must_use]
    pub const fn window(&self) -> YearRange {
        self.window
    }

    /// Applies the form, year, window, period-length and restatement filters to one fact.
    ///
    /// # Errors
    /// Returns the first [`Rejection`] the fact runs into.
    pub fn admit(&self, fact: &RawFact) -> Result<Admitted, Rejection> {
        if !fact.filing_form().is_annual() {
            return Err(Rejection::InterimForm(fact.form.clone()));
        }

        let fiscal_year = fact.fiscal_year().ok_or(Rejection::NoFiscalYear)?;
        if !self.window.contains(fiscal_year) {
            return Err(Rejection::OutsideWindow(fiscal_year));
        }

        let duration = fact.duration_days();
        match fact.period_quarters {
            Some(q) if q != ANNUAL_QUARTERS => return Err(Rejection::PartialYearQuarters(q)),
            Some(_) => {}
            None => match duration {
                Some(days) if days < MIN_ANNUAL_DAYS => {
                    return Err(Rejection::PartialYearDuration(days));
                }
                None if fact.period_start.is_some() => {
                    return Err(Rejection::UnparseablePeriod);
                }
                _ => {}
            },
        }

        if let Some(end_year) = fact.end_year()
            && end_year != fiscal_year
        {
            return Err(Rejection::Restated {
                fiscal_year,
                end_year,
            });
        }

        Ok(Admitted {
            fiscal_year,
            duration_days: duration.unwrap_or(0),
        })
    }

    /// Resolves the facts of one concept in one unit.
    ///
    /// Returns an empty map when nothing survives; that is the normal outcome for
    /// concepts a filer does not use.
    pub fn resolve(
        &self,
        concept_id: &str,
        unit: &Unit,
        facts: &[RawFact],
    ) -> BTreeMap<FiscalYear, ResolvedValue> {
        let mut best: BTreeMap<FiscalYear, ResolvedValue> = BTreeMap::new();

        for fact in facts {
            let admitted = match self.admit(fact) {
                Ok(admitted) => admitted,
                Err(reason) => {
                    trace!(concept = concept_id, %reason, "Discarded fact");
                    continue;
                }
            };

            if let Some(prev) = best.get(&admitted.fiscal_year)
                && admitted.duration_days <= prev.source_duration_days
            {
                continue;
            }

            best.insert(
                admitted.fiscal_year,
                ResolvedValue {
                    concept_id: concept_id.to_string(),
                    fiscal_year: admitted.fiscal_year,
                    value: unit.scale(fact.value),
                    source_form: fact.form.clone(),
                    source_duration_days: admitted.duration_days,
                    frame: fact.frame.clone(),
                    period_end: fact.period_end.clone(),
                },
            );
        }

        for resolved in best.values() {
            debug!(
                concept = concept_id,
                year = resolved.fiscal_year,
                form = %resolved.source_form,
                frame = ?resolved.frame,
                end = ?resolved.period_end,
                duration_days = resolved.source_duration_days,
                value = resolved.value,
                "Resolved annual value"
            );
        }

        best
    }
}

impl Default for FactResolver {
    fn default() -> Self {
        Self::new(YearRange::default())
    }
}
