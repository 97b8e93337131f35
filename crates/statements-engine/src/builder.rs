//! Statement assembly.
//!
//! [`StatementBuilder`] walks a [`ConceptCatalog`] in declaration order, resolves each
//! concept, and folds the results into a [`StatementGrid`]
//! (`category -> label -> fiscal year -> value`).

use std::collections::{BTreeMap, BTreeSet};

use statements_core::{
    CompanyFacts, ConceptCatalog, ConceptLookup, FiscalYear, ResolvedValue, StatementKind,
};
use tracing::{debug, info};

use crate::resolver::FactResolver;

/// One filled grid cell and the concept it was resolved from.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// Scaled value.
    pub value: f64,
    /// Concept that produced the value.
    pub concept_id: String,
}

type LabelYears = BTreeMap<String, BTreeMap<FiscalYear, GridCell>>;

/// Resolved values of one statement, grouped by category and label.
///
/// Buckets are created on the first value written to them, so an empty category or
/// label never appears. Writing a cell that is already filled replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementGrid {
    kind: StatementKind,
    cells: BTreeMap<String, LabelYears>,
}

impl StatementGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            cells: BTreeMap::new(),
        }
    }

    /// Statement this grid belongs to.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Writes a resolved value into `category / label / year`, returning the cell it
    /// replaced, if any.
    pub fn insert(
        &mut self,
        category: &str,
        label: &str,
        resolved: &ResolvedValue,
    ) -> Option<GridCell> {
        self.cells
            .entry(category.to_string())
            .or_default()
            .entry(label.to_string())
            .or_default()
            .insert(
                resolved.fiscal_year,
                GridCell {
                    value: resolved.value,
                    concept_id: resolved.concept_id.clone(),
                },
            )
    }

    /// Value of a cell, if filled.
    #[must_use]
    pub fn get(&self, category: &str, label: &str, year: FiscalYear) -> Option<f64> {
        self.cell(category, label, year).map(|c| c.value)
    }

    /// A filled cell with its source concept.
    #[must_use]
    pub fn cell(&self, category: &str, label: &str, year: FiscalYear) -> Option<&GridCell> {
        self.cells.get(category)?.get(label)?.get(&year)
    }

    /// Labels of a category in lexicographic order with their values by year.
    pub fn labels(
        &self,
        category: &str,
    ) -> impl Iterator<Item = (&str, &BTreeMap<FiscalYear, GridCell>)> {
        self.cells
            .get(category)
            .into_iter()
            .flat_map(|labels| labels.iter().map(|(l, years)| (l.as_str(), years)))
    }

    /// Categories holding at least one value, in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Sorted union of every fiscal year with a value.
    #[must_use]
    pub fn years(&self) -> BTreeSet<FiscalYear> {
        self.cells
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::keys)
            .copied()
            .collect()
    }

    /// Returns true if no value was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Builds a [`StatementGrid`] from company facts using one catalog.
#[derive(Clone, Copy, Debug)]
pub struct StatementBuilder<'a> {
    catalog: &'a ConceptCatalog,
    resolver: FactResolver,
}

impl<'a> StatementBuilder<'a> {
    /// Creates a builder for a catalog.
    #[must_use]
    pub const fn new(catalog: &'a ConceptCatalog, resolver: FactResolver) -> Self {
        Self { catalog, resolver }
    }

    /// Resolves every effective catalog entry and writes its values into a grid.
    ///
    /// Missing concepts and unit mismatches are logged and skipped. When several
    /// concepts share a label, the one declared later overwrites the cells it has
    /// values for.
    pub fn build(&self, facts: &CompanyFacts) -> StatementGrid {
        let kind = self.catalog.kind();
        let mut grid = StatementGrid::new(kind);

        for entry in self.catalog.effective_entries() {
            let raw = match facts.lookup(&entry.concept_id, &entry.unit) {
                ConceptLookup::Found(raw) => raw,
                ConceptLookup::MissingConcept => {
                    info!(statement = %kind, concept = %entry.concept_id, "Concept not found");
                    continue;
                }
                ConceptLookup::MissingUnit { available } => {
                    info!(
                        statement = %kind,
                        concept = %entry.concept_id,
                        expected = %entry.unit,
                        ?available,
                        "Concept does not have expected unit"
                    );
                    continue;
                }
            };

            let resolved = self.resolver.resolve(&entry.concept_id, &entry.unit, raw);
            if resolved.is_empty() {
                debug!(
                    statement = %kind,
                    concept = %entry.concept_id,
                    "No annual values in window"
                );
                continue;
            }

            for value in resolved.values() {
                if let Some(prev) = grid.insert(&entry.category, &entry.label, value)
                    && prev.concept_id != value.concept_id
                {
                    debug!(
                        statement = %kind,
                        label = %entry.label,
                        year = value.fiscal_year,
                        replaced = %prev.concept_id,
                        by = %value.concept_id,
                        "Label collision"
                    );
                }
            }
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_core::{ConceptEntry, RawFact, Unit, YearRange};

    fn fy_fact(value: f64, fy: FiscalYear) -> RawFact {
        RawFact::new(value, "10-K")
            .with_fiscal_year(fy)
            .with_period(Some(format!("{fy}-01-01").as_str()), &format!("{fy}-12-31"))
    }

    fn catalog(entries: Vec<ConceptEntry>) -> ConceptCatalog {
        ConceptCatalog::new(
            StatementKind::IncomeStatement,
            vec!["Revenues".to_string(), "Net Income".to_string()],
            entries,
        )
        .unwrap()
    }

    fn resolver() -> FactResolver {
        FactResolver::new(YearRange::new(2014, 2025).unwrap())
    }

    #[test]
    fn test_builds_grid_by_category_and_label() {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert(
            "Revenues",
            &Unit::usd(),
            vec![fy_fact(10_000_000.0, 2020), fy_fact(12_000_000.0, 2021)],
        );
        facts.insert("NetIncomeLoss", &Unit::usd(), vec![fy_fact(3_000_000.0, 2021)]);

        let catalog = catalog(vec![
            ConceptEntry::new("Revenues", "Total Net Revenues", "USD", "Revenues"),
            ConceptEntry::new("NetIncomeLoss", "Net Income (Loss)", "USD", "Net Income"),
            ConceptEntry::new("Goodwill", "Goodwill", "USD", "Net Income"),
        ]);
        let grid = StatementBuilder::new(&catalog, resolver()).build(&facts);

        assert_eq!(grid.get("Revenues", "Total Net Revenues", 2020), Some(10.0));
        assert_eq!(grid.get("Revenues", "Total Net Revenues", 2021), Some(12.0));
        assert_eq!(grid.get("Net Income", "Net Income (Loss)", 2021), Some(3.0));
        assert_eq!(grid.get("Net Income", "Net Income (Loss)", 2020), None);
        assert_eq!(grid.years().into_iter().collect::<Vec<_>>(), vec![2020, 2021]);
        // the missing concept leaves no empty bucket behind
        assert_eq!(grid.labels("Net Income").count(), 1);
    }

    #[test]
    fn test_unit_mismatch_skipped() {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("Revenues", &Unit::new("EUR"), vec![fy_fact(1.0, 2020)]);
        let catalog = catalog(vec![ConceptEntry::new(
            "Revenues",
            "Total Net Revenues",
            "USD",
            "Revenues",
        )]);
        let grid = StatementBuilder::new(&catalog, resolver()).build(&facts);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_label_collision_last_concept_wins() {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert(
            "Revenues",
            &Unit::usd(),
            vec![fy_fact(1_000_000.0, 2020), fy_fact(2_000_000.0, 2021)],
        );
        facts.insert(
            "RevenueFromContractWithCustomerExcludingAssessedTax",
            &Unit::usd(),
            vec![fy_fact(5_000_000.0, 2021)],
        );

        let catalog = catalog(vec![
            ConceptEntry::new("Revenues", "Revenue", "USD", "Revenues"),
            ConceptEntry::new(
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "Revenue",
                "USD",
                "Revenues",
            ),
        ]);
        let grid = StatementBuilder::new(&catalog, resolver()).build(&facts);

        // 2021 is overwritten by the later concept, 2020 keeps the earlier one
        let cell = grid.cell("Revenues", "Revenue", 2021).unwrap();
        assert_eq!(cell.value, 5.0);
        assert_eq!(
            cell.concept_id,
            "RevenueFromContractWithCustomerExcludingAssessedTax"
        );
        assert_eq!(grid.cell("Revenues", "Revenue", 2020).unwrap().concept_id, "Revenues");
    }

    #[test]
    fn test_duplicate_concept_uses_last_declaration() {
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("Broker", &Unit::usd(), vec![fy_fact(1_000_000.0, 2020)]);
        let catalog = catalog(vec![
            ConceptEntry::new("Broker", "Receivables from brokers", "USD", "Revenues"),
            ConceptEntry::new("Broker", "Deposits with clearing organizations", "USD", "Revenues"),
        ]);
        let grid = StatementBuilder::new(&catalog, resolver()).build(&facts);

        assert_eq!(grid.get("Revenues", "Receivables from brokers", 2020), None);
        assert_eq!(
            grid.get("Revenues", "Deposits with clearing organizations", 2020),
            Some(1.0)
        );
    }
}
