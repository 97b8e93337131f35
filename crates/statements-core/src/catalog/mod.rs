//! Concept catalogs.
//!
//! A [`ConceptCatalog`] maps disclosure concept ids to a display label, the unit the
//! value is expected in, and the statement category the line belongs to. It is an
//! ordered list of declarations rather than a keyed table:
//!
//! - A concept id may be declared more than once. The **last** declaration is the one
//!   that counts; earlier ones are ignored by [`lookup`](ConceptCatalog::lookup) and
//!   [`effective_entries`](ConceptCatalog::effective_entries). The surviving
//!   declaration also keeps its own position, so a redeclared concept is processed
//!   where it was last declared, not where it first appeared.
//! - Several concepts may share a label. Their resolved values land in the same output
//!   cell, and the concept processed last (in declaration order) wins each year it has
//!   a value for.
//!
//! The standard US-GAAP catalogs for the three statements are available through
//! [`ConceptCatalog::standard`].

mod balance_sheet;
mod cash_flow;
mod income_statement;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, StatementsError};
use crate::types::{StatementKind, Unit};

/// One catalog declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptEntry {
    /// Concept id in the disclosure taxonomy (e.g. `AssetsCurrent`).
    pub concept_id: String,
    /// Row label in the rendered statement.
    pub label: String,
    /// Unit the facts are expected in.
    pub unit: Unit,
    /// Statement category (section) the row belongs to.
    pub category: String,
}

impl ConceptEntry {
    /// Creates a catalog entry.
    #[must_use]
    pub fn new(
        concept_id: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<Unit>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            concept_id: concept_id.into(),
            label: label.into(),
            unit: unit.into(),
            category: category.into(),
        }
    }
}

/// Ordered concept catalog for one statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCatalog {
    kind: StatementKind,
    categories: Vec<String>,
    entries: Vec<ConceptEntry>,
}

impl ConceptCatalog {
    /// Creates a catalog from its category display order and its declarations.
    ///
    /// # Errors
    /// Returns [`StatementsError::Catalog`] if a category is listed twice, an entry has
    /// an empty concept id or label, or an entry names a category that is not listed.
    pub fn new(
        kind: StatementKind,
        categories: Vec<String>,
        entries: Vec<ConceptEntry>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.as_str()) {
                return Err(StatementsError::Catalog(format!(
                    "{kind}: category {category:?} listed twice"
                )));
            }
        }
        for entry in &entries {
            if entry.concept_id.is_empty() || entry.label.is_empty() {
                return Err(StatementsError::Catalog(format!(
                    "{kind}: entry with empty concept id or label: {entry:?}"
                )));
            }
            if !seen.contains(entry.category.as_str()) {
                return Err(StatementsError::Catalog(format!(
                    "{kind}: concept {} uses unknown category {:?}",
                    entry.concept_id, entry.category
                )));
            }
        }
        Ok(Self {
            kind,
            categories,
            entries,
        })
    }

    /// Returns the standard US-GAAP catalog for a statement.
    #[must_use]
    pub fn standard(kind: StatementKind) -> Self {
        let (categories, entries) = match kind {
            StatementKind::BalanceSheet => (balance_sheet::CATEGORIES, balance_sheet::ENTRIES),
            StatementKind::IncomeStatement => {
                (income_statement::CATEGORIES, income_statement::ENTRIES)
            }
            StatementKind::CashFlow => (cash_flow::CATEGORIES, cash_flow::ENTRIES),
        };
        Self {
            kind,
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            entries: entries
                .iter()
                .map(|(id, label, unit, category)| ConceptEntry::new(*id, *label, *unit, *category))
                .collect(),
        }
    }

    /// Statement this catalog describes.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Every declaration, in order, including superseded duplicates.
    #[must_use]
    pub fn entries(&self) -> &[ConceptEntry] {
        &self.entries
    }

    /// Looks up a concept. When the concept is declared more than once, the last
    /// declaration is returned.
    #[must_use]
    pub fn lookup(&self, concept_id: &str) -> Option<&ConceptEntry> {
        self.entries.iter().rev().find(|e| e.concept_id == concept_id)
    }

    /// Declarations that are in effect, in declaration order: each concept id appears
    /// once, at the position of its last declaration.
    pub fn effective_entries(&self) -> impl Iterator<Item = &ConceptEntry> {
        let mut last: HashMap<&str, usize> = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            last.insert(entry.concept_id.as_str(), i);
        }
        self.entries
            .iter()
            .enumerate()
            .filter(move |(i, e)| last.get(e.concept_id.as_str()) == Some(i))
            .map(|(_, e)| e)
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: Vec<ConceptEntry>) -> ConceptCatalog {
        ConceptCatalog::new(
            StatementKind::CashFlow,
            vec!["Operating".to_string(), "Financing".to_string()],
            entries,
        )
        .unwrap()
    }

    #[test]
    fn test_standard_catalogs_are_consistent() {
        for kind in StatementKind::ALL {
            let standard = ConceptCatalog::standard(kind);
            let rebuilt = ConceptCatalog::new(
                kind,
                standard.categories().to_vec(),
                standard.entries().to_vec(),
            );
            assert!(rebuilt.is_ok(), "{kind}: {rebuilt:?}");
            assert!(!standard.is_empty());
            assert_eq!(standard.kind(), kind);
        }
    }

    #[test]
    fn test_standard_catalogs_have_no_duplicate_concepts() {
        for kind in StatementKind::ALL {
            let standard = ConceptCatalog::standard(kind);
            assert_eq!(standard.effective_entries().count(), standard.len(), "{kind}");
        }
    }

    #[test]
    fn test_lookup_last_declaration_wins() {
        let catalog = catalog(vec![
            ConceptEntry::new("Broker", "Receivables from brokers", "USD", "Operating"),
            ConceptEntry::new("Debt", "Debt issued", "USD", "Financing"),
            ConceptEntry::new("Broker", "Deposits with clearing organizations", "USD", "Operating"),
        ]);

        assert_eq!(
            catalog.lookup("Broker").unwrap().label,
            "Deposits with clearing organizations"
        );
        assert!(catalog.lookup("Missing").is_none());

        let effective: Vec<&str> = catalog
            .effective_entries()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(
            effective,
            vec!["Debt issued", "Deposits with clearing organizations"]
        );
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = ConceptCatalog::new(
            StatementKind::BalanceSheet,
            vec!["Equity".to_string()],
            vec![ConceptEntry::new("Assets", "Total assets", "USD", "Assets")],
        );
        assert!(matches!(result, Err(StatementsError::Catalog(_))));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = ConceptCatalog::new(
            StatementKind::BalanceSheet,
            vec!["Equity".to_string(), "Equity".to_string()],
            Vec::new(),
        );
        assert!(result.is_err());
    }
}
