//! End-to-end analysis of one company's facts.
//!
//! [`Analyzer`] runs the three statement catalogs through the resolver and builder,
//! renders each grid, merges the tables and evaluates the ratio set.

use polars::prelude::*;
use statements_core::{
    AnalysisConfig, CompanyFacts, ConceptCatalog, Result, StatementKind, StatementsError,
};
use tracing::{info, instrument};

use crate::builder::StatementBuilder;
use crate::merge::MergedSeries;
use crate::ratios::{DerivedMetrics, MetricValue, RatioEngine};
use crate::render::StatementTable;
use crate::resolver::FactResolver;

/// Runs the full statement pipeline over in-memory facts.
#[derive(Clone, Debug)]
pub struct Analyzer {
    catalogs: Vec<ConceptCatalog>,
    config: AnalysisConfig,
    ratios: RatioEngine,
}

impl Analyzer {
    /// Creates an analyzer over `catalogs`, processed and merged in the order given.
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] if the configuration is invalid.
    pub fn new(catalogs: Vec<ConceptCatalog>, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let ratios = RatioEngine::standard(&config.stress_haircuts);
        Ok(Self {
            catalogs,
            config,
            ratios,
        })
    }

    /// Analyzer over the standard catalogs in merge order (income statement, balance
    /// sheet, cash flow).
    ///
    /// # Errors
    /// Returns [`StatementsError::InvalidParameter`] if the configuration is invalid.
    pub fn standard(config: AnalysisConfig) -> Result<Self> {
        let catalogs = StatementKind::ALL
            .iter()
            .map(|kind| ConceptCatalog::standard(*kind))
            .collect();
        Self::new(catalogs, config)
    }

    /// Replaces the ratio set.
    #[must_use]
    pub fn with_ratios(mut self, ratios: RatioEngine) -> Self {
        self.ratios = ratios;
        self
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Builds, renders, merges and evaluates.
    ///
    /// # Errors
    /// Returns [`StatementsError::DataNotAvailable`] if `facts` belong to another
    /// taxonomy than the configured one.
    #[instrument(skip(self, facts), fields(taxonomy = %facts.taxonomy, concepts = facts.len()))]
    pub fn run(&self, facts: &CompanyFacts) -> Result<Analysis> {
        if facts.taxonomy != self.config.taxonomy {
            return Err(StatementsError::DataNotAvailable {
                cik: facts
                    .cik
                    .as_ref()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
                taxonomy: self.config.taxonomy.clone(),
            });
        }

        let resolver = FactResolver::new(self.config.year_range);
        let statements: Vec<StatementTable> = self
            .catalogs
            .iter()
            .map(|catalog| {
                let grid = StatementBuilder::new(catalog, resolver).build(facts);
                let table = StatementTable::render(&grid, catalog.categories());
                info!(
                    statement = %catalog.kind(),
                    years = table.years().len(),
                    lines = table.lines().count(),
                    "Statement built"
                );
                table
            })
            .collect();

        let merged = MergedSeries::merge(&statements);
        let derived = self.ratios.evaluate(&merged);

        Ok(Analysis {
            statements,
            merged,
            derived,
        })
    }
}

/// Output of one analysis run.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Rendered statements in merge order.
    pub statements: Vec<StatementTable>,
    /// Merged series.
    pub merged: MergedSeries,
    /// Derived metrics.
    pub derived: DerivedMetrics,
}

impl Analysis {
    /// Rendered statement of `kind`, if it was part of the run.
    #[must_use]
    pub fn statement(&self, kind: StatementKind) -> Option<&StatementTable> {
        self.statements.iter().find(|t| t.kind() == kind)
    }

    /// Merged series followed by the derived metric columns.
    ///
    /// Undefined metrics are `NaN`; absent ones are null.
    ///
    /// # Errors
    /// Returns an error if polars rejects the columns.
    pub fn master_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut df = self.merged.to_dataframe()?;
        for name in self.derived.names() {
            let values: Vec<Option<f64>> = self
                .merged
                .years()
                .map(|year| self.derived.get(year, name).and_then(MetricValue::to_cell))
                .collect();
            df.with_column(Column::new(name.as_str().into(), values))?;
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios;
    use approx::assert_relative_eq;
    use statements_core::{RawFact, Unit, YearRange};

    fn annual(value: f64, fy: i32) -> RawFact {
        RawFact::new(value, "10-K")
            .with_fiscal_year(fy)
            .with_period(Some(format!("{fy}-01-01").as_str()), &format!("{fy}-12-31"))
    }

    fn instant(value: f64, fy: i32) -> RawFact {
        RawFact::new(value, "10-K")
            .with_fiscal_year(fy)
            .with_period(None, &format!("{fy}-12-31"))
    }

    fn sample_facts() -> CompanyFacts {
        let usd = Unit::usd();
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("Revenues", &usd, vec![annual(200e6, 2021), annual(250e6, 2022)]);
        facts.insert("NetIncomeLoss", &usd, vec![annual(20e6, 2021), annual(50e6, 2022)]);
        facts.insert("Assets", &usd, vec![instant(1_000e6, 2022)]);
        facts.insert("AssetsCurrent", &usd, vec![instant(300e6, 2022)]);
        facts.insert("LiabilitiesCurrent", &usd, vec![instant(150e6, 2022)]);
        facts.insert("StockholdersEquity", &usd, vec![instant(500e6, 2022)]);
        facts.insert(
            "NetCashProvidedByUsedInOperatingActivities",
            &usd,
            vec![annual(80e6, 2022)],
        );
        facts.insert(
            "CapitalExpenditures",
            &usd,
            vec![annual(30e6, 2022)],
        );
        facts
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default().with_year_range(YearRange::new(2014, 2025).unwrap())
    }

    #[test]
    fn test_ratio_inputs_match_standard_labels() {
        let columns: Vec<String> = StatementKind::ALL
            .iter()
            .flat_map(|kind| {
                let catalog = ConceptCatalog::standard(*kind);
                catalog
                    .entries()
                    .iter()
                    .map(|e| format!("{}_{}", kind.code(), e.label))
                    .collect::<Vec<_>>()
            })
            .collect();
        for input in [
            ratios::NET_INCOME,
            ratios::REVENUE,
            ratios::TOTAL_ASSETS,
            ratios::CURRENT_ASSETS,
            ratios::CURRENT_LIABILITIES,
            ratios::CASH,
            ratios::RECEIVABLES,
            ratios::SECURITIES,
            ratios::LONG_TERM_DEBT,
            ratios::EQUITY,
            ratios::OPERATING_CASH_FLOW,
            ratios::CAPEX,
        ] {
            assert!(columns.iter().any(|c| c == input), "{input} has no catalog label");
        }
    }

    #[test]
    fn test_run_end_to_end() {
        let analyzer = Analyzer::standard(config()).unwrap();
        let analysis = analyzer.run(&sample_facts()).unwrap();

        assert_eq!(analysis.statements.len(), 3);
        let income = analysis.statement(StatementKind::IncomeStatement).unwrap();
        assert_eq!(income.years(), &[2021, 2022]);

        assert_eq!(analysis.merged.years().collect::<Vec<_>>(), vec![2021, 2022]);

        let margin = analysis.derived.get(2022, "Calc_Net_Margin").unwrap().value().unwrap();
        assert_relative_eq!(margin, 0.2);
        let current = analysis.derived.get(2022, "Calc_Current_Ratio").unwrap().value().unwrap();
        assert_relative_eq!(current, 2.0);
        let fcf = analysis.derived.get(2022, "Calc_FCF").unwrap().value().unwrap();
        assert_relative_eq!(fcf, 50.0);
        // 2021 has no balance sheet values
        assert_eq!(
            analysis.derived.get(2021, "Calc_Current_Ratio"),
            Some(MetricValue::Absent)
        );
    }

    #[test]
    fn test_master_dataframe_layout() {
        let analysis = Analyzer::standard(config())
            .unwrap()
            .run(&sample_facts())
            .unwrap();
        let df = analysis.master_dataframe().unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names[0], "Year");
        assert!(names.iter().any(|n| n == "Calc_Stress_Quick_15pct"));
        assert_eq!(names.last().map(String::as_str), Some("Calc_FCF"));
    }

    #[test]
    fn test_undefined_ratio_is_nan_in_master() {
        let usd = Unit::usd();
        let mut facts = CompanyFacts::new("us-gaap");
        facts.insert("AssetsCurrent", &usd, vec![instant(10e6, 2020)]);
        facts.insert("LiabilitiesCurrent", &usd, vec![instant(0.0, 2020)]);

        let analysis = Analyzer::standard(config()).unwrap().run(&facts).unwrap();
        let df = analysis.master_dataframe().unwrap();
        let current = df.column("Calc_Current_Ratio").unwrap().f64().unwrap().get(0);
        assert!(current.is_some_and(f64::is_nan));
    }

    #[test]
    fn test_wrong_taxonomy_rejected() {
        let analyzer = Analyzer::standard(config()).unwrap();
        let facts = CompanyFacts::new("ifrs-full");
        assert!(matches!(
            analyzer.run(&facts),
            Err(StatementsError::DataNotAvailable { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig::default().with_stress_haircuts(vec![1.5]);
        assert!(Analyzer::standard(config).is_err());
    }
}
