//! Run orchestration: filer lookup, cached fetch, analysis and output.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use statements_core::{
    Cik, CompanyFacts, DisclosureSource, FactsCache, Filer, FilerDirectory, Result, RunContext,
    StatementsError,
};
use statements_engine::{Analysis, Analyzer};

/// Fetches a filer's company facts and turns them into statements and ratios.
///
/// The source is required; the ticker directory is only needed when the run names its
/// filer by ticker, and the cache is optional.
///
/// # Example
///
/// ```rust,ignore
/// use statements::{Filer, Pipeline, RunContext, SqliteCache};
/// use std::sync::Arc;
///
/// let ctx = RunContext::new(Filer::ticker("MSFT"), "MyApp/1.0 (contact@example.com)");
/// let pipeline = Pipeline::edgar(&ctx.user_agent)?
///     .with_cache(Arc::new(SqliteCache::new("facts.db")?));
/// let report = pipeline.run(&ctx).await?;
/// ```
pub struct Pipeline {
    source: Arc<dyn DisclosureSource>,
    directory: Option<Arc<dyn FilerDirectory>>,
    cache: Option<Arc<dyn FactsCache>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("directory", &self.directory.as_ref().map(|_| "configured"))
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Filer the run was for.
    pub cik: Cik,
    /// Registered name of the filer, as the source reported it.
    pub entity_name: String,
    /// Statements, merged series and derived metrics.
    pub analysis: Analysis,
    /// Files written, statements first then the master analysis.
    pub written: Vec<PathBuf>,
}

impl Pipeline {
    /// Creates a pipeline reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DisclosureSource>) -> Self {
        Self {
            source,
            directory: None,
            cache: None,
        }
    }

    /// Creates a pipeline backed by SEC EDGAR for both facts and ticker lookup.
    ///
    /// # Errors
    /// Returns an error if the user agent is empty or the HTTP client cannot be built.
    #[cfg(feature = "edgar")]
    pub fn edgar(user_agent: &str) -> Result<Self> {
        let edgar = Arc::new(statements_edgar::EdgarSource::new(user_agent)?);
        Ok(Self::new(edgar.clone()).with_directory(edgar))
    }

    /// Sets the ticker directory.
    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn FilerDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Sets the facts cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn FactsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Resolves the run's filer to a CIK.
    ///
    /// # Errors
    /// Returns [`StatementsError::NotSupported`] for a ticker when no directory is
    /// configured, or the directory's error.
    pub async fn resolve_cik(&self, filer: &Filer) -> Result<Cik> {
        match filer {
            Filer::Cik(cik) => Ok(cik.clone()),
            Filer::Ticker(ticker) => {
                let directory = self.directory.as_ref().ok_or_else(|| {
                    StatementsError::NotSupported(format!(
                        "Cannot resolve ticker {ticker}: no filer directory configured"
                    ))
                })?;
                directory.lookup_cik(ticker).await
            }
        }
    }

    /// Returns the filer's facts, from the cache when present, otherwise from the
    /// source (and then stored in the cache).
    ///
    /// Cache failures are logged and never fail the fetch.
    ///
    /// # Errors
    /// Returns the source's error when the facts are not cached.
    #[instrument(skip(self, cik), fields(source = self.source.name(), cik = %cik))]
    pub async fn fetch_facts(&self, cik: &Cik, taxonomy: &str) -> Result<CompanyFacts> {
        let name = self.source.name();

        if let Some(cache) = &self.cache {
            match cache.get_facts(name, cik, taxonomy).await {
                Ok(Some(facts)) => {
                    debug!("Using cached company facts");
                    return Ok(facts);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to read facts cache"),
            }
        }

        let facts = self.source.company_facts(cik, taxonomy).await?;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.put_facts(name, cik, &facts).await
        {
            warn!(error = %e, "Failed to cache company facts");
        }
        Ok(facts)
    }

    /// Fetches and analyzes without writing anything.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the filer cannot be resolved
    /// or the facts cannot be fetched.
    pub async fn analyze(&self, ctx: &RunContext) -> Result<(Cik, CompanyFacts, Analysis)> {
        let analyzer = Analyzer::standard(ctx.config.clone())?;
        let cik = self.resolve_cik(&ctx.filer).await?;
        let facts = self.fetch_facts(&cik, &ctx.config.taxonomy).await?;
        let analysis = analyzer.run(&facts)?;
        Ok((cik, facts, analysis))
    }

    /// Runs the whole pipeline and writes the tables to the context's output directory.
    ///
    /// # Errors
    /// Returns an error from any stage; nothing is written when fetching fails.
    #[instrument(skip(self, ctx), fields(filer = %ctx.filer))]
    pub async fn run(&self, ctx: &RunContext) -> Result<RunReport> {
        let (cik, facts, analysis) = self.analyze(ctx).await?;
        let written = crate::output::write_analysis(&analysis, &cik, &ctx.output_dir)?;

        info!(
            %cik,
            entity = %facts.entity_name,
            years = analysis.merged.len(),
            "Run complete"
        );
        Ok(RunReport {
            cik,
            entity_name: facts.entity_name,
            analysis,
            written,
        })
    }
}
