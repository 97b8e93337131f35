//! Statements CLI binary.
//!
//! Builds annual statements and ratios for one SEC filer and writes them as CSV.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgGroup, Parser, Subcommand};
use statements::{
    AnalysisConfig, Cik, ConceptCatalog, FactsCache, Filer, MetricValue, Pipeline, RunContext,
    SqliteCache, StatementKind, YearRange,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "statements")]
#[command(about = "Annual financial statements and ratios from SEC XBRL company facts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the three statements and the master analysis for one filer
    #[command(group(ArgGroup::new("filer").required(true).args(["cik", "ticker"])))]
    Run {
        /// Central Index Key of the filer
        #[arg(long)]
        cik: Option<String>,

        /// Ticker symbol of the filer
        #[arg(long)]
        ticker: Option<String>,

        /// Identifying user agent sent to SEC EDGAR, e.g. "AppName/1.0 (contact@example.com)"
        #[arg(long)]
        user_agent: String,

        /// JSON file with analysis parameters; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// First fiscal year considered
        #[arg(long)]
        from: Option<i32>,

        /// Last fiscal year considered
        #[arg(long)]
        to: Option<i32>,

        /// Stress haircut on marketable securities, as a fraction (repeatable)
        #[arg(long = "haircut")]
        haircuts: Vec<f64>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// SQLite file caching fetched company facts
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Drop cached facts older than this many hours before fetching
        #[arg(long, requires = "cache")]
        cache_ttl_hours: Option<u64>,
    },

    /// List the concepts of a standard catalog
    Catalog {
        /// Statement: balance-sheet, income-statement or cash-flow
        kind: StatementKind,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            cik,
            ticker,
            user_agent,
            config,
            from,
            to,
            haircuts,
            out,
            cache,
            cache_ttl_hours,
        } => {
            let filer = match (cik, ticker) {
                (Some(cik), _) => Filer::Cik(Cik::new(&cik)?),
                (None, Some(ticker)) => Filer::ticker(ticker),
                (None, None) => bail!("either --cik or --ticker is required"),
            };
            let config = analysis_config(config, from, to, haircuts)?;
            let ctx = RunContext::new(filer, user_agent)
                .with_config(config)
                .with_output_dir(out);
            run(&ctx, cache, cache_ttl_hours).await?;
        }
        Commands::Catalog { kind } => print_catalog(kind),
    }

    Ok(())
}

fn analysis_config(
    path: Option<PathBuf>,
    from: Option<i32>,
    to: Option<i32>,
    haircuts: Vec<f64>,
) -> anyhow::Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_json_file(&path)?,
        None => AnalysisConfig::default(),
    };
    if from.is_some() || to.is_some() {
        let range = YearRange::new(
            from.unwrap_or(config.year_range.min),
            to.unwrap_or(config.year_range.max),
        )?;
        config = config.with_year_range(range);
    }
    if !haircuts.is_empty() {
        config = config.with_stress_haircuts(haircuts);
    }
    config.validate()?;
    Ok(config)
}

async fn run(
    ctx: &RunContext,
    cache_path: Option<PathBuf>,
    cache_ttl_hours: Option<u64>,
) -> anyhow::Result<()> {
    let mut pipeline = Pipeline::edgar(&ctx.user_agent)?;
    if let Some(path) = cache_path {
        let cache = SqliteCache::new(&path)
            .with_context(|| format!("opening cache {}", path.display()))?;
        if let Some(hours) = cache_ttl_hours {
            let removed = cache
                .invalidate_stale(Duration::from_secs(hours * 3600))
                .await?;
            info!(removed, "Pruned facts cache");
        }
        pipeline = pipeline.with_cache(Arc::new(cache));
    }

    let report = pipeline.run(ctx).await?;

    println!("\n{} (CIK {})", report.entity_name, report.cik);
    let derived = &report.analysis.derived;
    print!("{:<28}", "Metric");
    let years: Vec<i32> = report.analysis.merged.years().collect();
    for year in &years {
        print!("{year:>12}");
    }
    println!();
    for name in derived.names() {
        print!("{name:<28}");
        for year in &years {
            let cell = match derived.get(*year, name) {
                Some(MetricValue::Value(v)) => format!("{v:.3}"),
                Some(MetricValue::Undefined) => "n/a".to_string(),
                Some(MetricValue::Absent) | None => "-".to_string(),
            };
            print!("{cell:>12}");
        }
        println!();
    }

    println!();
    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_catalog(kind: StatementKind) {
    let catalog = ConceptCatalog::standard(kind);
    println!("{} ({} concepts)", kind.title(), catalog.len());
    for category in catalog.categories() {
        println!("\n{category}");
        for entry in catalog
            .effective_entries()
            .filter(|e| &e.category == category)
        {
            println!("  {:<70} {:<8} {}", entry.concept_id, entry.unit.as_str(), entry.label);
        }
    }
}
