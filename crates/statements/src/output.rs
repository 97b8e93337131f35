//! CSV output of rendered statements and the master analysis.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use statements_core::{Cik, Result, StatementsError, master_file_name};
use statements_engine::{Analysis, StatementTable};
use tracing::{debug, info};

fn output_err(path: &Path, e: impl std::fmt::Display) -> StatementsError {
    StatementsError::Output(format!("{}: {e}", path.display()))
}

/// Writes a frame as CSV with a header row.
///
/// Nulls are written as empty cells and `NaN` as `NaN`.
///
/// # Errors
/// Returns [`StatementsError::Output`] if the file cannot be created or written.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| output_err(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| output_err(path, e))?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "Wrote CSV");
    Ok(())
}

/// Writes one statement to `dir` under its suggested file name.
///
/// # Errors
/// Returns [`StatementsError::Output`] if the frame cannot be built or written.
pub fn write_statement(table: &StatementTable, cik: &Cik, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(table.kind().suggested_file_name(cik));
    let mut df = table.to_dataframe().map_err(|e| output_err(&path, e))?;
    write_csv(&mut df, &path)?;
    Ok(path)
}

/// Writes every statement and the master analysis to `dir`, creating it if needed.
///
/// Returns the written paths, statements first in merge order.
///
/// # Errors
/// Returns [`StatementsError::Output`] on any file system or frame error.
pub fn write_analysis(analysis: &Analysis, cik: &Cik, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| output_err(dir, e))?;

    let mut written = Vec::with_capacity(analysis.statements.len() + 1);
    for table in &analysis.statements {
        written.push(write_statement(table, cik, dir)?);
    }

    let path = dir.join(master_file_name(cik));
    let mut master = analysis
        .master_dataframe()
        .map_err(|e| output_err(&path, e))?;
    write_csv(&mut master, &path)?;
    written.push(path);

    info!(%cik, dir = %dir.display(), files = written.len(), "Wrote analysis");
    Ok(written)
}
