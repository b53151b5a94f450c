//! CSV input and output.

use std::{fs::File, path::Path};

use polars::prelude::*;
use tracing::debug;

/// Read a CSV file with every column as text.
///
/// The normalizers type each column, so identifiers keep their leading zeros.
pub(crate) fn read_text_csv(path: &Path) -> PolarsResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!(path = %path.display(), rows = df.height(), "read csv");
    Ok(df)
}

/// Write `df` as CSV, replacing any existing file.
pub(crate) fn write_csv(df: &DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    let mut out = df.clone();
    CsvWriter::new(&mut file).include_header(true).finish(&mut out)?;
    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}
