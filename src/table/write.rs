use anyhow::{Context, Result};
use arrow::{csv::WriterBuilder, record_batch::RecordBatch};
use std::{fs, path::Path};
use tracing::instrument;

/// Serialize `batch` as UTF-8 delimited text: header row first, nulls as empty
/// fields, quoting only where needed.
pub fn csv_bytes(batch: &RecordBatch, delimiter: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_delimiter(delimiter)
        .build(&mut buf);
    writer.write(batch).context("writing CSV batch")?;
    drop(writer);
    Ok(buf)
}

#[instrument(
    level = "info",
    skip(batch, path),
    fields(path = %path.as_ref().display(), rows = batch.num_rows())
)]
pub fn write_csv_table<P: AsRef<Path>>(
    batch: &RecordBatch,
    path: P,
    delimiter: u8,
) -> Result<()> {
    let bytes = csv_bytes(batch, delimiter)?;
    fs::write(&path, bytes)
        .with_context(|| format!("Failed to write CSV file: {:?}", path.as_ref()))?;
    Ok(())
}
