// src/table/read.rs
use anyhow::{bail, Context, Result};
use arrow::{
    array::{ArrayRef, StringBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use csv::{ReaderBuilder, StringRecord};
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tracing::{debug, info};

use super::sniff::sniff_delimiter;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field values read as null, besides the empty field. Matched exactly, no trimming.
const NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(value: &str) -> bool {
    value.is_empty() || NA_VALUES.contains(&value)
}

/// Load a whole delimited text file as a table of nullable Utf8 columns.
///
/// - The delimiter is detected from the content (see [`sniff_delimiter`]).
/// - The first record is the header; empty fields and the usual missing-value
///   markers (`NA`, `N/A`, `NULL`, `nan`, `None`, …) become nulls.
/// - Short records are padded with nulls, long records are an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_csv_table<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let bytes = fs::read(&path)
        .with_context(|| format!("Failed to read CSV file: {:?}", path.as_ref()))?;
    let table = parse_csv_bytes(&bytes)
        .with_context(|| format!("Failed to parse CSV file: {:?}", path.as_ref()))?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded table"
    );
    Ok(table)
}

/// In-memory counterpart of [`read_csv_table`].
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<RecordBatch> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).context("CSV content is not valid UTF-8")?;

    let delimiter = sniff_delimiter(text);
    debug!(delimiter = %(delimiter as char).escape_default(), "detected delimiter");

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // short records are padded below
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut records = rdr.records();

    let header = match records.next() {
        Some(result) => result.context("CSV parse error in header row")?,
        None => bail!("CSV content has no header row"),
    };
    let headers = disambiguate_headers(&header);
    let width = headers.len();

    let mut builders: Vec<StringBuilder> = (0..width).map(|_| StringBuilder::new()).collect();
    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        if record.len() > width {
            bail!(
                "record {} has {} fields but the header has {}",
                idx,
                record.len(),
                width
            );
        }
        for (col, builder) in builders.iter_mut().enumerate() {
            match record.get(col) {
                Some(value) if !is_na(value) => builder.append_value(value),
                _ => builder.append_null(),
            }
        }
    }

    let fields: Vec<Field> = headers
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let columns: Vec<ArrayRef> = builders
        .iter_mut()
        .map(|b| Arc::new(b.finish()) as ArrayRef)
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("building table from CSV records")
}

/// Blank names become `Unnamed: {i}`, repeated names get `.1`, `.2`, … suffixes.
fn disambiguate_headers(header: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());
    for (i, raw) in header.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {}", i)
        } else {
            raw.to_string()
        };
        let mut name = base.clone();
        while let Some(n) = seen.get_mut(&name) {
            *n += 1;
            name = format!("{}.{}", base, n);
        }
        seen.insert(name.clone(), 0);
        names.push(name);
    }
    names
}
