// src/table/mod.rs
pub mod read;
pub mod sniff;
pub mod write;

pub use read::{parse_csv_bytes, read_csv_table};
pub use sniff::sniff_delimiter;
pub use write::{csv_bytes, write_csv_table};

use crate::error::MappingError;
use arrow::{
    array::{Array, ArrayRef, StringArray},
    compute::cast,
    datatypes::{DataType, Field, FieldRef, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Position of `column` in `batch`, or `ColumnNotFound` naming which `table` was searched.
pub fn column_index(
    batch: &RecordBatch,
    column: &str,
    table: &'static str,
) -> Result<usize, MappingError> {
    batch
        .schema()
        .column_with_name(column)
        .map(|(idx, _)| idx)
        .ok_or_else(|| MappingError::ColumnNotFound {
            column: column.to_string(),
            table,
        })
}

/// Like [`column_index`] but for columns that are allowed to be missing.
pub fn optional_column_index(batch: &RecordBatch, column: Option<&str>) -> Option<usize> {
    let column = column?;
    batch.schema().column_with_name(column).map(|(idx, _)| idx)
}

/// String form of every cell in column `idx`. Nulls stay null.
pub fn string_column(batch: &RecordBatch, idx: usize) -> Result<StringArray, MappingError> {
    let casted = cast(batch.column(idx), &DataType::Utf8)?;
    let strings = casted
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| {
            ArrowError::CastError(format!(
                "column #{} did not cast to Utf8 (got {})",
                idx,
                casted.data_type()
            ))
        })?;
    Ok(strings.clone())
}

/// Returns a copy of `batch` whose column `idx` is `values`, retyped as nullable Utf8.
/// Every other column, the column order and the schema metadata are kept.
pub fn replace_column(
    batch: &RecordBatch,
    idx: usize,
    values: StringArray,
) -> Result<RecordBatch, MappingError> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let retyped = Field::new(fields[idx].name().clone(), DataType::Utf8, true)
        .with_metadata(fields[idx].metadata().clone());
    fields[idx] = Arc::new(retyped);

    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    columns[idx] = Arc::new(values);

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

/// Builds an all-Utf8 batch from `(name, cells)` pairs. Every field is nullable,
/// the same schema [`read_csv_table`] produces.
#[cfg(test)]
pub(crate) fn utf8_batch(columns: &[(&str, Vec<Option<&str>>)]) -> RecordBatch {
    RecordBatch::try_from_iter_with_nullable(columns.iter().map(|(name, cells)| {
        (
            name.to_string(),
            Arc::new(StringArray::from(cells.clone())) as ArrayRef,
            true,
        )
    }))
    .unwrap()
}
