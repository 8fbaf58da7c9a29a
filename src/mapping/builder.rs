// src/mapping/builder.rs
use arrow::{array::Array, record_batch::RecordBatch};
use tracing::{debug, info};

use crate::error::MappingError;
use crate::mapping::lookup::LabLookup;
use crate::table::{column_index, optional_column_index, string_column};

const LABS: &str = "labs";

/// Which columns of the labs table hold what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabColumns {
    /// Lab identifier, the lookup key.
    pub id: String,
    /// Lab display name. Only used to annotate logs; may be absent from the table.
    pub name: Option<String>,
    /// Company identifier, the lookup value.
    pub entreprise_id: String,
}

#[derive(Debug, Clone)]
pub struct MappingOutcome {
    pub lookup: LabLookup,
    pub warnings: Vec<String>,
}

/// Scan `labs` once and build the lab id → company id lookup.
///
/// - Rows with a null lab id are skipped with a warning.
/// - Keys and values are trimmed; a null company id maps to `""`.
/// - On a repeated key the first value is kept and a warning is recorded.
///
/// Fails before reading any row if one of the two required columns is missing.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(id = %columns.id, entreprise_id = %columns.entreprise_id, rows = labs.num_rows())
)]
pub fn build_mapping(
    labs: &RecordBatch,
    columns: &LabColumns,
) -> Result<MappingOutcome, MappingError> {
    let id_idx = column_index(labs, &columns.id, LABS)?;
    let entreprise_idx = column_index(labs, &columns.entreprise_id, LABS)?;
    let name_idx = optional_column_index(labs, columns.name.as_deref());

    let ids = string_column(labs, id_idx)?;
    let entreprises = string_column(labs, entreprise_idx)?;
    let names = name_idx.map(|idx| string_column(labs, idx)).transpose()?;

    let mut lookup = LabLookup::with_capacity(labs.num_rows());
    let mut warnings = Vec::new();

    for (row, (raw_id, raw_entreprise)) in ids.iter().zip(entreprises.iter()).enumerate() {
        let lab_name = names
            .as_ref()
            .and_then(|n| n.is_valid(row).then(|| n.value(row)));

        let Some(raw_id) = raw_id else {
            debug!(row, lab_name, "missing lab id");
            warnings.push(format!("row {}: missing lab id, skipped", row));
            continue;
        };

        let key = raw_id.trim();
        let value = raw_entreprise.map(str::trim).unwrap_or_default();
        if !lookup.insert_first(key, value) {
            debug!(row, key, lab_name, "duplicate lab id");
            warnings.push(format!("row {}: duplicate lab id '{}'", row, key));
        }
    }

    info!(entries = lookup.len(), warnings = warnings.len(), "mapping built");
    Ok(MappingOutcome { lookup, warnings })
}
