// src/mapping/mod.rs
pub mod builder;
pub mod diagnostics;
pub mod enrich;
pub mod lookup;

pub use builder::{build_mapping, LabColumns, MappingOutcome};
pub use diagnostics::Diagnostics;
pub use enrich::{apply_mapping, EnrichOutcome, ProductColumns};
pub use lookup::LabLookup;

use crate::error::MappingError;
use arrow::record_batch::RecordBatch;

/// Build the lookup from `labs` and apply it to `products` in one go.
///
/// Returns the enriched products table and the diagnostics of both passes,
/// labs warnings first. The lookup is dropped at the end of the call.
pub fn enrich_products(
    labs: &RecordBatch,
    lab_columns: &LabColumns,
    products: &RecordBatch,
    product_columns: &ProductColumns,
) -> Result<(RecordBatch, Diagnostics), MappingError> {
    let mapping = build_mapping(labs, lab_columns)?;
    let enriched = apply_mapping(products, product_columns, &mapping.lookup)?;
    Ok((
        enriched.table,
        Diagnostics::new(mapping.warnings, enriched.errors),
    ))
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,labmap::mapping=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
