// src/mapping/enrich.rs
use arrow::{
    array::{Array, StringArray},
    record_batch::RecordBatch,
};
use tracing::{debug, info};

use crate::error::MappingError;
use crate::mapping::lookup::LabLookup;
use crate::table::{column_index, optional_column_index, replace_column, string_column};

const PRODUCTS: &str = "products";

/// Which columns of the products table hold what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductColumns {
    /// Product identifier. Only used to annotate logs; may be absent from the table.
    pub id: Option<String>,
    /// Column overwritten with the resolved company id.
    pub entreprise: String,
    /// Column holding the lab id to resolve.
    pub lab_id: String,
}

#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    pub table: RecordBatch,
    pub errors: Vec<String>,
}

/// Returns a copy of `products` whose `entreprise` column is resolved through `lookup`.
///
/// Null lab ids resolve to null silently. Lab ids missing from the lookup resolve
/// to null and record an error. Rows keep their count and order; no other column
/// changes.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(entreprise = %columns.entreprise, lab_id = %columns.lab_id, rows = products.num_rows())
)]
pub fn apply_mapping(
    products: &RecordBatch,
    columns: &ProductColumns,
    lookup: &LabLookup,
) -> Result<EnrichOutcome, MappingError> {
    let target_idx = column_index(products, &columns.entreprise, PRODUCTS)?;
    let lab_idx = column_index(products, &columns.lab_id, PRODUCTS)?;
    let id_idx = optional_column_index(products, columns.id.as_deref());

    let lab_ids = string_column(products, lab_idx)?;
    let product_ids = id_idx.map(|idx| string_column(products, idx)).transpose()?;

    let mut errors = Vec::new();
    let mut matched = 0usize;
    let resolved: StringArray = lab_ids
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let key = raw?.trim();
            match lookup.get(key) {
                Some(entreprise) => {
                    matched += 1;
                    Some(entreprise)
                }
                None => {
                    let product = product_ids
                        .as_ref()
                        .and_then(|p| p.is_valid(row).then(|| p.value(row)));
                    debug!(row, key, product, "unmatched lab id");
                    errors.push(format!("unmatched lab id '{}'", key));
                    None
                }
            }
        })
        .collect();

    let table = replace_column(products, target_idx, resolved)?;
    info!(
        matched,
        unmatched = errors.len(),
        unlinked = table.num_rows() - matched - errors.len(),
        "mapping applied"
    );
    Ok(EnrichOutcome { table, errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::init_test_logging;
    use crate::table::utf8_batch;

    fn columns() -> ProductColumns {
        ProductColumns {
            id: Some("prodId".into()),
            entreprise: "ent".into(),
            lab_id: "lab".into(),
        }
    }

    fn lookup() -> LabLookup {
        vec![("L1", "E1"), ("L2", "E2"), ("L4", "")].into_iter().collect()
    }

    fn entreprise(table: &RecordBatch) -> Vec<Option<String>> {
        let idx = table.schema().index_of("ent").unwrap();
        table
            .column(idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    fn products() -> RecordBatch {
        utf8_batch(&[
            ("prodId", vec![Some("P1"), Some("P2"), Some("P3")]),
            ("lab", vec![Some("L1"), Some("L3"), None]),
            ("ent", vec![Some(""), Some(""), Some("")]),
        ])
    }

    #[test]
    fn test_example_scenario() {
        init_test_logging();
        let outcome = apply_mapping(&products(), &columns(), &lookup()).unwrap();

        assert_eq!(entreprise(&outcome.table), vec![Some("E1".to_string()), None, None]);
        assert_eq!(outcome.errors, vec!["unmatched lab id 'L3'"]);
    }

    #[test]
    fn test_only_target_column_changes() {
        let input = products();
        let outcome = apply_mapping(&input, &columns(), &lookup()).unwrap();

        assert_eq!(outcome.table.num_rows(), input.num_rows());
        assert_eq!(outcome.table.schema().fields().len(), 3);
        assert_eq!(outcome.table.column(0), input.column(0));
        assert_eq!(outcome.table.column(1), input.column(1));
        // input left as it was
        assert_eq!(
            entreprise(&input),
            vec![Some(String::new()), Some(String::new()), Some(String::new())]
        );
    }

    #[test]
    fn test_null_lab_id_resolves_to_null_without_error() {
        let input = utf8_batch(&[("lab", vec![None, None]), ("ent", vec![Some("x"), None])]);
        let outcome = apply_mapping(&input, &columns(), &lookup()).unwrap();
        assert_eq!(entreprise(&outcome.table), vec![None, None]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_empty_company_value_is_kept_exactly() {
        let input = utf8_batch(&[("lab", vec![Some(" L4 ")]), ("ent", vec![None])]);
        let outcome = apply_mapping(&input, &columns(), &lookup()).unwrap();
        assert_eq!(entreprise(&outcome.table), vec![Some(String::new())]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_every_unmatched_row_reports_an_error() {
        let input = utf8_batch(&[
            ("lab", vec![Some("X"), Some("L2"), Some(" X")]),
            ("ent", vec![None, None, None]),
        ]);
        let outcome = apply_mapping(&input, &columns(), &lookup()).unwrap();
        assert_eq!(
            entreprise(&outcome.table),
            vec![None, Some("E2".to_string()), None]
        );
        assert_eq!(
            outcome.errors,
            vec!["unmatched lab id 'X'", "unmatched lab id 'X'"]
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let once = apply_mapping(&products(), &columns(), &lookup()).unwrap();
        let twice = apply_mapping(&once.table, &columns(), &lookup()).unwrap();
        assert_eq!(once.table, twice.table);
        assert_eq!(once.errors, twice.errors);
    }

    #[test]
    fn test_missing_columns_are_fatal() {
        let input = utf8_batch(&[("lab", vec![Some("L1")])]);
        match apply_mapping(&input, &columns(), &lookup()) {
            Err(MappingError::ColumnNotFound { column, table }) => {
                assert_eq!(column, "ent");
                assert_eq!(table, "products");
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.errors)),
        }

        let input = utf8_batch(&[("ent", vec![Some("E1")])]);
        assert!(matches!(
            apply_mapping(&input, &columns(), &lookup()),
            Err(MappingError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_from_any_source() {
        let lookup: LabLookup = std::collections::HashMap::from([(
            "L3".to_string(),
            "E3".to_string(),
        )])
        .into();
        let outcome = apply_mapping(&products(), &columns(), &lookup).unwrap();
        assert_eq!(
            entreprise(&outcome.table),
            vec![None, Some("E3".to_string()), None]
        );
        assert_eq!(outcome.errors, vec!["unmatched lab id 'L1'"]);
    }
}
