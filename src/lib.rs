pub mod config;
pub mod error;
pub mod mapping;
pub mod report;
pub mod table;

pub use error::MappingError;
pub use mapping::{
    apply_mapping, build_mapping, enrich_products, Diagnostics, LabColumns, LabLookup,
    ProductColumns,
};
