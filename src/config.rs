// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::mapping::{LabColumns, ProductColumns};

/// Column selection and output path, as read from a YAML file.
///
/// ```yaml
/// labs: { id: ID_LABO, name: NOM_LABO, entreprise_id: ID_ENTREPRISE }
/// products: { id: ID_PRODUIT, entreprise: ENTREPRISE, lab_id: ID_LABO }
/// output: produits_mis_a_jour.csv
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub labs: LabSelection,
    #[serde(default)]
    pub products: ProductSelection,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LabSelection {
    pub id: Option<String>,
    pub name: Option<String>,
    pub entreprise_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProductSelection {
    pub id: Option<String>,
    pub entreprise: Option<String>,
    pub lab_id: Option<String>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl LabSelection {
    /// Field-wise: keep what is set here, fill the gaps from `fallback`.
    pub fn or(self, fallback: LabSelection) -> LabSelection {
        LabSelection {
            id: self.id.or(fallback.id),
            name: self.name.or(fallback.name),
            entreprise_id: self.entreprise_id.or(fallback.entreprise_id),
        }
    }

    pub fn into_columns(self) -> Result<LabColumns> {
        Ok(LabColumns {
            id: self.id.ok_or_else(|| missing("--lab-id-col", "labs.id"))?,
            name: self.name,
            entreprise_id: self
                .entreprise_id
                .ok_or_else(|| missing("--entreprise-id-col", "labs.entreprise_id"))?,
        })
    }
}

impl ProductSelection {
    /// Field-wise: keep what is set here, fill the gaps from `fallback`.
    pub fn or(self, fallback: ProductSelection) -> ProductSelection {
        ProductSelection {
            id: self.id.or(fallback.id),
            entreprise: self.entreprise.or(fallback.entreprise),
            lab_id: self.lab_id.or(fallback.lab_id),
        }
    }

    pub fn into_columns(self) -> Result<ProductColumns> {
        Ok(ProductColumns {
            id: self.id,
            entreprise: self
                .entreprise
                .ok_or_else(|| missing("--product-entreprise-col", "products.entreprise"))?,
            lab_id: self
                .lab_id
                .ok_or_else(|| missing("--product-lab-col", "products.lab_id"))?,
        })
    }
}

fn missing(flag: &str, key: &str) -> anyhow::Error {
    anyhow!("no column selected: pass {} or set `{}` in the config file", flag, key)
}
