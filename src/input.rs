//! JSON deal files.
//!
//! ```json
//! {
//!   "vendor":    [{ "name": "Binder", "value": "120", "percentage": "90" }],
//!   "collector": [{ "name": "Slab", "value": "200", "sell_percentage": "70", "trade_percentage": "80" }]
//! }
//! ```
//!
//! Either list may be omitted. Amounts may be strings or JSON numbers; a
//! `null` or blank amount counts as unset.

use crate::core::item::{CollectorItem, VendorItem};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deal JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Both item lists of a deal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealFile {
    #[serde(default)]
    pub vendor: Vec<VendorItem>,
    #[serde(default)]
    pub collector: Vec<CollectorItem>,
}

impl DealFile {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, InputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
