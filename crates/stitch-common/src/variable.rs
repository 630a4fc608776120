//! Data variable metadata.

use serde::{Deserialize, Serialize};

/// Metadata for one data variable exposed by a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name (e.g., "sst", "chlorophyll").
    pub name: String,
    /// Physical units (e.g., "degree_C").
    pub units: String,
    /// Missing-value sentinel substituted where the owning dataset has no
    /// data at a requested position.
    pub fill_value: f64,
}

impl Variable {
    /// Create a new variable.
    pub fn new(name: impl Into<String>, units: impl Into<String>, fill_value: f64) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            fill_value,
        }
    }
}
