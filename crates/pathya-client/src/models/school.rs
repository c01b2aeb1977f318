//! School, block, and district reference entities.
//!
//! Lookup data supplied entirely by the backend; treated as opaque joined
//! data by the workflows.

use pathya_core::SchoolId;
use serde::{Deserialize, Serialize};

/// A school, the origin of requisitions and issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: SchoolId,

    /// Display name.
    pub name: String,

    /// National UDISE code, the school's stable external key.
    pub udise: String,

    /// Code of the block this school belongs to.
    pub block_code: String,

    /// Code of the district this school belongs to.
    pub district_code: String,
}

/// A block, the first reviewing tier above schools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub code: String,
    pub name: String,
    pub district_code: String,
}

/// A district, the second reviewing tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub code: String,
    pub name: String,
}
