//! Requisition window wire models.

use chrono::{DateTime, Utc};
use pathya_core::{AdminTier, WindowId};
use serde::{Deserialize, Serialize};

/// An administratively declared submission period for one tier.
///
/// At most one record exists per tier (SCHOOL, BLOCK, DISTRICT); the state
/// tier owns and mutates them and is itself never gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionWindow {
    pub id: WindowId,

    /// The tier this window gates.
    pub window_type: AdminTier,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a tier's window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertWindowPayload {
    pub window_type: AdminTier,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
