//! Requisition wire models.

use chrono::{DateTime, Utc};
use pathya_core::{BookId, RequisitionId, RequisitionStatus};
use serde::{Deserialize, Serialize};

use super::{Book, School};

/// A request by one school for a quantity of one book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requisition {
    pub id: RequisitionId,

    /// Human-readable request code (e.g. "REQ-2025-00042").
    pub req_code: String,

    pub book_id: BookId,

    /// Joined book data when the backend expands it.
    #[serde(default)]
    pub book: Option<Book>,

    /// UDISE code of the requesting school.
    pub school_udise: String,

    /// Joined school data when the backend expands it.
    #[serde(default)]
    pub school: Option<School>,

    /// Requested quantity.
    pub quantity: u32,

    /// Cumulative fulfilled quantity. Never exceeds `quantity` through the
    /// installment path.
    pub received: u32,

    pub status: RequisitionStatus,

    /// Remark written by the block reviewer.
    #[serde(default)]
    pub block_remark: Option<String>,

    /// Remark written by the district reviewer.
    #[serde(default)]
    pub district_remark: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Requisition {
    /// Quantity still to be fulfilled.
    #[must_use]
    pub fn outstanding(&self) -> u32 {
        self.quantity.saturating_sub(self.received)
    }
}

/// Partial patch for a requisition. `None` fields are omitted from the
/// request body, so each mutation touches only the fields it names.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequisitionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_remark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_remark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<u32>,
}

/// Query parameters for the paged requisition list.
#[derive(Debug, Clone, Default)]
pub struct RequisitionListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Restrict to a single status.
    pub status: Option<RequisitionStatus>,
}

impl RequisitionListParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        query
    }
}
