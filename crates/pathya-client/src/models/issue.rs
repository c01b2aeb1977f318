//! Issue wire models.

use chrono::{DateTime, Utc};
use pathya_core::{IssueAction, IssueId, IssuePriority, IssueStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::School;

/// A problem report raised by a school, escalating through
/// block → district → state review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,

    /// Human-readable issue code (e.g. "ISS-2025-00017").
    pub issue_code: String,

    pub title: String,
    pub description: String,
    pub priority: IssuePriority,
    pub status: IssueStatus,

    /// UDISE code of the raising school.
    pub school_udise: String,

    /// Joined school data when the backend expands it.
    #[serde(default)]
    pub school: Option<School>,

    /// Identity of the person who raised the issue.
    pub raised_by: String,

    /// Remarks accumulate per tier; a later tier never overwrites an
    /// earlier tier's remark.
    #[serde(default)]
    pub remarks_by_block: Option<String>,
    #[serde(default)]
    pub remarks_by_district: Option<String>,
    #[serde(default)]
    pub remarks_by_state: Option<String>,

    #[serde(default)]
    pub block_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub district_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state_reviewed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejected_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for raising a new issue. Enters review at the block tier.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssuePayload {
    #[validate(length(min = 1, max = 200, message = "Title is required (1-200 characters)"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description is required (1-2000 characters)"
    ))]
    pub description: String,

    pub priority: IssuePriority,

    pub school_udise: String,

    pub raised_by: String,
}

/// Payload for a tier review decision.
///
/// Posted to the tier-specific review endpoint, so the acting tier is
/// carried by the URL and only that tier's remark slot can be written.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueReviewPayload {
    pub action: IssueAction,

    #[validate(length(max = 2000, message = "Remarks must not exceed 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Query parameters for the issue list.
#[derive(Debug, Clone, Default)]
pub struct IssueListParams {
    /// Restrict to a single status.
    pub status: Option<IssueStatus>,
    /// Restrict to one school.
    pub school_udise: Option<String>,
}

impl IssueListParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(udise) = &self.school_udise {
            query.push(("schoolUdise", udise.clone()));
        }
        query
    }
}
