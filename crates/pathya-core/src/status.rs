//! Lifecycle status enums and their transition tables.
//!
//! The transition tables live here, once, so every workflow routes status
//! changes through the same edges. A workflow that wants to move a
//! requisition or issue must ask [`RequisitionStatus::can_transition_to`] or
//! [`IssueStatus::next_for_action`] rather than assembling status strings.

use crate::tier::AdminTier;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle status of a book requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequisitionStatus {
    PendingBlockApproval,
    PendingDistrictApproval,
    RejectedByBlock,
    RejectedByDistrict,
    Approved,
    Completed,
}

impl RequisitionStatus {
    /// Whether moving from `self` to `next` is a defined edge.
    ///
    /// Edges: block approval forwards to district, district approval
    /// forwards to `Approved`, either tier may reject, a rejecting tier may
    /// later re-approve (same forward edge), and fulfillment completes an
    /// approved requisition.
    #[must_use]
    pub fn can_transition_to(self, next: RequisitionStatus) -> bool {
        use RequisitionStatus::{
            Approved, Completed, PendingBlockApproval, PendingDistrictApproval, RejectedByBlock,
            RejectedByDistrict,
        };
        matches!(
            (self, next),
            (PendingBlockApproval, PendingDistrictApproval)
                | (PendingBlockApproval, RejectedByBlock)
                | (RejectedByBlock, PendingDistrictApproval)
                | (PendingDistrictApproval, Approved)
                | (PendingDistrictApproval, RejectedByDistrict)
                | (RejectedByDistrict, Approved)
                | (Approved, Completed)
        )
    }

    /// The pending status reviewed at the given tier, if that tier reviews
    /// requisitions at all.
    #[must_use]
    pub fn pending_for(tier: AdminTier) -> Option<RequisitionStatus> {
        match tier {
            AdminTier::Block => Some(RequisitionStatus::PendingBlockApproval),
            AdminTier::District => Some(RequisitionStatus::PendingDistrictApproval),
            AdminTier::School | AdminTier::State => None,
        }
    }

    /// The rejection status produced by the given tier.
    #[must_use]
    pub fn rejected_by(tier: AdminTier) -> Option<RequisitionStatus> {
        match tier {
            AdminTier::Block => Some(RequisitionStatus::RejectedByBlock),
            AdminTier::District => Some(RequisitionStatus::RejectedByDistrict),
            AdminTier::School | AdminTier::State => None,
        }
    }

    /// The status an approval at the given tier forwards to.
    #[must_use]
    pub fn forward_from(tier: AdminTier) -> Option<RequisitionStatus> {
        match tier {
            AdminTier::Block => Some(RequisitionStatus::PendingDistrictApproval),
            AdminTier::District => Some(RequisitionStatus::Approved),
            AdminTier::School | AdminTier::State => None,
        }
    }

    /// Whether a requisition in this status still counts toward aggregate
    /// demand in a state work order.
    #[must_use]
    pub fn counts_toward_demand(self) -> bool {
        matches!(
            self,
            RequisitionStatus::PendingBlockApproval
                | RequisitionStatus::PendingDistrictApproval
                | RequisitionStatus::Approved
        )
    }
}

impl Display for RequisitionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequisitionStatus::PendingBlockApproval => "PENDING_BLOCK_APPROVAL",
            RequisitionStatus::PendingDistrictApproval => "PENDING_DISTRICT_APPROVAL",
            RequisitionStatus::RejectedByBlock => "REJECTED_BY_BLOCK",
            RequisitionStatus::RejectedByDistrict => "REJECTED_BY_DISTRICT",
            RequisitionStatus::Approved => "APPROVED",
            RequisitionStatus::Completed => "COMPLETED",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle status of a problem report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    PendingBlockReview,
    PendingDistrictReview,
    PendingStateReview,
    Resolved,
    RejectedByBlock,
    RejectedByDistrict,
    RejectedByState,
}

impl IssueStatus {
    /// The pending-review status owned by the given tier.
    #[must_use]
    pub fn pending_for(tier: AdminTier) -> Option<IssueStatus> {
        match tier {
            AdminTier::Block => Some(IssueStatus::PendingBlockReview),
            AdminTier::District => Some(IssueStatus::PendingDistrictReview),
            AdminTier::State => Some(IssueStatus::PendingStateReview),
            AdminTier::School => None,
        }
    }

    /// The rejection status produced by the given tier.
    #[must_use]
    pub fn rejected_by(tier: AdminTier) -> Option<IssueStatus> {
        match tier {
            AdminTier::Block => Some(IssueStatus::RejectedByBlock),
            AdminTier::District => Some(IssueStatus::RejectedByDistrict),
            AdminTier::State => Some(IssueStatus::RejectedByState),
            AdminTier::School => None,
        }
    }

    /// The tier whose review this status is waiting on, if any.
    #[must_use]
    pub fn review_tier(self) -> Option<AdminTier> {
        match self {
            IssueStatus::PendingBlockReview => Some(AdminTier::Block),
            IssueStatus::PendingDistrictReview => Some(AdminTier::District),
            IssueStatus::PendingStateReview => Some(AdminTier::State),
            _ => None,
        }
    }

    /// Whether the issue has reached a terminal status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.review_tier().is_none()
    }

    /// The status produced by applying `action` to an issue in this status.
    ///
    /// Returns `None` when the issue is not pending review or when the
    /// action is not available at the reviewing tier (escalate at STATE).
    #[must_use]
    pub fn next_for_action(self, action: IssueAction) -> Option<IssueStatus> {
        let tier = self.review_tier()?;
        match action {
            IssueAction::Resolve => Some(IssueStatus::Resolved),
            IssueAction::Reject => IssueStatus::rejected_by(tier),
            IssueAction::Escalate => IssueStatus::pending_for(tier.next_up()?),
        }
    }
}

impl Display for IssueStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IssueStatus::PendingBlockReview => "PENDING_BLOCK_REVIEW",
            IssueStatus::PendingDistrictReview => "PENDING_DISTRICT_REVIEW",
            IssueStatus::PendingStateReview => "PENDING_STATE_REVIEW",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::RejectedByBlock => "REJECTED_BY_BLOCK",
            IssueStatus::RejectedByDistrict => "REJECTED_BY_DISTRICT",
            IssueStatus::RejectedByState => "REJECTED_BY_STATE",
        };
        write!(f, "{name}")
    }
}

/// A reviewer's decision on a pending issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueAction {
    Resolve,
    Reject,
    Escalate,
}

/// Priority of a problem report. Ordered so that `Critical` compares
/// greatest, which display sorting relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Critical,
}
