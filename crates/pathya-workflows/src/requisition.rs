//! Requisition approval workflow.
//!
//! Block and district review are the same workflow with different
//! parameters, so a single table-driven implementation serves both. The
//! policy names the tier's pending status, the status an approval forwards
//! to, the tier's own rejection status, and which remark slot the tier
//! writes. Every transition is checked against the table in
//! [`RequisitionStatus::can_transition_to`] before a patch is built.

use std::collections::BTreeMap;

use tracing::{info, warn};

use pathya_client::models::{Requisition, RequisitionListParams, RequisitionPatch};
use pathya_client::BackendClient;
use pathya_core::{AdminTier, RequisitionStatus};

use crate::context::{ReviewerContext, ScopeFilter};
use crate::error::{WorkflowError, WorkflowResult};

/// Upper bound applied to remark text.
const MAX_REMARK_LEN: usize = 2000;

/// Which remark field a tier writes. A tier only ever sends its own slot,
/// so the other tier's remark cannot be overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemarkSlot {
    Block,
    District,
}

impl RemarkSlot {
    fn write(self, patch: &mut RequisitionPatch, remark: String) {
        match self {
            RemarkSlot::Block => patch.block_remark = Some(remark),
            RemarkSlot::District => patch.district_remark = Some(remark),
        }
    }
}

/// Per-tier parameters of the review workflow.
#[derive(Debug, Clone, Copy)]
pub struct TierReviewPolicy {
    pub tier: AdminTier,
    pub pending: RequisitionStatus,
    pub forward: RequisitionStatus,
    pub rejected: RequisitionStatus,
    pub remark_slot: RemarkSlot,
}

impl TierReviewPolicy {
    /// The policy for a reviewing tier, or `None` for tiers that do not
    /// review requisitions.
    #[must_use]
    pub fn for_tier(tier: AdminTier) -> Option<TierReviewPolicy> {
        let (pending, forward, rejected) = (
            RequisitionStatus::pending_for(tier)?,
            RequisitionStatus::forward_from(tier)?,
            RequisitionStatus::rejected_by(tier)?,
        );
        let remark_slot = match tier {
            AdminTier::Block => RemarkSlot::Block,
            AdminTier::District => RemarkSlot::District,
            _ => return None,
        };
        Some(TierReviewPolicy {
            tier,
            pending,
            forward,
            rejected,
            remark_slot,
        })
    }
}

/// A reviewer's decision on a pending requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

/// Requisitions of one school, for grouped display.
#[derive(Debug, Clone)]
pub struct SchoolGroup {
    pub school_udise: String,
    pub school_name: String,
    pub requisitions: Vec<Requisition>,
}

/// Review workflow for one tier, parametrized by [`TierReviewPolicy`].
///
/// The service keeps no list state. Mutations return the backend's
/// authoritative record and callers re-list with [`Self::list_pending`];
/// there is no optimistic local merge, since quantities and the other
/// tier's remark may have changed concurrently.
#[derive(Debug, Clone)]
pub struct RequisitionReviewService {
    client: BackendClient,
    policy: TierReviewPolicy,
    reviewer: ReviewerContext,
}

impl RequisitionReviewService {
    /// Create the review service for a reviewer. Fails for tiers that do
    /// not review requisitions (SCHOOL, STATE).
    pub fn new(client: BackendClient, reviewer: ReviewerContext) -> WorkflowResult<Self> {
        let policy = TierReviewPolicy::for_tier(reviewer.tier)
            .ok_or(WorkflowError::TierNotApplicable(reviewer.tier))?;
        Ok(Self {
            client,
            policy,
            reviewer,
        })
    }

    /// The policy this service reviews under.
    #[must_use]
    pub fn policy(&self) -> &TierReviewPolicy {
        &self.policy
    }

    /// List requisitions pending this tier's review inside the caller's
    /// region, accumulating every page.
    ///
    /// Requisitions without joined school data cannot be scope-checked and
    /// are excluded rather than leaked across regions.
    pub async fn list_pending(&self, scope: &dyn ScopeFilter) -> WorkflowResult<Vec<Requisition>> {
        let mut pending = Vec::new();
        let mut page = 1;
        loop {
            let params = RequisitionListParams {
                page: Some(page),
                status: Some(self.policy.pending),
                ..Default::default()
            };
            let batch = self.client.list_requisitions(&params).await?;
            let has_more = batch.has_more();
            for requisition in batch.items {
                match &requisition.school {
                    Some(school) if scope.matches(school) => pending.push(requisition),
                    Some(_) => {}
                    None => {
                        warn!(
                            "requisition {} has no joined school; excluded from scoped list",
                            requisition.req_code
                        );
                    }
                }
            }
            if !has_more {
                break;
            }
            page += 1;
        }
        Ok(pending)
    }

    /// Apply a review decision to a requisition in this tier's pending
    /// status.
    ///
    /// Approval requires a non-empty remark and forwards the requisition;
    /// rejection records the tier's own rejection status with an optional
    /// remark. Validation failures leave the requisition untouched — no
    /// patch is sent.
    pub async fn review(
        &self,
        requisition: &Requisition,
        action: ReviewAction,
        remark: &str,
    ) -> WorkflowResult<Requisition> {
        let remark = validate_remark(remark, action == ReviewAction::Approve)?;

        let target = match action {
            ReviewAction::Approve => self.policy.forward,
            ReviewAction::Reject => self.policy.rejected,
        };
        self.transition(requisition, target, remark, "review")
            .await
    }

    /// Forward a requisition this tier previously rejected, exactly as an
    /// initial approval would.
    pub async fn reapprove(&self, requisition: &Requisition) -> WorkflowResult<Requisition> {
        if requisition.status != self.policy.rejected {
            return Err(WorkflowError::InvalidTransition {
                status: requisition.status.to_string(),
                action: "reapprove",
            });
        }
        self.transition(requisition, self.policy.forward, None, "reapprove")
            .await
    }

    /// Persist this tier's remark without changing status. Allowed at any
    /// time, including for already-decided requisitions.
    pub async fn save_remark(
        &self,
        requisition: &Requisition,
        remark: &str,
    ) -> WorkflowResult<Requisition> {
        let remark = validate_remark(remark, true)?;
        let mut patch = RequisitionPatch::default();
        if let Some(remark) = remark {
            self.policy.remark_slot.write(&mut patch, remark);
        }
        let updated = self.client.update_requisition(requisition.id, &patch).await?;
        info!(
            "{} remark saved on requisition {} by {}",
            self.policy.tier, requisition.req_code, self.reviewer.user
        );
        Ok(updated)
    }

    async fn transition(
        &self,
        requisition: &Requisition,
        target: RequisitionStatus,
        remark: Option<String>,
        action: &'static str,
    ) -> WorkflowResult<Requisition> {
        if !requisition.status.can_transition_to(target) {
            return Err(WorkflowError::InvalidTransition {
                status: requisition.status.to_string(),
                action,
            });
        }

        let mut patch = RequisitionPatch {
            status: Some(target),
            ..Default::default()
        };
        if let Some(remark) = remark {
            self.policy.remark_slot.write(&mut patch, remark);
        }

        let updated = self.client.update_requisition(requisition.id, &patch).await?;
        info!(
            "requisition {} moved {} -> {} by {} ({})",
            requisition.req_code, requisition.status, target, self.reviewer.user, self.policy.tier
        );
        Ok(updated)
    }
}

/// Group requisitions by school for display, ordered by school name.
#[must_use]
pub fn group_by_school(requisitions: &[Requisition]) -> Vec<SchoolGroup> {
    let mut groups: BTreeMap<(String, String), Vec<Requisition>> = BTreeMap::new();
    for requisition in requisitions {
        let name = requisition
            .school
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| requisition.school_udise.clone());
        groups
            .entry((name, requisition.school_udise.clone()))
            .or_default()
            .push(requisition.clone());
    }
    groups
        .into_iter()
        .map(|((school_name, school_udise), requisitions)| SchoolGroup {
            school_udise,
            school_name,
            requisitions,
        })
        .collect()
}

/// Trim and bound a remark. When `required`, an empty remark is a
/// validation error; otherwise empty collapses to `None`.
fn validate_remark(remark: &str, required: bool) -> WorkflowResult<Option<String>> {
    let trimmed = remark.trim();
    if trimmed.is_empty() {
        if required {
            return Err(WorkflowError::validation(
                "remark",
                "a remark is required for approval",
            ));
        }
        return Ok(None);
    }
    if trimmed.len() > MAX_REMARK_LEN {
        return Err(WorkflowError::validation(
            "remark",
            format!("remark must not exceed {MAX_REMARK_LEN} characters"),
        ));
    }
    Ok(Some(trimmed.to_string()))
}
