//! Issue escalation workflow.
//!
//! A problem report enters review at the block tier and either resolves,
//! is rejected by the reviewing tier, or escalates one tier up. The acting
//! tier is carried by the tier-specific review endpoint, so a review can
//! only ever write that tier's remark slot — earlier tiers' remarks
//! accumulate untouched.

use std::cmp::Reverse;

use tracing::{debug, info};

use pathya_client::models::{CreateIssuePayload, Issue, IssueListParams, IssueReviewPayload};
use pathya_client::BackendClient;
use pathya_core::{AdminTier, IssueAction, IssueStatus};

use crate::context::{ReviewerContext, ScopeFilter};
use crate::error::{validate_payload, WorkflowError, WorkflowResult};

/// Review workflow for one tier of the escalation chain.
#[derive(Debug, Clone)]
pub struct IssueReviewService {
    client: BackendClient,
    tier: AdminTier,
    pending: IssueStatus,
    reviewer: ReviewerContext,
}

impl IssueReviewService {
    /// Create the review service for a reviewer. Fails for SCHOOL, which
    /// raises issues but never reviews them.
    pub fn new(client: BackendClient, reviewer: ReviewerContext) -> WorkflowResult<Self> {
        let tier = reviewer.tier;
        let pending =
            IssueStatus::pending_for(tier).ok_or(WorkflowError::TierNotApplicable(tier))?;
        Ok(Self {
            client,
            tier,
            pending,
            reviewer,
        })
    }

    /// Whether this tier may act on the issue right now.
    #[must_use]
    pub fn can_review(&self, issue: &Issue) -> bool {
        issue.status.review_tier() == Some(self.tier)
    }

    /// List issues awaiting this tier's review inside the caller's region,
    /// highest priority first, oldest first within a priority.
    pub async fn list_for_review(&self, scope: &dyn ScopeFilter) -> WorkflowResult<Vec<Issue>> {
        let params = IssueListParams {
            status: Some(self.pending),
            ..Default::default()
        };
        let mut issues: Vec<Issue> = self
            .client
            .list_issues(&params)
            .await?
            .into_iter()
            .filter(|issue| issue.school.as_ref().is_some_and(|s| scope.matches(s)))
            .collect();
        issues.sort_by_key(|issue| (Reverse(issue.priority), issue.created_at));
        debug!("{} issues pending {} review", issues.len(), self.tier);
        Ok(issues)
    }

    /// Apply a review decision.
    ///
    /// `Resolve` closes the issue, `Reject` records this tier's rejection
    /// (remarks required), `Escalate` advances it one tier up (unavailable
    /// at STATE). Validation failures leave the issue untouched — no call
    /// is made.
    pub async fn review(
        &self,
        issue: &Issue,
        action: IssueAction,
        remarks: Option<&str>,
    ) -> WorkflowResult<Issue> {
        if !self.can_review(issue) {
            return Err(WorkflowError::InvalidTransition {
                status: issue.status.to_string(),
                action: action_name(action),
            });
        }
        // The transition table also rules out escalation at STATE.
        if issue.status.next_for_action(action).is_none() {
            return Err(WorkflowError::InvalidTransition {
                status: issue.status.to_string(),
                action: action_name(action),
            });
        }

        let remarks = remarks.map(str::trim).filter(|r| !r.is_empty());
        if action == IssueAction::Reject && remarks.is_none() {
            return Err(WorkflowError::validation(
                "remarks",
                "remarks are required when rejecting an issue",
            ));
        }

        let payload = IssueReviewPayload {
            action,
            remarks: remarks.map(str::to_string),
        };
        validate_payload(&payload)?;

        let updated = match self.tier {
            AdminTier::Block => self.client.review_issue_at_block(issue.id, &payload).await?,
            AdminTier::District => {
                self.client
                    .review_issue_at_district(issue.id, &payload)
                    .await?
            }
            AdminTier::State => self.client.review_issue_at_state(issue.id, &payload).await?,
            AdminTier::School => return Err(WorkflowError::TierNotApplicable(self.tier)),
        };
        info!(
            "issue {} {} by {} ({}): now {}",
            issue.issue_code,
            action_name(action),
            self.reviewer.user,
            self.tier,
            updated.status
        );
        Ok(updated)
    }
}

/// Raise a new issue on behalf of a school. Enters review at the block
/// tier.
pub async fn raise_issue(
    client: &BackendClient,
    payload: CreateIssuePayload,
) -> WorkflowResult<Issue> {
    validate_payload(&payload)?;
    let issue = client.create_issue(&payload).await?;
    info!("issue {} raised by {}", issue.issue_code, issue.raised_by);
    Ok(issue)
}

fn action_name(action: IssueAction) -> &'static str {
    match action {
        IssueAction::Resolve => "resolve",
        IssueAction::Reject => "reject",
        IssueAction::Escalate => "escalate",
    }
}
