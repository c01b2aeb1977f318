//! # pathya workflows
//!
//! The workflow layer of the textbook distribution platform: everything
//! between the backend call contract and the rendering surface.
//!
//! - [`window`] — requisition window gate: derives open/upcoming/closed
//!   from a tier's configured submission period and gates mutating review
//!   controls.
//! - [`requisition`] — the block/district approval workflow, one
//!   table-driven implementation parametrized per tier.
//! - [`fulfillment`] — state-tier work orders and partial installments
//!   against approved requisitions, with client-side clamping.
//! - [`issue`] — the block → district → state escalation workflow for
//!   problem reports.
//! - [`notification`] — the accumulated notification feed and validated
//!   downward broadcasts.
//! - [`context`] — explicit reviewer identity and pluggable region
//!   scoping.
//!
//! All fallible operations return [`WorkflowResult`]; validation and
//! transition failures are raised before any network call.

pub mod context;
pub mod error;
pub mod fulfillment;
pub mod issue;
pub mod notification;
pub mod requisition;
pub mod window;

pub use context::{BlockScope, DistrictScope, ReviewerContext, ScopeFilter, StatewideScope};
pub use error::{WorkflowError, WorkflowResult};
pub use fulfillment::{compute_work_order, FulfillmentService, InstallmentOutcome, WorkOrderLine};
pub use issue::{raise_issue, IssueReviewService};
pub use notification::{audience_allowed, BroadcastRequest, FeedScope, NotificationFeed};
pub use requisition::{
    group_by_school, RemarkSlot, RequisitionReviewService, ReviewAction, SchoolGroup,
    TierReviewPolicy,
};
pub use window::{derive_window_status, mutations_enabled, WindowCheck, WindowGate, WindowStatus};
