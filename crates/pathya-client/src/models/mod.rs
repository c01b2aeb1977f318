//! Wire models for the distribution backend.
//!
//! All models serialize as camelCase JSON; instants are ISO-8601 strings on
//! the wire. Patch types keep every field optional and skip `None` during
//! serialization so mutations send only the fields they change.

mod book;
mod issue;
mod notification;
mod requisition;
mod school;
mod window;

pub use book::{Book, BookStockPatch};
pub use issue::{CreateIssuePayload, Issue, IssueListParams, IssueReviewPayload};
pub use notification::{
    CreateNotificationPayload, Notification, NotificationAudience, NotificationListParams,
    NotificationPriority, NotificationStats, NotificationType,
};
pub use requisition::{Requisition, RequisitionListParams, RequisitionPatch};
pub use school::{Block, District, School};
pub use window::{RequisitionWindow, UpsertWindowPayload};
