//! Notification wire models.

use chrono::{DateTime, Utc};
use pathya_core::{AdminTier, NotificationId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category of a broadcast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Info,
    Alert,
    Reminder,
}

/// Display priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

/// The single audience a broadcast targets. Audiences are mutually
/// exclusive, never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationAudience {
    Districts,
    Blocks,
    Schools,
}

/// A broadcast message with a per-recipient read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,

    pub title: String,
    pub message: String,

    pub notification_type: NotificationType,
    pub priority: NotificationPriority,

    /// Tier that sent the broadcast.
    pub sender_tier: AdminTier,

    /// Audience flags. The backend sets exactly one.
    #[serde(default)]
    pub for_districts: bool,
    #[serde(default)]
    pub for_blocks: bool,
    #[serde(default)]
    pub for_schools: bool,

    /// Expired notifications remain readable; nothing filters them here.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,

    /// Read flag for the requesting recipient.
    #[serde(default)]
    pub is_read: bool,

    pub created_at: DateTime<Utc>,
}

/// Wire payload for creating a broadcast.
///
/// The audience enum is flattened to the backend's three boolean flags;
/// expiry is already absolute by the time it reaches the wire.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationPayload {
    #[validate(length(min = 1, max = 200, message = "Title is required (1-200 characters)"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Message is required (1-2000 characters)"
    ))]
    pub message: String,

    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub sender_tier: AdminTier,

    pub for_districts: bool,
    pub for_blocks: bool,
    pub for_schools: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateNotificationPayload {
    /// Set the audience flags from the single selected audience.
    pub fn set_audience(&mut self, audience: NotificationAudience) {
        self.for_districts = audience == NotificationAudience::Districts;
        self.for_blocks = audience == NotificationAudience::Blocks;
        self.for_schools = audience == NotificationAudience::Schools;
    }
}

/// Read statistics for the caller's feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub total: u32,
    pub unread: u32,
}

/// Query parameters for the paged notification list and stats.
#[derive(Debug, Clone, Default)]
pub struct NotificationListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// The caller's tier, scoping the feed to broadcasts targeting it.
    pub tier: Option<AdminTier>,
    /// The caller's region code (district/block) or UDISE, as applicable.
    pub scope_code: Option<String>,
}

impl NotificationListParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(tier) = self.tier {
            query.push(("tier", tier.to_string()));
        }
        if let Some(code) = &self.scope_code {
            query.push(("scopeCode", code.clone()));
        }
        query
    }
}
