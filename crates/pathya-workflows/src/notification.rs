//! Notification feed and broadcasting.
//!
//! The feed accumulates pages client-side, newest first, and keeps local
//! read-state in step with the backend: marking a notification read patches
//! the local copy and decrements the unread counter, saturating at zero.
//! That local patch is the only optimistic state in the system — every
//! other mutation reloads authoritative lists.

use chrono::{Duration, Utc};
use tracing::{debug, info};
use validator::Validate;

use pathya_client::models::{
    CreateNotificationPayload, Notification, NotificationAudience, NotificationListParams,
    NotificationPriority, NotificationStats, NotificationType,
};
use pathya_client::BackendClient;
use pathya_core::{AdminTier, NotificationId};

use crate::error::{validate_payload, WorkflowError, WorkflowResult};

/// Default page size for feed fetches.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// The caller's standing in the feed: tier plus region code.
#[derive(Debug, Clone)]
pub struct FeedScope {
    pub tier: AdminTier,
    /// District/block code or UDISE, as applicable to the tier.
    pub scope_code: Option<String>,
}

impl FeedScope {
    pub fn new(tier: AdminTier, scope_code: Option<String>) -> Self {
        Self { tier, scope_code }
    }

    fn params(&self, page: u32, limit: u32) -> NotificationListParams {
        NotificationListParams {
            page: Some(page),
            limit: Some(limit),
            tier: Some(self.tier),
            scope_code: self.scope_code.clone(),
        }
    }
}

/// A validated broadcast request, before wire conversion.
#[derive(Debug, Clone, Validate)]
pub struct BroadcastRequest {
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

    /// Exactly one audience; never combined.
    pub audience: NotificationAudience,

    /// Days until expiry, converted to an absolute instant at creation.
    #[validate(range(min = 1, max = 365, message = "Expiry must be 1-365 days"))]
    pub expires_in_days: Option<u16>,
}

/// Client-side accumulated notification feed for one caller.
#[derive(Debug)]
pub struct NotificationFeed {
    client: BackendClient,
    scope: FeedScope,
    page_size: u32,
    notifications: Vec<Notification>,
    page: u32,
    total_pages: u32,
    stats: NotificationStats,
}

impl NotificationFeed {
    pub fn new(client: BackendClient, scope: FeedScope) -> Self {
        Self {
            client,
            scope,
            page_size: DEFAULT_PAGE_SIZE,
            notifications: Vec::new(),
            page: 0,
            total_pages: 0,
            stats: NotificationStats { total: 0, unread: 0 },
        }
    }

    /// Override the page size used for fetches.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The accumulated notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Read statistics as of the last refresh, adjusted by local
    /// mark-read patches.
    #[must_use]
    pub fn stats(&self) -> NotificationStats {
        self.stats
    }

    /// Whether pages remain beyond those accumulated.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Reset and load the first page plus read statistics.
    ///
    /// Also the periodic-refresh entry point; a refresh that completes
    /// after a newer one simply overwrites (last-completed-wins).
    pub async fn refresh(&mut self) -> WorkflowResult<()> {
        let params = self.scope.params(1, self.page_size);
        let batch = self.client.list_notifications(&params).await?;
        let stats = self.client.notification_stats(&params).await?;

        self.notifications = batch.items;
        self.page = batch.page;
        self.total_pages = batch.total_pages;
        self.stats = stats;
        debug!(
            "feed refreshed: {} on page 1, {} unread of {}",
            self.notifications.len(),
            self.stats.unread,
            self.stats.total
        );
        Ok(())
    }

    /// Fetch and append the next page. Returns whether more remain.
    pub async fn load_more(&mut self) -> WorkflowResult<bool> {
        if !self.has_more() {
            return Ok(false);
        }
        let params = self.scope.params(self.page + 1, self.page_size);
        let batch = self.client.list_notifications(&params).await?;
        self.page = batch.page;
        self.total_pages = batch.total_pages;
        self.notifications.extend(batch.items);
        Ok(self.has_more())
    }

    /// Mark a notification read.
    ///
    /// Idempotent: a notification already read locally is left alone and
    /// no call is made, so the unread counter can never be driven below
    /// zero by repeated marking.
    pub async fn mark_read(&mut self, id: NotificationId) -> WorkflowResult<()> {
        let Some(local) = self.notifications.iter_mut().find(|n| n.id == id) else {
            return Err(WorkflowError::validation(
                "notification",
                "notification is not in the loaded feed",
            ));
        };
        if local.is_read {
            return Ok(());
        }

        self.client.mark_notification_read(id).await?;
        local.is_read = true;
        self.stats.unread = self.stats.unread.saturating_sub(1);
        Ok(())
    }

    /// Create a broadcast from this caller's tier.
    ///
    /// The audience must lie below the sending tier; expiry in days is
    /// converted to an absolute instant at creation time.
    pub async fn broadcast(&self, request: BroadcastRequest) -> WorkflowResult<Notification> {
        validate_payload(&request)?;
        if !audience_allowed(self.scope.tier, request.audience) {
            return Err(WorkflowError::validation(
                "audience",
                format!(
                    "tier {} cannot target {:?}",
                    self.scope.tier, request.audience
                ),
            ));
        }

        let expires_at = request
            .expires_in_days
            .map(|days| Utc::now() + Duration::days(i64::from(days)));
        let mut payload = CreateNotificationPayload {
            title: request.title,
            message: request.message,
            notification_type: request.notification_type,
            priority: request.priority,
            sender_tier: self.scope.tier,
            for_districts: false,
            for_blocks: false,
            for_schools: false,
            expires_at,
        };
        payload.set_audience(request.audience);

        let notification = self.client.create_notification(&payload).await?;
        info!(
            "broadcast {} created for {:?} by {}",
            notification.id, request.audience, self.scope.tier
        );
        Ok(notification)
    }
}

/// Whether a tier may target an audience: broadcasts only flow downward.
#[must_use]
pub fn audience_allowed(sender: AdminTier, audience: NotificationAudience) -> bool {
    match sender {
        AdminTier::State => true,
        AdminTier::District => matches!(
            audience,
            NotificationAudience::Blocks | NotificationAudience::Schools
        ),
        AdminTier::Block => audience == NotificationAudience::Schools,
        AdminTier::School => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcasts_flow_downward_only() {
        assert!(audience_allowed(AdminTier::State, NotificationAudience::Districts));
        assert!(audience_allowed(AdminTier::State, NotificationAudience::Schools));
        assert!(audience_allowed(AdminTier::District, NotificationAudience::Blocks));
        assert!(!audience_allowed(AdminTier::District, NotificationAudience::Districts));
        assert!(audience_allowed(AdminTier::Block, NotificationAudience::Schools));
        assert!(!audience_allowed(AdminTier::Block, NotificationAudience::Blocks));
        assert!(!audience_allowed(AdminTier::School, NotificationAudience::Schools));
    }

    #[test]
    fn broadcast_request_validates_expiry_range() {
        let request = BroadcastRequest {
            title: "Stock arrival".to_string(),
            message: "New stock at the central store.".to_string(),
            notification_type: NotificationType::Info,
            priority: NotificationPriority::Low,
            audience: NotificationAudience::Blocks,
            expires_in_days: Some(0),
        };
        assert!(request.validate().is_err());
    }
}
