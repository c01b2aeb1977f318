//! Requisition window gate.
//!
//! Computes whether a tier's submission window is open and gates mutating
//! review controls accordingly. The state tier owns window configuration
//! and is never gated itself.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use pathya_client::models::{RequisitionWindow, UpsertWindowPayload};
use pathya_client::BackendClient;
use pathya_core::AdminTier;

use crate::error::{WorkflowError, WorkflowResult};

/// Derived openness of a tier's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    /// The current instant lies inside the window.
    Open,
    /// The window has not started yet.
    Upcoming,
    /// The window has ended.
    Closed,
    /// No window record exists for the tier. Distinct from a failed fetch,
    /// which surfaces as an error instead.
    NotConfigured,
}

/// Result of a window check, shaped for gating UI controls.
#[derive(Debug, Clone)]
pub struct WindowCheck {
    pub status: WindowStatus,
    pub is_open: bool,
    pub has_started: bool,
    pub has_ended: bool,
    pub message: String,
}

impl WindowCheck {
    fn always_open() -> Self {
        WindowCheck {
            status: WindowStatus::Open,
            is_open: true,
            has_started: true,
            has_ended: false,
            message: "State tier is not gated by requisition windows.".to_string(),
        }
    }
}

/// Derive a window check from an optional window record and the current
/// instant. Boundary instants count as open.
#[must_use]
pub fn derive_window_status(window: Option<&RequisitionWindow>, now: DateTime<Utc>) -> WindowCheck {
    let Some(window) = window else {
        return WindowCheck {
            status: WindowStatus::NotConfigured,
            is_open: false,
            has_started: false,
            has_ended: false,
            message: "No requisition window set.".to_string(),
        };
    };

    if now < window.start_date {
        WindowCheck {
            status: WindowStatus::Upcoming,
            is_open: false,
            has_started: false,
            has_ended: false,
            message: format!(
                "Requisition window opens on {}.",
                window.start_date.format("%d %b %Y")
            ),
        }
    } else if now > window.end_date {
        WindowCheck {
            status: WindowStatus::Closed,
            is_open: false,
            has_started: true,
            has_ended: true,
            message: format!(
                "Requisition window closed on {}.",
                window.end_date.format("%d %b %Y")
            ),
        }
    } else {
        WindowCheck {
            status: WindowStatus::Open,
            is_open: true,
            has_started: true,
            has_ended: false,
            message: format!(
                "Requisition window is open until {}.",
                window.end_date.format("%d %b %Y")
            ),
        }
    }
}

/// Whether mutating review controls should be enabled under this check.
/// Read access to the underlying lists is never gated.
#[must_use]
pub fn mutations_enabled(check: &WindowCheck) -> bool {
    check.is_open
}

/// Fetches window records and derives gate state per tier.
#[derive(Debug, Clone)]
pub struct WindowGate {
    client: BackendClient,
}

impl WindowGate {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Check the window gating `tier` against the current instant.
    ///
    /// STATE is exempt and reports open without a fetch. A missing window
    /// record reports [`WindowStatus::NotConfigured`]; a failed fetch
    /// propagates as an error so callers can render "try again" rather than
    /// "no window set".
    pub async fn check(&self, tier: AdminTier) -> WorkflowResult<WindowCheck> {
        if tier == AdminTier::State {
            return Ok(WindowCheck::always_open());
        }

        let window = self.client.check_window_status(tier).await?;
        let check = derive_window_status(window.as_ref(), Utc::now());
        debug!("window check for {}: {:?}", tier, check.status);
        Ok(check)
    }

    /// Create or replace the window for a tier. State-tier operation.
    pub async fn set_window(
        &self,
        tier: AdminTier,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> WorkflowResult<RequisitionWindow> {
        if tier == AdminTier::State {
            return Err(WorkflowError::TierNotApplicable(tier));
        }
        if start >= end {
            return Err(WorkflowError::validation(
                "endDate",
                "window end must be after its start",
            ));
        }

        let payload = UpsertWindowPayload {
            window_type: tier,
            start_date: start,
            end_date: end,
        };
        let window = self.client.upsert_requisition_window(&payload).await?;
        info!(
            "requisition window for {} set to {} – {}",
            tier, window.start_date, window.end_date
        );
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathya_core::WindowId;

    fn window(start: &str, end: &str) -> RequisitionWindow {
        RequisitionWindow {
            id: WindowId::new(),
            window_type: AdminTier::Block,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            created_at: "2024-12-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-12-01T00:00:00Z".parse().unwrap(),
        }
    }

    fn january_window() -> RequisitionWindow {
        window("2025-01-01T00:00:00Z", "2025-01-31T23:59:59Z")
    }

    #[test]
    fn inside_the_window_is_open() {
        let check = derive_window_status(
            Some(&january_window()),
            "2025-01-15T12:00:00Z".parse().unwrap(),
        );
        assert_eq!(check.status, WindowStatus::Open);
        assert!(check.is_open);
        assert!(check.has_started);
        assert!(!check.has_ended);
    }

    #[test]
    fn after_the_window_is_closed() {
        let check = derive_window_status(
            Some(&january_window()),
            "2025-02-01T00:00:00Z".parse().unwrap(),
        );
        assert_eq!(check.status, WindowStatus::Closed);
        assert!(!check.is_open);
        assert!(check.has_ended);
    }

    #[test]
    fn before_the_window_is_upcoming() {
        let check = derive_window_status(
            Some(&january_window()),
            "2024-12-01T00:00:00Z".parse().unwrap(),
        );
        assert_eq!(check.status, WindowStatus::Upcoming);
        assert!(!check.is_open);
        assert!(!check.has_started);
    }

    #[test]
    fn boundary_instants_are_open() {
        let start_instant = derive_window_status(
            Some(&january_window()),
            "2025-01-01T00:00:00Z".parse().unwrap(),
        );
        assert!(start_instant.is_open);

        let end_instant = derive_window_status(
            Some(&january_window()),
            "2025-01-31T23:59:59Z".parse().unwrap(),
        );
        assert!(end_instant.is_open);
    }

    #[test]
    fn missing_window_is_not_configured() {
        let check = derive_window_status(None, Utc::now());
        assert_eq!(check.status, WindowStatus::NotConfigured);
        assert!(!check.is_open);
        assert_eq!(check.message, "No requisition window set.");
    }

    #[test]
    fn mutations_follow_openness() {
        let open = derive_window_status(
            Some(&january_window()),
            "2025-01-10T00:00:00Z".parse().unwrap(),
        );
        assert!(mutations_enabled(&open));

        let closed = derive_window_status(None, Utc::now());
        assert!(!mutations_enabled(&closed));
    }
}
