//! Notification feed tests — page accumulation, idempotent mark-read, and
//! validated broadcasts.

mod helpers;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pathya_client::models::{NotificationAudience, NotificationPriority, NotificationType};
use pathya_core::AdminTier;
use pathya_workflows::{BroadcastRequest, FeedScope, NotificationFeed, WorkflowError};

use helpers::{client, notification_json, ok_envelope, paged_envelope, stats_json};

const NOTE_A: &str = "5a4b3c2d-1e0f-4a9b-8c7d-6e5f4a3b2c01";
const NOTE_B: &str = "5a4b3c2d-1e0f-4a9b-8c7d-6e5f4a3b2c02";

fn block_feed(server: &MockServer) -> NotificationFeed {
    NotificationFeed::new(
        client(server),
        FeedScope::new(AdminTier::Block, Some("BLK-015".to_string())),
    )
    .with_page_size(1)
}

#[tokio::test]
async fn refresh_then_load_more_accumulates_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(query_param("page", "1"))
        .and(query_param("tier", "BLOCK"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_envelope(
            json!([notification_json(NOTE_A, false)]),
            1,
            2,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_envelope(
            json!([notification_json(NOTE_B, true)]),
            2,
            2,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notifications/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(stats_json(2, 1))))
        .mount(&server)
        .await;

    let mut feed = block_feed(&server);
    feed.refresh().await.unwrap();
    assert_eq!(feed.notifications().len(), 1);
    assert!(feed.has_more());
    assert_eq!(feed.stats().unread, 1);

    let more = feed.load_more().await.unwrap();
    assert!(!more);
    assert_eq!(feed.notifications().len(), 2);
}

#[tokio::test]
async fn mark_read_is_idempotent_and_saturates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_envelope(
            json!([notification_json(NOTE_A, false)]),
            1,
            1,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notifications/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(stats_json(1, 1))))
        .mount(&server)
        .await;
    // The backend sees exactly one read mark despite repeated calls.
    Mock::given(method("POST"))
        .and(path(format!("/notifications/{NOTE_A}/read")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(notification_json(NOTE_A, true))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut feed = block_feed(&server);
    feed.refresh().await.unwrap();

    let id = NOTE_A.parse().unwrap();
    feed.mark_read(id).await.unwrap();
    assert_eq!(feed.stats().unread, 0);

    // Second and third marks are local no-ops; unread stays at zero.
    feed.mark_read(id).await.unwrap();
    feed.mark_read(id).await.unwrap();
    assert_eq!(feed.stats().unread, 0);
    assert!(feed.notifications()[0].is_read);
}

#[tokio::test]
async fn broadcast_targets_exactly_one_audience() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications"))
        .and(body_partial_json(json!({
            "senderTier": "BLOCK",
            "forDistricts": false,
            "forBlocks": false,
            "forSchools": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(notification_json(NOTE_A, false))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let feed = block_feed(&server);
    feed.broadcast(BroadcastRequest {
        title: "Distribution day".to_string(),
        message: "Collection scheduled for Monday at the block office.".to_string(),
        notification_type: NotificationType::Info,
        priority: NotificationPriority::Medium,
        audience: NotificationAudience::Schools,
        expires_in_days: Some(7),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn upward_broadcast_is_rejected_without_a_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let feed = block_feed(&server);
    let err = feed
        .broadcast(BroadcastRequest {
            title: "Upward".to_string(),
            message: "Blocks cannot target districts.".to_string(),
            notification_type: NotificationType::Alert,
            priority: NotificationPriority::High,
            audience: NotificationAudience::Districts,
            expires_in_days: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation { .. }));
}

#[tokio::test]
async fn empty_title_is_rejected_without_a_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let feed = block_feed(&server);
    let err = feed
        .broadcast(BroadcastRequest {
            title: String::new(),
            message: "No title.".to_string(),
            notification_type: NotificationType::Info,
            priority: NotificationPriority::Low,
            audience: NotificationAudience::Schools,
            expires_in_days: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation { .. }));
}
