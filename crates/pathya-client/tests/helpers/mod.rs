//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::MockServer;

use pathya_client::{BackendClient, BackendConfig};

/// Build a client pointing at the mock backend with bearer auth.
pub fn client(server: &MockServer) -> BackendClient {
    let config = BackendConfig::new(server.uri()).with_bearer_token("test-token-123");
    BackendClient::with_http_client(config, reqwest::Client::new()).unwrap()
}

/// Wrap a payload in the standard success envelope.
pub fn ok_envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Wrap a page of items in the paged success envelope.
pub fn paged_envelope(items: Value, page: u32, total_pages: u32) -> Value {
    json!({
        "success": true,
        "data": items,
        "page": page,
        "totalPages": total_pages,
    })
}

/// A canned requisition pending block approval.
pub fn requisition_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "reqCode": "REQ-2025-00042",
        "bookId": "0b9df9a8-58c8-4f64-9d25-6a3f7e2b1c01",
        "book": book_json(),
        "schoolUdise": "10150400101",
        "school": school_json(),
        "quantity": 120,
        "received": 0,
        "status": status,
        "blockRemark": null,
        "districtRemark": null,
        "createdAt": "2025-01-05T08:00:00Z",
        "updatedAt": "2025-01-05T08:00:00Z"
    })
}

pub fn book_json() -> Value {
    json!({
        "id": "0b9df9a8-58c8-4f64-9d25-6a3f7e2b1c01",
        "title": "Ganit Class 5",
        "classLevel": "5",
        "subject": "Mathematics",
        "currentStock": 300
    })
}

pub fn school_json() -> Value {
    json!({
        "id": "4a1c6f0e-2d3b-45f6-8a79-0c1d2e3f4a05",
        "name": "Govt Middle School Rampur",
        "udise": "10150400101",
        "blockCode": "BLK-015",
        "districtCode": "DST-04"
    })
}

pub fn issue_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "issueCode": "ISS-2025-00017",
        "title": "Damaged cartons in delivery",
        "description": "Forty copies arrived water-damaged and unusable.",
        "priority": "HIGH",
        "status": status,
        "schoolUdise": "10150400101",
        "school": school_json(),
        "raisedBy": "headmaster@rampur",
        "remarksByBlock": null,
        "remarksByDistrict": null,
        "remarksByState": null,
        "createdAt": "2025-02-10T10:30:00Z",
        "updatedAt": "2025-02-10T10:30:00Z"
    })
}

pub fn notification_json(id: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "title": "Requisition window closing",
        "message": "The block window closes on 31 January.",
        "notificationType": "REMINDER",
        "priority": "HIGH",
        "senderTier": "STATE",
        "forDistricts": false,
        "forBlocks": true,
        "forSchools": false,
        "expiresAt": null,
        "isRead": is_read,
        "createdAt": "2025-01-20T09:00:00Z"
    })
}

pub fn window_json(tier: &str, start: &str, end: &str) -> Value {
    json!({
        "id": "7c2e8d4f-1a5b-4c6d-9e8f-0a1b2c3d4e5f",
        "windowType": tier,
        "startDate": start,
        "endDate": end,
        "createdAt": "2024-12-15T00:00:00Z",
        "updatedAt": "2024-12-15T00:00:00Z"
    })
}
