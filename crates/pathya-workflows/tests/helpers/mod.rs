//! Shared fixtures for workflow integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::MockServer;

use pathya_client::{BackendClient, BackendConfig};

pub const BOOK_ID: &str = "0b9df9a8-58c8-4f64-9d25-6a3f7e2b1c01";
pub const SCHOOL_IN_BLOCK: &str = "10150400101";
pub const SCHOOL_OUTSIDE: &str = "10169900202";

/// Build a client pointing at the mock backend.
pub fn client(server: &MockServer) -> BackendClient {
    let config = BackendConfig::new(server.uri()).with_bearer_token("test-token-123");
    BackendClient::with_http_client(config, reqwest::Client::new()).unwrap()
}

pub fn ok_envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn paged_envelope(items: Value, page: u32, total_pages: u32) -> Value {
    json!({
        "success": true,
        "data": items,
        "page": page,
        "totalPages": total_pages,
    })
}

pub fn school_json(udise: &str, block_code: &str, district_code: &str) -> Value {
    json!({
        "id": "4a1c6f0e-2d3b-45f6-8a79-0c1d2e3f4a05",
        "name": format!("Govt Middle School {udise}"),
        "udise": udise,
        "blockCode": block_code,
        "districtCode": district_code
    })
}

pub fn book_json(stock: u32) -> Value {
    json!({
        "id": BOOK_ID,
        "title": "Ganit Class 5",
        "classLevel": "5",
        "subject": "Mathematics",
        "currentStock": stock
    })
}

pub fn requisition_json(id: &str, status: &str, udise: &str, block: &str) -> Value {
    json!({
        "id": id,
        "reqCode": format!("REQ-{}", &id[..8]),
        "bookId": BOOK_ID,
        "book": book_json(300),
        "schoolUdise": udise,
        "school": school_json(udise, block, "DST-04"),
        "quantity": 120,
        "received": 0,
        "status": status,
        "blockRemark": null,
        "districtRemark": null,
        "createdAt": "2025-01-05T08:00:00Z",
        "updatedAt": "2025-01-05T08:00:00Z"
    })
}

pub fn issue_json(id: &str, status: &str, priority: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "issueCode": format!("ISS-{}", &id[..8]),
        "title": "Damaged cartons in delivery",
        "description": "Forty copies arrived water-damaged and unusable.",
        "priority": priority,
        "status": status,
        "schoolUdise": SCHOOL_IN_BLOCK,
        "school": school_json(SCHOOL_IN_BLOCK, "BLK-015", "DST-04"),
        "raisedBy": "headmaster@rampur",
        "remarksByBlock": null,
        "remarksByDistrict": null,
        "remarksByState": null,
        "createdAt": created_at,
        "updatedAt": created_at
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

pub fn stats_json(total: u32, unread: u32) -> Value {
    json!({ "total": total, "unread": unread })
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
