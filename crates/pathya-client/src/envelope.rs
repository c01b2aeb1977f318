//! Response envelope and pagination wrappers.
//!
//! Every backend response body carries a `success` flag in addition to the
//! HTTP status; both must be checked. Paged list responses additionally
//! carry `page` and `totalPages`.

use crate::error::{ClientError, ClientResult};
use serde::Deserialize;

/// The JSON body wrapper returned by every backend endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Backend-reported outcome. A 2xx response with `success: false` is an
    /// error from the caller's point of view.
    pub success: bool,

    /// Human-readable message, present on failures and some mutations.
    #[serde(default)]
    pub message: Option<String>,

    /// The payload. Absent on failures and on empty lookups.
    #[serde(default)]
    pub data: Option<T>,

    /// Current page, on paged list responses.
    #[serde(default)]
    pub page: Option<u32>,

    /// Total page count, on paged list responses.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, enforcing the `success` flag.
    pub fn into_data(self) -> ClientResult<T> {
        if !self.success {
            return Err(ClientError::Backend {
                message: self
                    .message
                    .unwrap_or_else(|| "unspecified backend failure".to_string()),
            });
        }
        self.data
            .ok_or_else(|| ClientError::Parse("response envelope carried no data".to_string()))
    }

    /// Unwrap the payload as an optional lookup: `success` with no data is
    /// a miss, not an error.
    pub fn into_optional(self) -> ClientResult<Option<T>> {
        if !self.success {
            return Err(ClientError::Backend {
                message: self
                    .message
                    .unwrap_or_else(|| "unspecified backend failure".to_string()),
            });
        }
        Ok(self.data)
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// Unwrap a paged list response into a [`Paginated`].
    pub fn into_page(self) -> ClientResult<Paginated<T>> {
        let page = self.page.unwrap_or(1);
        let total_pages = self.total_pages.unwrap_or(1);
        let items = self.into_data()?;
        Ok(Paginated {
            items,
            page,
            total_pages,
        })
    }
}

/// One page of a paged list response.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Total number of pages reported by the backend.
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Whether pages remain after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_false_becomes_backend_error() {
        let envelope: ApiEnvelope<u32> = serde_json::from_str(
            r#"{"success": false, "message": "requisition window closed"}"#,
        )
        .unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, ClientError::Backend { .. }));
        assert!(err.to_string().contains("requisition window closed"));
    }

    #[test]
    fn success_with_data_unwraps() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": 7}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), 7);
    }

    #[test]
    fn optional_lookup_miss_is_none() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(envelope.into_optional().unwrap(), None);
    }

    #[test]
    fn page_metadata_defaults_to_single_page() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        let page = envelope.into_page().unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more());
    }

    #[test]
    fn has_more_tracks_total_pages() {
        let envelope: ApiEnvelope<Vec<u32>> = serde_json::from_str(
            r#"{"success": true, "data": [1], "page": 1, "totalPages": 3}"#,
        )
        .unwrap();
        let page = envelope.into_page().unwrap();
        assert!(page.has_more());
    }
}
