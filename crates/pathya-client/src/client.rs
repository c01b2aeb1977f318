//! Distribution backend HTTP client (reqwest-based).
//!
//! One typed method per backend call, grouped by resource. Every response
//! is checked twice: the HTTP status first, then the `success` flag inside
//! the body envelope. Nothing here retries; a failed call is surfaced and
//! the caller re-triggers it.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use pathya_core::{AdminTier, BookId, IssueId, NotificationId, RequisitionId, SchoolId};

use crate::config::BackendConfig;
use crate::envelope::{ApiEnvelope, Paginated};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Book, BookStockPatch, CreateIssuePayload, CreateNotificationPayload, Issue, IssueListParams,
    IssueReviewPayload, Notification, NotificationListParams, NotificationStats, Requisition,
    RequisitionListParams, RequisitionPatch, RequisitionWindow, School, UpsertWindowPayload,
};

/// Header carried by installment patches so the backend can deduplicate a
/// resubmitted stock mutation.
const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Typed client for the distribution backend.
///
/// The [`std::fmt::Debug`] impl redacts the bearer token.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    bearer_token: Option<String>,
    http_client: Client,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl BackendClient {
    /// Build a client from configuration.
    pub fn new(config: BackendConfig) -> ClientResult<Self> {
        config.validate()?;
        let http_client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.tls_verify())
            .user_agent("pathya-client/0.1")
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            bearer_token: config.bearer_token().map(str::to_string),
            http_client,
        })
    }

    /// Build a client with a pre-built `reqwest::Client` (for testing).
    pub fn with_http_client(config: BackendConfig, http_client: Client) -> ClientResult<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.base_url().to_string(),
            bearer_token: config.bearer_token().map(str::to_string),
            http_client,
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Schools ───────────────────────────────────────────────────────

    /// List all schools (GET /schools).
    pub async fn get_schools(&self) -> ClientResult<Vec<School>> {
        self.get(&self.url("/schools"), &[]).await?.into_data()
    }

    /// Get a school by id (GET /schools/:id).
    pub async fn get_school(&self, id: SchoolId) -> ClientResult<School> {
        self.get(&self.url(&format!("/schools/{id}")), &[])
            .await?
            .into_data()
    }

    /// Get a school by UDISE code (GET /schools/udise/:udise).
    pub async fn get_school_by_udise(&self, udise: &str) -> ClientResult<School> {
        self.get(&self.url(&format!("/schools/udise/{udise}")), &[])
            .await?
            .into_data()
    }

    // ── Books ─────────────────────────────────────────────────────────

    /// List the book catalog with central stock (GET /books).
    pub async fn get_books(&self) -> ClientResult<Vec<Book>> {
        self.get(&self.url("/books"), &[]).await?.into_data()
    }

    /// Replace the central stock figure for a book (PATCH /books/:id/stock).
    pub async fn update_book_stock(
        &self,
        id: BookId,
        patch: &BookStockPatch,
    ) -> ClientResult<Book> {
        self.patch(&self.url(&format!("/books/{id}/stock")), patch, None)
            .await?
            .into_data()
    }

    // ── Requisitions ──────────────────────────────────────────────────

    /// List requisitions, paged (GET /requisitions).
    pub async fn list_requisitions(
        &self,
        params: &RequisitionListParams,
    ) -> ClientResult<Paginated<Requisition>> {
        self.get(&self.url("/requisitions"), &params.to_query())
            .await?
            .into_page()
    }

    /// List requisitions scoped to one block (GET /requisitions/block/:code).
    pub async fn list_requisitions_by_block(
        &self,
        block_code: &str,
    ) -> ClientResult<Vec<Requisition>> {
        self.get(&self.url(&format!("/requisitions/block/{block_code}")), &[])
            .await?
            .into_data()
    }

    /// Apply a partial patch to a requisition (PATCH /requisitions/:id).
    pub async fn update_requisition(
        &self,
        id: RequisitionId,
        patch: &RequisitionPatch,
    ) -> ClientResult<Requisition> {
        self.patch(&self.url(&format!("/requisitions/{id}")), patch, None)
            .await?
            .into_data()
    }

    /// Apply an installment patch with an idempotency key, so the backend
    /// can serialize and deduplicate the stock mutation.
    pub async fn update_requisition_idempotent(
        &self,
        id: RequisitionId,
        patch: &RequisitionPatch,
        idempotency_key: Uuid,
    ) -> ClientResult<Requisition> {
        self.patch(
            &self.url(&format!("/requisitions/{id}")),
            patch,
            Some(idempotency_key),
        )
        .await?
        .into_data()
    }

    // ── Issues ────────────────────────────────────────────────────────

    /// List issues (GET /issues).
    pub async fn list_issues(&self, params: &IssueListParams) -> ClientResult<Vec<Issue>> {
        self.get(&self.url("/issues"), &params.to_query())
            .await?
            .into_data()
    }

    /// Raise a new issue (POST /issues).
    pub async fn create_issue(&self, payload: &CreateIssuePayload) -> ClientResult<Issue> {
        self.post(&self.url("/issues"), payload).await?.into_data()
    }

    /// Submit a block-tier review decision (POST /issues/:id/review/block).
    pub async fn review_issue_at_block(
        &self,
        id: IssueId,
        payload: &IssueReviewPayload,
    ) -> ClientResult<Issue> {
        self.review_issue(id, "block", payload).await
    }

    /// Submit a district-tier review decision
    /// (POST /issues/:id/review/district).
    pub async fn review_issue_at_district(
        &self,
        id: IssueId,
        payload: &IssueReviewPayload,
    ) -> ClientResult<Issue> {
        self.review_issue(id, "district", payload).await
    }

    /// Submit a state-tier review decision (POST /issues/:id/review/state).
    pub async fn review_issue_at_state(
        &self,
        id: IssueId,
        payload: &IssueReviewPayload,
    ) -> ClientResult<Issue> {
        self.review_issue(id, "state", payload).await
    }

    async fn review_issue(
        &self,
        id: IssueId,
        tier_segment: &str,
        payload: &IssueReviewPayload,
    ) -> ClientResult<Issue> {
        self.post(
            &self.url(&format!("/issues/{id}/review/{tier_segment}")),
            payload,
        )
        .await?
        .into_data()
    }

    // ── Notifications ─────────────────────────────────────────────────

    /// List notifications targeted at the caller, paged, newest first
    /// (GET /notifications).
    pub async fn list_notifications(
        &self,
        params: &NotificationListParams,
    ) -> ClientResult<Paginated<Notification>> {
        self.get(&self.url("/notifications"), &params.to_query())
            .await?
            .into_page()
    }

    /// Create a broadcast (POST /notifications).
    pub async fn create_notification(
        &self,
        payload: &CreateNotificationPayload,
    ) -> ClientResult<Notification> {
        self.post(&self.url("/notifications"), payload)
            .await?
            .into_data()
    }

    /// Mark a notification read for the caller. Idempotent on the backend
    /// (POST /notifications/:id/read).
    pub async fn mark_notification_read(&self, id: NotificationId) -> ClientResult<Notification> {
        self.post(
            &self.url(&format!("/notifications/{id}/read")),
            &serde_json::json!({}),
        )
        .await?
        .into_data()
    }

    /// Read statistics for the caller's feed (GET /notifications/stats).
    pub async fn notification_stats(
        &self,
        params: &NotificationListParams,
    ) -> ClientResult<NotificationStats> {
        self.get(&self.url("/notifications/stats"), &params.to_query())
            .await?
            .into_data()
    }

    // ── Requisition windows ───────────────────────────────────────────

    /// List all configured windows (GET /requisition-windows).
    pub async fn get_requisition_windows(&self) -> ClientResult<Vec<RequisitionWindow>> {
        self.get(&self.url("/requisition-windows"), &[])
            .await?
            .into_data()
    }

    /// Create or replace a tier's window (POST /requisition-windows).
    pub async fn upsert_requisition_window(
        &self,
        payload: &UpsertWindowPayload,
    ) -> ClientResult<RequisitionWindow> {
        self.post(&self.url("/requisition-windows"), payload)
            .await?
            .into_data()
    }

    /// Fetch the window record gating a tier, or `None` if the tier has no
    /// window configured (GET /requisition-windows/status/:tier).
    pub async fn check_window_status(
        &self,
        tier: AdminTier,
    ) -> ClientResult<Option<RequisitionWindow>> {
        match self
            .get(&self.url(&format!("/requisition-windows/status/{tier}")), &[])
            .await
        {
            Ok(envelope) => envelope.into_optional(),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ── Internal HTTP methods ─────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ClientResult<ApiEnvelope<T>> {
        debug!("GET {} (query={:?})", url, query);
        let mut builder = self.http_client.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let response = self.authorize(builder).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiEnvelope<T>> {
        debug!("POST {}", url);
        let builder = self.http_client.post(url).json(body);
        let response = self.authorize(builder).send().await?;
        self.handle_response(response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        idempotency_key: Option<Uuid>,
    ) -> ClientResult<ApiEnvelope<T>> {
        debug!("PATCH {} (idempotency_key={:?})", url, idempotency_key);
        let mut builder = self.http_client.patch(url).json(body);
        if let Some(key) = idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key.to_string());
        }
        let response = self.authorize(builder).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<ApiEnvelope<T>> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| ClientError::Parse(format!("Failed to parse response: {e}")));
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        // Failure bodies usually carry the envelope too; prefer its message.
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or(body);

        warn!("backend call failed: HTTP {} ({})", status, message);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
            _ => Err(ClientError::Http {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
