//! State fulfillment: work orders and installments.
//!
//! The state tier aggregates demand by book across every requesting school,
//! compares it with centrally held stock, and issues partial installments
//! against individual approved requisitions. Installment quantities are
//! clamped client-side so fulfilled amounts never exceed the request and
//! stock never goes negative through this path; serializing concurrent
//! stock mutations is the backend's contract, helped along by an
//! idempotency key on every installment patch.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};
use uuid::Uuid;

use pathya_client::models::{Book, BookStockPatch, Requisition, RequisitionPatch};
use pathya_client::BackendClient;
use pathya_core::{BookId, RequisitionStatus};

use crate::error::{WorkflowError, WorkflowResult};

/// Largest operator-selectable buffer on top of calculated demand.
const MAX_ADDITIONAL_PERCENT: u8 = 15;

/// Aggregate demand for one book across all requesting schools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrderLine {
    pub book_id: BookId,
    pub book_title: String,
    /// Sum of requested quantities over pending and approved requisitions.
    pub total_requested: u32,
    /// Sum of already-fulfilled quantities.
    pub total_received: u32,
    /// Copies currently held in the central store.
    pub current_stock: u32,
    /// Shortfall against current stock: `max(0, requested - stock)`.
    pub calculated_requisition: u32,
    /// Shortfall plus the operator's buffer percentage, rounded.
    pub actual_requisition: u32,
}

/// Aggregate pending and approved requisitions into per-book work-order
/// lines, ordered by book title.
///
/// `additional_percent` is the operator's buffer on top of the calculated
/// shortfall, bounded to 0..=15.
pub fn compute_work_order(
    requisitions: &[Requisition],
    books: &[Book],
    additional_percent: u8,
) -> WorkflowResult<Vec<WorkOrderLine>> {
    if additional_percent > MAX_ADDITIONAL_PERCENT {
        return Err(WorkflowError::validation(
            "additionalPercent",
            format!("buffer must be between 0 and {MAX_ADDITIONAL_PERCENT} percent"),
        ));
    }

    let catalog: HashMap<BookId, &Book> = books.iter().map(|b| (b.id, b)).collect();

    // Keyed by title for stable display order, disambiguated by id.
    let mut lines: BTreeMap<(String, Uuid), WorkOrderLine> = BTreeMap::new();
    for requisition in requisitions {
        if !requisition.status.counts_toward_demand() {
            continue;
        }
        let book = catalog.get(&requisition.book_id);
        let title = book
            .map(|b| b.title.clone())
            .or_else(|| requisition.book.as_ref().map(|b| b.title.clone()))
            .unwrap_or_else(|| requisition.book_id.to_string());
        if book.is_none() {
            warn!(
                "requisition {} names book {} missing from the catalog; stock treated as zero",
                requisition.req_code, requisition.book_id
            );
        }

        let line = lines
            .entry((title.clone(), *requisition.book_id.as_uuid()))
            .or_insert_with(|| WorkOrderLine {
                book_id: requisition.book_id,
                book_title: title,
                total_requested: 0,
                total_received: 0,
                current_stock: book.map_or(0, |b| b.current_stock),
                calculated_requisition: 0,
                actual_requisition: 0,
            });
        line.total_requested += requisition.quantity;
        line.total_received += requisition.received;
    }

    let mut ordered: Vec<WorkOrderLine> = lines.into_values().collect();
    for line in &mut ordered {
        line.calculated_requisition = line.total_requested.saturating_sub(line.current_stock);
        line.actual_requisition =
            line.calculated_requisition + buffer_amount(line.calculated_requisition, additional_percent);
    }
    Ok(ordered)
}

/// The buffered addition: `round(calculated * percent / 100)`.
fn buffer_amount(calculated: u32, percent: u8) -> u32 {
    ((f64::from(calculated) * f64::from(percent)) / 100.0).round() as u32
}

/// Outcome of a sent installment.
#[derive(Debug, Clone)]
pub struct InstallmentOutcome {
    /// The requisition after the patch, as returned by the backend.
    pub requisition: Requisition,
    /// The book after its stock decrement.
    pub book: Book,
    /// Copies sent in this installment.
    pub sent: u32,
    /// Whether the requisition reached completion.
    pub completed: bool,
}

/// Issues installments against individual requisitions.
#[derive(Debug, Clone)]
pub struct FulfillmentService {
    client: BackendClient,
}

impl FulfillmentService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// The largest installment permissible for a requisition given the
    /// book's available stock.
    #[must_use]
    pub fn max_installment(requisition: &Requisition, available_stock: u32) -> u32 {
        requisition.outstanding().min(available_stock)
    }

    /// Send `quantity` copies against an approved requisition.
    ///
    /// Validated before any network call: the requisition must be
    /// `APPROVED`, the quantity positive, within the outstanding amount,
    /// and within the book's current stock. On success the requisition's
    /// `received` is advanced (reaching the requested quantity completes
    /// it) and the book's central stock is decremented by the same amount.
    ///
    /// The requisition patch carries an idempotency key; a 409 conflict
    /// from the backend is surfaced for the operator to re-check stock and
    /// is never retried here.
    pub async fn send_installment(
        &self,
        requisition: &Requisition,
        book: &Book,
        quantity: u32,
    ) -> WorkflowResult<InstallmentOutcome> {
        if requisition.status != RequisitionStatus::Approved {
            return Err(WorkflowError::InvalidTransition {
                status: requisition.status.to_string(),
                action: "send installment",
            });
        }
        if book.id != requisition.book_id {
            return Err(WorkflowError::validation(
                "book",
                "stock record does not belong to the requisitioned book",
            ));
        }
        if quantity == 0 {
            return Err(WorkflowError::validation(
                "quantity",
                "installment quantity must be positive",
            ));
        }
        let ceiling = Self::max_installment(requisition, book.current_stock);
        if quantity > ceiling {
            return Err(WorkflowError::validation(
                "quantity",
                format!(
                    "installment of {quantity} exceeds the permissible maximum of {ceiling}"
                ),
            ));
        }

        let received = requisition.received + quantity;
        let completed = received >= requisition.quantity;
        let patch = RequisitionPatch {
            received: Some(received),
            status: completed.then_some(RequisitionStatus::Completed),
            ..Default::default()
        };
        let updated = self
            .client
            .update_requisition_idempotent(requisition.id, &patch, Uuid::new_v4())
            .await?;

        let stock_patch = BookStockPatch {
            current_stock: book.current_stock - quantity,
        };
        let updated_book = match self.client.update_book_stock(book.id, &stock_patch).await {
            Ok(book) => book,
            Err(e) => {
                // The requisition advanced but the stock write failed; the
                // ledger is now the backend's to reconcile. Surface it.
                warn!(
                    "stock decrement for book {} failed after requisition {} advanced: {e}",
                    book.id, requisition.req_code
                );
                return Err(e.into());
            }
        };

        info!(
            "sent {} copies of {} against {} ({} of {} fulfilled)",
            quantity, book.title, requisition.req_code, received, requisition.quantity
        );
        Ok(InstallmentOutcome {
            requisition: updated,
            book: updated_book,
            sent: quantity,
            completed,
        })
    }
}
