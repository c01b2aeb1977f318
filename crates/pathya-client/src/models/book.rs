//! Book catalog entities.

use pathya_core::BookId;
use serde::{Deserialize, Serialize};

/// A book in the central catalog, including the centrally held stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,

    /// Title as printed.
    pub title: String,

    /// Class/grade the book is prescribed for.
    pub class_level: String,

    /// Subject taught from the book.
    pub subject: String,

    /// Copies currently held in the central store.
    pub current_stock: u32,
}

/// Partial patch for the central stock of a book.
///
/// Stock is only ever decremented through installment sending; this patch
/// carries the resulting absolute value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStockPatch {
    pub current_stock: u32,
}
