//! Strongly typed identifiers.
//!
//! Newtype wrappers around [`Uuid`] for every entity the backend addresses
//! by id. The wrappers prevent passing a requisition id where an issue id is
//! expected at compile time.
//!
//! # Example
//!
//! ```
//! use pathya_core::{IssueId, RequisitionId};
//!
//! let requisition = RequisitionId::new();
//! let issue = IssueId::new();
//!
//! fn requires_requisition(id: RequisitionId) -> String {
//!     id.to_string()
//! }
//!
//! let _ = requires_requisition(requisition);
//! // requires_requisition(issue); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The underlying UUID parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier for a book requisition raised by a school.
    RequisitionId
);

define_id!(
    /// Identifier for a problem report escalating through the review tiers.
    IssueId
);

define_id!(
    /// Identifier for a broadcast notification.
    NotificationId
);

define_id!(
    /// Identifier for a requisition submission window record.
    WindowId
);

define_id!(
    /// Identifier for a book in the central catalog.
    BookId
);

define_id!(
    /// Identifier for a school. Schools are also addressable by their UDISE
    /// code, which is a separate string key, not this id.
    SchoolId
);
