//! # pathya backend client
//!
//! Typed REST client for the textbook distribution backend.
//!
//! The backend owns storage, authentication, and cross-user serialization;
//! this crate owns the call contract: typed endpoint methods, the
//! `success`-flag envelope, pagination metadata, and the client-side error
//! taxonomy. No call is retried or coalesced here.
//!
//! ## Example
//!
//! ```ignore
//! use pathya_client::{BackendClient, BackendConfig};
//!
//! let config = BackendConfig::new("https://textbooks.example.gov/api")
//!     .with_bearer_token("session-token");
//! let client = BackendClient::new(config)?;
//! let schools = client.get_schools().await?;
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use envelope::{ApiEnvelope, Paginated};
pub use error::{ClientError, ClientResult};
