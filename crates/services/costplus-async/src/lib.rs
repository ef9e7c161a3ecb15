//! Async Cost Plus Drugs storefront API client with typed GraphQL
//! requests/responses, bounded linear-backoff retries, and per-request
//! correlation ids.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Correlation id generation
pub mod correlation;
/// Error types and failure classification
pub mod error;
/// Health probe and verdict
pub mod health;
/// API resource implementations
pub mod resources;
/// Retry policy
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::CostPlusConfig;
pub use crate::error::{ClassifiedError, DispatchFailure, ErrorKind, Severity};
pub use crate::health::{HealthStatus, HealthVerdict};
pub use crate::retry::RetryPolicy;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, CostPlusConfig};
}
