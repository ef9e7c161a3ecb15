//! API resource implementations for the Cost Plus Drugs client

/// Collections (medication categories) resource
pub mod collections;
/// Medication search resource
pub mod medications;
/// Paginated product listing resource
pub mod products;

pub use collections::Collections;
pub use medications::Medications;
pub use products::Products;
