//! Request and response types for the storefront GraphQL API

/// Collection (medication category) types
pub mod collection;
/// Shared GraphQL wire types
pub mod common;
/// Product and medication types
pub mod product;

pub use collection::*;
pub use common::*;
pub use product::*;
