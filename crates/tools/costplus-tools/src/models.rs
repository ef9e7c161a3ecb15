//! Tool input contracts.
//!
//! Each struct doubles as the published MCP input schema (via schemars) and
//! the deserialization target for incoming tool arguments.

use costplus_async::ClassifiedError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest page size the upstream accepts for a single products query
pub const MAX_PAGE_SIZE: u32 = 1000;
/// Default page size when the caller does not pass `first`
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Input for the `search_medicines` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchMedicinesInput {
    /// The medication name or search term to look for (empty for all)
    #[serde(default)]
    pub query: Option<String>,
}

/// Input for the `get_collections` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetCollectionsInput {
    /// Optional search term to filter collections by name (empty for all)
    #[serde(default)]
    pub search: Option<String>,
}

/// Collection filter accepted by `get_all_products`.
///
/// Callers pass either a pre-encoded global id ("Q29sbGVjdGlvbjozMQ=="), a
/// bare numeric id (31), or an array of pre-encoded ids. All three reach the
/// upstream as the same array-of-global-ids form; see
/// [`crate::filter::normalize_collection_filter`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CollectionFilter {
    /// Array of pre-encoded collection ids
    Ids(Vec<String>),
    /// A single id: either pre-encoded, or a JSON array in string form
    Id(String),
    /// A bare numeric collection id
    Numeric(i64),
}

/// Input for the `get_all_products` tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetAllProductsInput {
    /// Cursor for previous page of results
    #[serde(default)]
    pub before: Option<String>,
    /// Cursor for next page of results
    #[serde(default)]
    pub after: Option<String>,
    /// Number of products to return from the start (default 25, max 1000)
    #[serde(default)]
    pub first: Option<u32>,
    /// Number of products to return from the end (max 1000)
    #[serde(default)]
    pub last: Option<u32>,
    /// Collection id(s) to filter by category
    #[serde(default)]
    pub collection: Option<CollectionFilter>,
}

impl GetAllProductsInput {
    /// Checks the page-size bounds before anything reaches the network.
    ///
    /// # Errors
    ///
    /// Returns a validation [`ClassifiedError`] when `first` or `last` falls
    /// outside `1..=1000`.
    pub fn validate(&self) -> Result<(), ClassifiedError> {
        for (field, value) in [("first", self.first), ("last", self.last)] {
            if let Some(n) = value {
                if !(1..=MAX_PAGE_SIZE).contains(&n) {
                    return Err(ClassifiedError::validation(
                        format!("'{field}' must be between 1 and {MAX_PAGE_SIZE}, got {n}"),
                        "get_all_products input",
                    ));
                }
            }
        }
        Ok(())
    }
}
