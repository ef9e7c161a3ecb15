//! Cost Plus Drugs medication tools.
//!
//! Three read-only operations over the storefront GraphQL API (medication
//! search, category listing, paginated product listing), each a thin
//! validate/call/wrap pipeline over [`costplus_async::Client`]. Every
//! invocation returns a uniform [`Envelope`]; raw errors never cross the
//! tool boundary.

/// Static collections snapshot served as an MCP resource
pub mod collections;
/// The uniform success/failure response envelope
pub mod envelope;
/// Collection-filter normalization and client-side product filtering
pub mod filter;
/// Tool input contracts and validation
pub mod models;
/// rmcp server handler
pub mod server;

use std::sync::Arc;
use std::time::Instant;

use costplus_async::Client;
use costplus_async::types::{
    GetAllProductsVariables, GetCollectionPathsVariables, OrderDirection, ProductOrderField,
    SearchMedicinesVariables,
};

pub use crate::envelope::{Envelope, FailureContext};
pub use crate::models::{GetAllProductsInput, GetCollectionsInput, SearchMedicinesInput};
pub use crate::server::CostPlusServer;

// Re-export rmcp types for convenience
pub use rmcp::transport::stdio;
pub use rmcp::{ServerHandler, service::ServiceExt};

/// The tool service: one API client shared by every handler.
///
/// Constructed once at startup and handed to the server; holds no
/// per-request mutable state.
#[derive(Clone)]
pub struct CostPlusTools {
    client: Arc<Client>,
}

impl Default for CostPlusTools {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl CostPlusTools {
    /// Creates the service around an existing client
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Returns the underlying API client
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn wrap<T: serde::Serialize>(
        payload: &T,
        started: Instant,
        tool_name: &'static str,
        user_input: serde_json::Value,
    ) -> Envelope {
        match serde_json::to_value(payload) {
            Ok(data) => Envelope::success(data, started),
            Err(e) => Envelope::failure(
                costplus_async::ClassifiedError::unknown(
                    format!("failed to serialize tool payload: {e}"),
                    tool_name,
                ),
                None,
                FailureContext {
                    tool_name,
                    user_input,
                },
            ),
        }
    }

    /// Search for medications by name.
    ///
    /// Calls the upstream search and then narrows the result client-side to
    /// products whose name, brand name, or collection name contains the
    /// query, which is stricter than the upstream's own matching. An empty
    /// query returns the unfiltered result.
    pub async fn search_medicines(&self, input: SearchMedicinesInput) -> Envelope {
        const TOOL: &str = "search_medicines";
        let started = Instant::now();
        tracing::debug!(query = ?input.query, "tool invocation");
        let user_input = serde_json::to_value(&input).unwrap_or(serde_json::Value::Null);

        let query = input.query.unwrap_or_default();
        let variables = SearchMedicinesVariables {
            medication_search: Some(query.clone()),
        };

        match self.client.medications().search(variables).await {
            Ok(mut response) => {
                filter::filter_products(&mut response, &query);
                Self::wrap(&response, started, TOOL, user_input)
            }
            Err(error) => Envelope::failure(
                error,
                None,
                FailureContext {
                    tool_name: TOOL,
                    user_input,
                },
            ),
        }
    }

    /// List medication categories, optionally narrowed by a search term
    pub async fn get_collections(&self, input: GetCollectionsInput) -> Envelope {
        const TOOL: &str = "get_collections";
        let started = Instant::now();
        tracing::debug!(search = ?input.search, "tool invocation");
        let user_input = serde_json::to_value(&input).unwrap_or(serde_json::Value::Null);

        let variables = GetCollectionPathsVariables {
            search: Some(input.search.unwrap_or_default()),
        };

        match self.client.collections().paths(variables).await {
            Ok(response) => Self::wrap(&response, started, TOOL, user_input),
            Err(error) => Envelope::failure(
                error,
                None,
                FailureContext {
                    tool_name: TOOL,
                    user_input,
                },
            ),
        }
    }

    /// Page through the product catalog, always sorted by name ascending.
    ///
    /// Page-size bounds are checked before the network is touched; an
    /// out-of-range `first`/`last` produces a validation failure envelope.
    pub async fn get_all_products(&self, input: GetAllProductsInput) -> Envelope {
        const TOOL: &str = "get_all_products";
        let started = Instant::now();
        tracing::debug!(first = ?input.first, last = ?input.last, "tool invocation");
        let user_input = serde_json::to_value(&input).unwrap_or(serde_json::Value::Null);

        if let Err(error) = input.validate() {
            error.log(TOOL);
            return Envelope::failure(
                error,
                None,
                FailureContext {
                    tool_name: TOOL,
                    user_input,
                },
            );
        }

        let collection = filter::normalize_collection_filter(input.collection);
        let variables = GetAllProductsVariables {
            before: input.before,
            after: input.after,
            first: Some(input.first.unwrap_or(models::DEFAULT_PAGE_SIZE) as i32),
            last: input.last.map(|n| n as i32),
            direction: OrderDirection::Asc,
            product_order_field: ProductOrderField::Name,
            collection,
        };

        match self.client.products().list(variables).await {
            Ok(response) => Self::wrap(&response, started, TOOL, user_input),
            Err(error) => Envelope::failure(
                error,
                None,
                FailureContext {
                    tool_name: TOOL,
                    user_input,
                },
            ),
        }
    }
}
