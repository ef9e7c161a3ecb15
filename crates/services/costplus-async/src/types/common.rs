use serde::{Deserialize, Serialize};

/// The wire shape of a GraphQL POST body: `{query, variables}`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    /// GraphQL query document
    pub query: &'a str,
    /// Query variables
    pub variables: V,
}

/// A relay-style connection edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    /// The wrapped node
    pub node: T,
}

/// Relay-style pagination info
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the first edge on this page
    #[serde(default)]
    pub start_cursor: Option<String>,
    /// Cursor of the last edge on this page
    #[serde(default)]
    pub end_cursor: Option<String>,
    /// Whether a next page exists
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether a previous page exists
    #[serde(default)]
    pub has_previous_page: bool,
}

/// GraphQL response extensions block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extensions {
    /// Query cost accounting, when the upstream reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<QueryCost>,
}

/// Query cost accounting reported by the upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCost {
    /// Cost of the executed query
    #[serde(default)]
    pub requested_query_cost: Option<f64>,
    /// Remaining budget
    #[serde(default)]
    pub maximum_available: Option<f64>,
}
