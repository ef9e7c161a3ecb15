use serde::{Deserialize, Serialize};

use super::common::{Edge, Extensions};

/// Variables for the `GetCollectionPaths` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCollectionPathsVariables {
    /// Optional substring filter applied server-side; empty for all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// An upstream medication category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionNode {
    /// Opaque (base64-encoded) collection id
    pub id: String,
    /// Collection display name
    #[serde(default)]
    pub name: String,
    /// URL slug
    #[serde(default)]
    pub slug: Option<String>,
}

/// A page of collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConnection {
    /// Collection edges
    #[serde(default)]
    pub edges: Vec<Edge<CollectionNode>>,
}

/// Payload of a collections query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionsData {
    /// The collection connection
    #[serde(default)]
    pub collections: CollectionConnection,
}

/// Response to the `GetCollectionPaths` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCollectionPathsResponse {
    /// Response payload
    #[serde(default)]
    pub data: CollectionsData,
    /// Response extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}
