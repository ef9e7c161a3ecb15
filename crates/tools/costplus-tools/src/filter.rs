//! Collection-filter normalization and client-side product filtering.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use costplus_async::types::SearchMedicinesResponse;

use crate::models::CollectionFilter;

/// Encodes a bare numeric collection id as the upstream's global id form.
///
/// 31 becomes `base64("Collection:31")`, i.e. `Q29sbGVjdGlvbjozMQ==`, which
/// is byte-identical to the pre-encoded form callers may pass directly.
#[must_use]
pub fn encode_collection_id(id: i64) -> String {
    BASE64.encode(format!("Collection:{id}"))
}

/// Normalizes the three accepted collection filter shapes into the
/// array-of-global-ids form the upstream query expects.
///
/// A string that parses as a JSON array of strings is expanded; any other
/// string (including malformed JSON) is kept as a single id. The fallback
/// can mask caller typos, but it matches the long-standing upstream
/// behavior, so stricter validation would be a breaking change.
#[must_use]
pub fn normalize_collection_filter(filter: Option<CollectionFilter>) -> Option<Vec<String>> {
    match filter? {
        CollectionFilter::Ids(ids) => Some(ids),
        CollectionFilter::Numeric(id) => Some(vec![encode_collection_id(id)]),
        CollectionFilter::Id(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Some(ids),
            Err(_) => Some(vec![raw]),
        },
    }
}

/// Filters a search response down to products whose name, brand name, or any
/// collection name contains the query, case-insensitively.
///
/// An empty or whitespace-only query leaves the response untouched. The
/// filter is applied after the upstream's own `medicationSearch` matching,
/// which is broader than name-only.
pub fn filter_products(response: &mut SearchMedicinesResponse, query: &str) {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return;
    }

    response.data.products.edges.retain(|edge| {
        let product = &edge.node;
        let name_match = product.name.to_lowercase().contains(&needle);
        let brand_match = product
            .metafields
            .brand_name
            .as_ref()
            .is_some_and(|b| b.to_lowercase().contains(&needle));
        let collections_match = product
            .collections
            .iter()
            .any(|c| c.name.to_lowercase().contains(&needle));

        name_match || brand_match || collections_match
    });
}
