use serde::{Deserialize, Serialize};

use super::common::{Edge, Extensions, PageInfo};

/// Variables for the `SearchMedicines` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMedicinesVariables {
    /// Free-text medication search term; empty for all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_search: Option<String>,
}

/// Sort direction for product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Sort field for product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductOrderField {
    /// Sort by product name
    Name,
    /// Sort by price
    Price,
    /// Sort by publication date
    Date,
}

/// Variables for the `GetAllProducts` query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllProductsVariables {
    /// Cursor for the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Cursor for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Page size counted from the start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i32>,
    /// Page size counted from the end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i32>,
    /// Sort direction
    pub direction: OrderDirection,
    /// Sort field
    pub product_order_field: ProductOrderField,
    /// Collection ids to filter by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<String>>,
}

/// Reference to a collection a product belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCollectionRef {
    /// Collection display name
    #[serde(default)]
    pub name: String,
    /// Collection slug
    #[serde(default)]
    pub slug: Option<String>,
}

/// Product-level metafields.
///
/// Key naming mirrors the upstream metafield keys, which mix camelCase and
/// snake_case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductMetafields {
    /// Brand vs generic marker
    #[serde(default, rename = "brandGeneric", skip_serializing_if = "Option::is_none")]
    pub brand_generic: Option<String>,
    /// Brand name, when the product has one
    #[serde(default, rename = "brandName", skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// External promotion marker
    #[serde(default, rename = "external_promotion", skip_serializing_if = "Option::is_none")]
    pub external_promotion: Option<String>,
    /// Full display name of the medication
    #[serde(
        default,
        rename = "medication_full_display_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub medication_full_display_name: Option<String>,
}

/// Product variant image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantImage {
    /// Image URL
    #[serde(default)]
    pub url: String,
}

/// A purchasable product variant (form/strength/package combination)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant id
    #[serde(default)]
    pub id: String,
    /// Stock-keeping unit
    #[serde(default)]
    pub sku: Option<String>,
    /// Variant metafields; a free-form key/value object upstream
    #[serde(default)]
    pub metafields: serde_json::Value,
    /// Variant images
    #[serde(default)]
    pub images: Vec<VariantImage>,
    /// Whether this is a specialty medication
    #[serde(default)]
    pub specialty_medication: Option<bool>,
}

/// A medication product node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    /// Opaque product id
    pub id: String,
    /// Product name
    #[serde(default)]
    pub name: String,
    /// Product slug
    #[serde(default)]
    pub slug: Option<String>,
    /// Collections this product belongs to
    #[serde(default)]
    pub collections: Vec<ProductCollectionRef>,
    /// Upstream price calculation blob
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_calculation: Option<serde_json::Value>,
    /// Retail price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    /// Product variants
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Whether the product is currently available
    #[serde(default)]
    pub is_available: Option<bool>,
    /// Product metafields
    #[serde(default)]
    pub metafields: ProductMetafields,
}

/// A page of products
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    /// Product edges
    #[serde(default)]
    pub edges: Vec<Edge<ProductNode>>,
    /// Total matching products, when the query requests it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    /// Pagination info, when the query requests it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

/// Payload of a products query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsData {
    /// The product connection
    #[serde(default)]
    pub products: ProductConnection,
}

/// Response to the `SearchMedicines` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMedicinesResponse {
    /// Response payload
    #[serde(default)]
    pub data: ProductsData,
    /// Response extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

/// Response to the `GetAllProducts` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetAllProductsResponse {
    /// Response payload
    #[serde(default)]
    pub data: ProductsData,
    /// Response extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}
