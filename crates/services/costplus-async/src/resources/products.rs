use crate::{
    client::Client,
    error::ClassifiedError,
    types::{GetAllProductsResponse, GetAllProductsVariables},
};

/// The `GetAllProducts` query document.
///
/// Cursor pagination plus sorting and an optional collection filter; the
/// collection ids must already be base64 `Collection:{n}` global ids.
pub const GET_ALL_PRODUCTS_QUERY: &str = r#"
query GetAllProducts(
  $before: String, $after: String, $first: Int, $last: Int,
  $direction: OrderDirection!, $productOrderField: ProductOrderField!, $collection: [ID!]
) {
  products(
    first: $first
    last: $last
    channel: "default-channel"
    after: $after
    before: $before
    sortBy: { direction: $direction, field: $productOrderField }
    filter: { collections: $collection }
  ) {
    edges {
      node {
        id
        name
        slug
        collections {
          name
          slug
          __typename
        }
        priceCalculation
        retailPrice
        variants {
          id
          sku
          metafields(keys: [
            "retailPricePerUnit", "form", "slug", "sku", "package_size",
            "is_active", "insuranceEligible", "cashEligible"
          ])
          images {
            url
            __typename
          }
          specialtyMedication
          __typename
        }
        isAvailable
        metafields(keys: ["brandGeneric", "brandName", "external_promotion", "medication_full_display_name"])
        __typename
      }
      __typename
    }
    totalCount
    pageInfo {
      startCursor
      endCursor
      hasNextPage
      hasPreviousPage
      __typename
    }
    __typename
  }
}
"#;

/// API resource for the paginated product catalog
pub struct Products<'c> {
    client: &'c Client,
}

impl<'c> Products<'c> {
    /// Creates a new Products resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Fetch a page of the product catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] if the request ultimately fails.
    pub async fn list(
        &self,
        variables: GetAllProductsVariables,
    ) -> Result<GetAllProductsResponse, ClassifiedError> {
        self.client.graphql(GET_ALL_PRODUCTS_QUERY, variables).await
    }
}

impl Client {
    /// Returns the products resource
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }
}
