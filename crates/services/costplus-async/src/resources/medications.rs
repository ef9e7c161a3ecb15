use crate::{
    client::Client,
    error::ClassifiedError,
    types::{SearchMedicinesResponse, SearchMedicinesVariables},
};

/// The `SearchMedicines` query document.
///
/// Fixed channel and page size; filtering beyond `medicationSearch` happens
/// client-side in the tool layer.
pub const SEARCH_MEDICINES_QUERY: &str = r#"
query SearchMedicines($medicationSearch: String) {
  products(
    channel: "default-channel"
    first: 1000
    medicationSearch: $medicationSearch
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
    __typename
  }
}
"#;

/// API resource for the medication search operation
pub struct Medications<'c> {
    client: &'c Client,
}

impl<'c> Medications<'c> {
    /// Creates a new Medications resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Search for medications by name or search term.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] if the request ultimately fails.
    pub async fn search(
        &self,
        variables: SearchMedicinesVariables,
    ) -> Result<SearchMedicinesResponse, ClassifiedError> {
        self.client.graphql(SEARCH_MEDICINES_QUERY, variables).await
    }
}

impl Client {
    /// Returns the medication search resource
    #[must_use]
    pub const fn medications(&self) -> Medications<'_> {
        Medications::new(self)
    }
}
