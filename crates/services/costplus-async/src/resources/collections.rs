use crate::{
    client::Client,
    error::ClassifiedError,
    types::{GetCollectionPathsResponse, GetCollectionPathsVariables},
};

/// The `GetCollectionPaths` query document.
pub const GET_COLLECTION_PATHS_QUERY: &str = r#"
query GetCollectionPaths($search: String) {
  collections(first: 1000, channel: "default-channel", filter: { search: $search }) {
    edges {
      node {
        id
        name
        slug
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

/// API resource for collection lookups
pub struct Collections<'c> {
    client: &'c Client,
}

impl<'c> Collections<'c> {
    /// Creates a new Collections resource
    #[must_use]
    pub const fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Fetch collection id/name/slug triples, optionally narrowed by a
    /// search term.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] if the request ultimately fails.
    pub async fn paths(
        &self,
        variables: GetCollectionPathsVariables,
    ) -> Result<GetCollectionPathsResponse, ClassifiedError> {
        self.client
            .graphql(GET_COLLECTION_PATHS_QUERY, variables)
            .await
    }
}

impl Client {
    /// Returns the collections resource
    #[must_use]
    pub const fn collections(&self) -> Collections<'_> {
        Collections::new(self)
    }
}
