use serde::{Serialize, de::DeserializeOwned};

use crate::config::CostPlusConfig;
use crate::error::{ClassifiedError, DispatchFailure, classify, snippet};
use crate::retry::RetryPolicy;
use crate::types::GraphQlRequest;
use crate::correlation;

/// Path of the storefront GraphQL endpoint, relative to the API base
pub const GRAPHQL_ENDPOINT: &str = "/graphql/";

/// Cost Plus Drugs API client.
///
/// Holds no per-request mutable state; one instance is constructed at startup
/// and shared (`Arc`) by every tool handler. Each call is an independent
/// sequential chain of attempts, so unlimited concurrent callers are fine.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: CostPlusConfig,
    policy: RetryPolicy,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client with configuration read from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CostPlusConfig::new())
    }

    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_config(config: CostPlusConfig) -> Self {
        let policy = config.retry_policy();
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(config.timeout())
                .build()
                .expect("reqwest client"),
            config,
            policy,
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the retry policy
    #[must_use]
    pub const fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &CostPlusConfig {
        &self.config
    }

    /// Performs a GraphQL call with retry, returning the typed response.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] carrying the correlation id of this
    /// logical request once all eligible attempts are exhausted or a
    /// non-retryable failure occurs.
    pub async fn graphql<V, T>(&self, query: &str, variables: V) -> Result<T, ClassifiedError>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(GraphQlRequest { query, variables }).map_err(|e| {
            ClassifiedError::unknown(
                format!("failed to serialize GraphQL request: {e}"),
                GRAPHQL_ENDPOINT,
            )
        })?;
        self.execute(GRAPHQL_ENDPOINT, &body).await
    }

    /// Retry orchestrator: drives dispatch attempts for one logical request.
    ///
    /// One correlation id is generated before the first attempt and reused
    /// across retries. Each classified failure is logged before the single
    /// retry/propagate branch. The attempt counter is strictly increasing and
    /// bounded by the policy.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClassifiedError> {
        let correlation_id = correlation::new_correlation_id();
        let mut attempt: u32 = 1;

        loop {
            let context = format!("{endpoint} - attempt {attempt}");
            match self.dispatch(endpoint, body).await {
                Ok(raw) => {
                    return serde_json::from_value(raw.clone()).map_err(|e| {
                        let mut err = classify(
                            DispatchFailure::InvalidJson {
                                message: e.to_string(),
                                body_snippet: snippet(&raw.to_string()),
                            },
                            &context,
                        )
                        .with_correlation_id(correlation_id.clone());
                        err.details.endpoint = Some(endpoint.to_string());
                        err.log(&format!("API response from {endpoint}"));
                        err
                    });
                }
                Err(failure) => {
                    let mut err =
                        classify(failure, &context).with_correlation_id(correlation_id.clone());
                    err.details.endpoint = Some(endpoint.to_string());
                    err.details.request_body = Some(body.clone());
                    err.log(&format!("API request to {endpoint}"));

                    if self.policy.should_retry(&err, attempt) {
                        attempt += 1;
                        tokio::time::sleep(self.policy.delay_before(attempt)).await;
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Performs exactly one HTTP attempt.
    ///
    /// The per-attempt deadline is enforced by the underlying reqwest client;
    /// an elapsed deadline cancels only this attempt's request and surfaces as
    /// a timeout transport failure. Deterministic for a given
    /// endpoint/body/response; no side effects beyond the network call.
    async fn dispatch(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DispatchFailure> {
        let request = self
            .http
            .post(self.config.url(endpoint))
            .headers(self.config.headers())
            .json(body)
            .build()?;

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(DispatchFailure::Status {
                status: status.as_u16(),
                body_snippet: snippet(&text),
            });
        }

        if text.trim().is_empty() {
            return Err(DispatchFailure::EmptyBody);
        }

        serde_json::from_str(&text).map_err(|e| DispatchFailure::InvalidJson {
            message: e.to_string(),
            body_snippet: snippet(&text),
        })
    }
}
