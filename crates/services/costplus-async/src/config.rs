use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use crate::retry::RetryPolicy;

/// Default Cost Plus Drugs API base URL
pub const COSTPLUS_DEFAULT_BASE: &str = "https://costplusdrugs.com/api";
/// Default per-attempt HTTP deadline
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default total attempt bound (first attempt plus retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default linear backoff unit between attempts
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Configuration for the Cost Plus Drugs client.
///
/// Read once at startup; there is no hot reload. The storefront GraphQL
/// endpoint is public, so no credentials are involved.
#[derive(Clone, Debug)]
pub struct CostPlusConfig {
    api_base: String,
    timeout: Duration,
    max_attempts: u32,
    retry_base_delay: Duration,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_string(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for CostPlusConfig {
    fn default() -> Self {
        let api_base = env_string("COSTPLUS_BASE_URL").unwrap_or_else(|| COSTPLUS_DEFAULT_BASE.into());
        let timeout = Duration::from_millis(env_u64("COSTPLUS_TIMEOUT_MS", DEFAULT_TIMEOUT_MS));
        let max_attempts = env_u64("COSTPLUS_MAX_ATTEMPTS", u64::from(DEFAULT_MAX_ATTEMPTS)).max(1) as u32;
        let retry_base_delay =
            Duration::from_millis(env_u64("COSTPLUS_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS));

        Self {
            api_base,
            timeout,
            max_attempts,
            retry_base_delay,
        }
    }
}

impl CostPlusConfig {
    /// Creates a new configuration with default settings.
    ///
    /// Attempts to read from environment variables:
    /// - `COSTPLUS_BASE_URL` for a custom API base URL
    /// - `COSTPLUS_TIMEOUT_MS` for the per-attempt deadline
    /// - `COSTPLUS_MAX_ATTEMPTS` for the total attempt bound
    /// - `COSTPLUS_RETRY_DELAY_MS` for the linear backoff unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the per-attempt HTTP deadline
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the total attempt bound (minimum 1)
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the linear backoff unit between attempts
    #[must_use]
    pub const fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the per-attempt HTTP deadline
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy derived from this configuration
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: self.retry_base_delay,
        }
    }

    /// Constructs the full URL for an API endpoint
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Returns the default HTTP headers sent with every request
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        h.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("costplus-async/", env!("CARGO_PKG_VERSION"))),
        );
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _base = EnvGuard::set("COSTPLUS_BASE_URL", "https://staging.costplusdrugs.com/api");
        let _timeout = EnvGuard::set("COSTPLUS_TIMEOUT_MS", "2500");
        let _attempts = EnvGuard::set("COSTPLUS_MAX_ATTEMPTS", "5");
        let _delay = EnvGuard::set("COSTPLUS_RETRY_DELAY_MS", "250");

        let cfg = CostPlusConfig::new();
        assert_eq!(cfg.api_base(), "https://staging.costplusdrugs.com/api");
        assert_eq!(cfg.timeout(), Duration::from_millis(2500));
        assert_eq!(cfg.retry_policy().max_attempts, 5);
        assert_eq!(cfg.retry_policy().base_delay, Duration::from_millis(250));
    }

    #[test]
    #[serial(env)]
    fn config_defaults_when_unset() {
        let _base = EnvGuard::remove("COSTPLUS_BASE_URL");
        let _timeout = EnvGuard::remove("COSTPLUS_TIMEOUT_MS");
        let _attempts = EnvGuard::remove("COSTPLUS_MAX_ATTEMPTS");
        let _delay = EnvGuard::remove("COSTPLUS_RETRY_DELAY_MS");

        let cfg = CostPlusConfig::new();
        assert_eq!(cfg.api_base(), COSTPLUS_DEFAULT_BASE);
        assert_eq!(cfg.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert_eq!(cfg.retry_policy().max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    #[serial(env)]
    fn config_ignores_unparsable_numbers() {
        let _timeout = EnvGuard::set("COSTPLUS_TIMEOUT_MS", "not-a-number");

        let cfg = CostPlusConfig::new();
        assert_eq!(cfg.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn builder_methods() {
        let cfg = CostPlusConfig::new()
            .with_api_base("http://localhost:9999")
            .with_timeout(Duration::from_millis(100))
            .with_max_attempts(7)
            .with_retry_base_delay(Duration::from_millis(10));

        assert_eq!(cfg.api_base(), "http://localhost:9999");
        assert_eq!(cfg.timeout(), Duration::from_millis(100));
        assert_eq!(cfg.retry_policy().max_attempts, 7);
        assert_eq!(cfg.retry_policy().base_delay, Duration::from_millis(10));
    }

    #[test]
    fn max_attempts_floor_is_one() {
        let cfg = CostPlusConfig::new().with_max_attempts(0);
        assert_eq!(cfg.retry_policy().max_attempts, 1);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = CostPlusConfig::new().with_api_base("http://localhost:9999/");
        assert_eq!(cfg.url("/graphql/"), "http://localhost:9999/graphql/");
        assert_eq!(cfg.url("graphql/"), "http://localhost:9999/graphql/");
    }
}
