//! API health probing.
//!
//! A health check issues a minimal `{ __typename }` query against each probed
//! endpoint and folds the per-endpoint outcomes into a single verdict.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::client::Client;

/// Query used to probe an endpoint without touching any real data.
const PROBE_QUERY: &str = "query { __typename }";

/// Overall verdict for a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every probed endpoint answered.
    Healthy,
    /// Some, but not all, probed endpoints answered.
    Degraded,
    /// No probed endpoint answered (including the zero-probe case).
    Unhealthy,
}

/// Result of a health check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub status: HealthStatus,
    /// Wall-clock duration of the whole check, in milliseconds.
    pub latency_ms: u64,
    /// Per-endpoint probe outcome, keyed by endpoint label.
    pub endpoints: BTreeMap<String, bool>,
}

/// Folds per-endpoint outcomes into an overall status.
///
/// An empty map yields [`HealthStatus::Unhealthy`]: a check that probed
/// nothing proved nothing.
#[must_use]
pub fn verdict_for(endpoints: &BTreeMap<String, bool>) -> HealthStatus {
    let total = endpoints.len();
    let healthy = endpoints.values().filter(|ok| **ok).count();

    if total > 0 && healthy == total {
        HealthStatus::Healthy
    } else if healthy > 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Unhealthy
    }
}

impl Client {
    /// Probes the GraphQL endpoint and reports an overall verdict.
    ///
    /// Probe failures are folded into the verdict rather than surfaced as
    /// errors, so this never fails.
    pub async fn health_check(&self) -> HealthVerdict {
        let started = Instant::now();
        let mut endpoints = BTreeMap::new();

        let probe: Result<serde_json::Value, _> = self.graphql(PROBE_QUERY, ()).await;
        endpoints.insert("graphql_endpoint".to_owned(), probe.is_ok());

        HealthVerdict {
            status: verdict_for(&endpoints),
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probes(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries
            .iter()
            .map(|(name, ok)| ((*name).to_owned(), *ok))
            .collect()
    }

    #[test]
    fn all_endpoints_up_is_healthy() {
        let map = probes(&[("graphql_endpoint", true)]);
        assert_eq!(verdict_for(&map), HealthStatus::Healthy);
    }

    #[test]
    fn partial_outage_is_degraded() {
        let map = probes(&[("graphql_endpoint", true), ("rest_endpoint", false)]);
        assert_eq!(verdict_for(&map), HealthStatus::Degraded);
    }

    #[test]
    fn total_outage_is_unhealthy() {
        let map = probes(&[("graphql_endpoint", false)]);
        assert_eq!(verdict_for(&map), HealthStatus::Unhealthy);
    }

    #[test]
    fn zero_probes_is_unhealthy() {
        assert_eq!(verdict_for(&BTreeMap::new()), HealthStatus::Unhealthy);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&HealthStatus::Degraded).unwrap();
        assert_eq!(json, "\"degraded\"");
    }
}
