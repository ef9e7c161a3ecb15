//! The uniform success/failure envelope every tool invocation returns.
//!
//! A tool caller always receives one of these two shapes, never a raw error:
//! the envelope is the tool boundary.

use std::time::Instant;

use chrono::Utc;
use costplus_async::ClassifiedError;
use serde::Serialize;

/// Identifier of the upstream data source, reported in every envelope
pub const DATA_SOURCE: &str = "costplusdrugs.com";
/// Upstream API version identifier
pub const API_VERSION: &str = "v1";

const DISCLAIMER: &str = "Medication information provided for informational purposes only. \
     Always consult healthcare professionals for medical advice.";

const NOTES: [&str; 3] = [
    "Cost Plus Drugs provides affordable medications with transparent pricing.",
    "All medications are FDA-approved and sourced from licensed manufacturers.",
    "Prices shown are current as of the query time and may change.",
];

/// A suggested follow-up operation included in success metadata
#[derive(Debug, Clone, Serialize)]
pub struct NextAction {
    /// Tool to call next
    pub tool: &'static str,
    /// Why the caller might want it
    pub reason: &'static str,
    /// Hint for the parameters to pass
    pub parameters_hint: &'static str,
}

fn next_actions() -> Vec<NextAction> {
    vec![
        NextAction {
            tool: "search_medicines",
            reason: "Search for other medications by name or active ingredient",
            parameters_hint: "query: [medication name]",
        },
        NextAction {
            tool: "get_collections",
            reason: "Browse medication categories to find related treatments",
            parameters_hint: "No parameters needed",
        },
    ]
}

/// Metadata block attached to every success envelope
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMetadata {
    /// Array length if the payload is a sequence, else 1
    pub total_results: usize,
    /// Elapsed time for the whole tool invocation, e.g. `"12ms"`
    pub query_time: String,
    /// Upstream data source identifier
    pub data_source: &'static str,
    /// Upstream API version identifier
    pub api_version: &'static str,
    /// Envelope creation time, RFC 3339
    pub last_updated: String,
    /// Static medication disclaimer
    pub disclaimer: &'static str,
    /// Static informational notes
    pub notes: Vec<&'static str>,
    /// Tool-specific warnings, usually empty
    pub warnings: Vec<String>,
    /// Suggested follow-up operations
    pub next_actions: Vec<NextAction>,
}

/// Context recorded alongside a failure envelope
#[derive(Debug, Clone, Serialize)]
pub struct FailureContext {
    /// Tool in whose handler the failure surfaced
    pub tool_name: &'static str,
    /// The raw input the caller supplied
    pub user_input: serde_json::Value,
}

/// The uniform wrapper returned for every tool invocation.
///
/// Exactly one of the two variants is produced per invocation. The payload
/// is passed through untouched; the envelope only adds metadata around it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Envelope {
    /// The tool produced a payload
    Success {
        /// The tool's payload, unmodified
        data: serde_json::Value,
        /// Additive metadata
        metadata: ResponseMetadata,
    },
    /// The tool failed; the classified error is the payload
    Error {
        /// The terminal classified error
        error: ClassifiedError,
        /// Any partial data salvaged before the failure
        #[serde(skip_serializing_if = "Option::is_none")]
        partial_data: Option<serde_json::Value>,
        /// Where the failure happened and with what input
        context: FailureContext,
    },
}

impl Envelope {
    /// Wraps a successful payload with timing and the fixed metadata block.
    ///
    /// Pure with respect to the payload: nothing is mutated or filtered.
    #[must_use]
    pub fn success(data: serde_json::Value, started: Instant) -> Self {
        let elapsed_ms = started.elapsed().as_millis();
        let total_results = match &data {
            serde_json::Value::Array(items) => items.len(),
            _ => 1,
        };

        Self::Success {
            data,
            metadata: ResponseMetadata {
                total_results,
                query_time: format!("{elapsed_ms}ms"),
                data_source: DATA_SOURCE,
                api_version: API_VERSION,
                last_updated: Utc::now().to_rfc3339(),
                disclaimer: DISCLAIMER,
                notes: NOTES.to_vec(),
                warnings: Vec::new(),
                next_actions: next_actions(),
            },
        }
    }

    /// Wraps a classified error. Never fails.
    #[must_use]
    pub fn failure(
        error: ClassifiedError,
        partial_data: Option<serde_json::Value>,
        context: FailureContext,
    ) -> Self {
        Self::Error {
            error,
            partial_data,
            context,
        }
    }

    /// Whether this is the error variant
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Serializes the envelope to the JSON text handed back over the wire.
    ///
    /// Falls back to a minimal hand-built error object if serialization
    /// fails, so the tool boundary still returns well-formed JSON.
    #[must_use]
    pub fn to_json_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","message":"envelope serialization failed: {e}"}}"#)
        })
    }
}
