use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters of a raw response body kept for diagnostics
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Closed enumeration of error categories.
///
/// Retry eligibility is decided on the kind alone; see [`ErrorKind::is_retryable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The per-attempt deadline elapsed before a response was received
    Timeout,
    /// Connection-level failure, or a transient upstream server error
    ConnectionError,
    /// The upstream rejected the request with HTTP 429
    RateLimit,
    /// The upstream answered 2xx but the body was empty or not JSON
    InvalidResponse,
    /// Tool input failed its schema check; never reaches the network layer
    Validation,
    /// Anything that could not be classified; treated conservatively as terminal
    Unknown,
}

impl ErrorKind {
    /// Explicit allow-list of kinds eligible for retry.
    ///
    /// Everything else terminates on first occurrence regardless of the
    /// remaining attempt budget.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::ConnectionError | Self::RateLimit)
    }
}

/// Error severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Caller mistake or expected condition
    Low,
    /// Transient condition likely to resolve on retry
    Medium,
    /// Upstream misbehavior worth operator attention
    High,
    /// Unclassified failure
    Critical,
}

/// Opaque structured context attached to a classified error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorDetails {
    /// Endpoint the failing request targeted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Serialized request body, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<serde_json::Value>,
    /// First [`SNIPPET_MAX_CHARS`] characters of the raw response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_snippet: Option<String>,
    /// HTTP status code, when the upstream answered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Distinguishes an empty 2xx body from an unparsable one
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub empty_body: bool,
}

/// A raw failure translated into a typed, severity-ranked, correlation-tagged
/// error.
///
/// Immutable once created; [`ClassifiedError::with_correlation_id`] produces a
/// derived copy that only overrides the correlation id.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{kind:?} ({severity:?}) [{correlation_id}] {context}: {message}")]
pub struct ClassifiedError {
    /// Error category
    pub kind: ErrorKind,
    /// Severity rank
    pub severity: Severity,
    /// Human-readable summary
    pub message: String,
    /// Label identifying where the failure occurred (endpoint and attempt)
    pub context: String,
    /// Identifier tying together all attempts of one logical request
    pub correlation_id: String,
    /// Structured diagnostic context
    pub details: ErrorDetails,
}

impl ClassifiedError {
    /// Whether this error is eligible for retry
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Derived copy with only the correlation id overridden
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Constructs a validation error for input that failed its schema check.
    ///
    /// Validation errors are terminal and never reach the network layer.
    #[must_use]
    pub fn validation(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            severity: Severity::Low,
            message: message.into(),
            context: context.into(),
            correlation_id: crate::correlation::new_correlation_id(),
            details: ErrorDetails::default(),
        }
    }

    /// Constructs an unclassified terminal error.
    #[must_use]
    pub fn unknown(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            severity: Severity::Critical,
            message: message.into(),
            context: context.into(),
            correlation_id: crate::correlation::new_correlation_id(),
            details: ErrorDetails::default(),
        }
    }

    /// Logs this error with its context label.
    ///
    /// Emitted before any retry/propagate decision; logging never affects
    /// retry eligibility and never panics.
    pub fn log(&self, context: &str) {
        if self.is_retryable() || matches!(self.kind, ErrorKind::Validation) {
            tracing::warn!(
                kind = ?self.kind,
                severity = ?self.severity,
                correlation_id = %self.correlation_id,
                context,
                "{}",
                self.message
            );
        } else {
            tracing::error!(
                kind = ?self.kind,
                severity = ?self.severity,
                correlation_id = %self.correlation_id,
                context,
                "{}",
                self.message
            );
        }
    }
}

/// A raw (unclassified) failure raised by a single dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchFailure {
    /// Network-level failure from the HTTP stack
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream answered with a non-2xx status
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body_snippet: String,
    },
    /// The upstream answered 2xx with an empty body
    #[error("API returned empty response")]
    EmptyBody,
    /// The upstream answered 2xx with a body that is not valid JSON
    #[error("API returned invalid JSON: {message}")]
    InvalidJson {
        /// Parse failure description
        message: String,
        /// Truncated response body
        body_snippet: String,
    },
}

/// Caps a raw body to [`SNIPPET_MAX_CHARS`] characters for diagnostics.
#[must_use]
pub fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_MAX_CHARS).collect()
}

/// Converts a raw dispatch failure into a [`ClassifiedError`].
///
/// The context label identifies the endpoint and attempt number, e.g.
/// `"/graphql/ - attempt 2"`. The correlation id is left empty here; the
/// retry orchestrator attaches the per-request id via
/// [`ClassifiedError::with_correlation_id`].
#[must_use]
pub fn classify(failure: DispatchFailure, context: &str) -> ClassifiedError {
    let message = failure.to_string();
    let (kind, severity, details) = match failure {
        DispatchFailure::Transport(e) => {
            if e.is_timeout() {
                (ErrorKind::Timeout, Severity::Medium, ErrorDetails::default())
            } else if e.is_connect() {
                (ErrorKind::ConnectionError, Severity::High, ErrorDetails::default())
            } else {
                (ErrorKind::Unknown, Severity::Critical, ErrorDetails::default())
            }
        }
        DispatchFailure::Status { status, body_snippet } => {
            let kind = match status {
                429 => ErrorKind::RateLimit,
                408 => ErrorKind::Timeout,
                500..=599 => ErrorKind::ConnectionError,
                _ => ErrorKind::Unknown,
            };
            let severity = match kind {
                ErrorKind::RateLimit | ErrorKind::Timeout => Severity::Medium,
                ErrorKind::ConnectionError => Severity::High,
                _ => Severity::Critical,
            };
            (
                kind,
                severity,
                ErrorDetails {
                    status: Some(status),
                    response_snippet: Some(body_snippet),
                    ..ErrorDetails::default()
                },
            )
        }
        DispatchFailure::EmptyBody => (
            ErrorKind::InvalidResponse,
            Severity::High,
            ErrorDetails {
                empty_body: true,
                ..ErrorDetails::default()
            },
        ),
        DispatchFailure::InvalidJson { body_snippet, .. } => (
            ErrorKind::InvalidResponse,
            Severity::High,
            ErrorDetails {
                response_snippet: Some(body_snippet),
                ..ErrorDetails::default()
            },
        ),
    };

    ClassifiedError {
        kind,
        severity,
        message,
        context: context.to_string(),
        correlation_id: String::new(),
        details,
    }
}
