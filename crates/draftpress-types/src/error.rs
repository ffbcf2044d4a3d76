// Error hierarchy — unified error type for the entire workspace.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discriminator covering provider failures and orchestration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Provider errors (from vendor HTTP responses)
    Authentication,
    AccessDenied,
    NotFound,
    InvalidRequest,
    RateLimit,
    Server,
    ContentFilter,
    QuotaExceeded,

    // Client-side provider errors
    RequestTimeout,
    Network,
    MalformedResponse,

    // Orchestration errors
    NoProvidersConfigured,
    AllProvidersFailed,

    // Publishing-sink errors (secondary, never fatal to a generation)
    Publish,

    Configuration,
}

impl ErrorKind {
    /// Returns `true` if this kind describes the failure of a single vendor
    /// call — the class the orchestrator recovers from locally by excluding
    /// that provider from the round.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::AccessDenied
                | Self::NotFound
                | Self::InvalidRequest
                | Self::RateLimit
                | Self::Server
                | Self::ContentFilter
                | Self::QuotaExceeded
                | Self::RequestTimeout
                | Self::Network
                | Self::MalformedResponse
        )
    }
}

/// The single error type for the entire workspace.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    // Provider error fields
    pub provider: Option<String>,
    pub status_code: Option<u16>,
    pub error_code: Option<String>,
    pub retry_after: Option<Duration>,
    pub raw: Option<serde_json::Value>,
}

impl Error {
    /// Construct from HTTP status code (for provider adapters).
    pub fn from_http_status(
        status: u16,
        message: String,
        provider: &str,
        raw: Option<serde_json::Value>,
        retry_after: Option<Duration>,
    ) -> Self {
        let (kind, retryable) = match status {
            400 | 413 | 422 => (ErrorKind::InvalidRequest, false),
            401 => (ErrorKind::Authentication, false),
            403 => (ErrorKind::AccessDenied, false),
            404 => (ErrorKind::NotFound, false),
            408 => (ErrorKind::RequestTimeout, true),
            429 => (ErrorKind::RateLimit, true),
            500..=599 => (ErrorKind::Server, true),
            _ => (ErrorKind::Server, true), // Unknown defaults to retryable
        };

        // Message-based reclassification may change retryability (e.g. a 400
        // with "quota" in the message becomes QuotaExceeded).
        let kind = Self::classify_by_message(&message, kind);
        let retryable = match kind {
            ErrorKind::Authentication
            | ErrorKind::AccessDenied
            | ErrorKind::NotFound
            | ErrorKind::InvalidRequest
            | ErrorKind::QuotaExceeded
            | ErrorKind::ContentFilter
            | ErrorKind::Configuration => false,
            _ => retryable,
        };

        Self {
            kind,
            message,
            retryable,
            source: None,
            provider: Some(provider.to_string()),
            status_code: Some(status),
            error_code: None,
            retry_after,
            raw,
        }
    }

    /// Convenience: configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            message: message.into(),
            retryable: false,
            source: None,
            provider: None,
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Convenience: network error with source, attributed to a provider.
    pub fn network(
        message: impl Into<String>,
        provider: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: message.into(),
            retryable: true,
            source: Some(Box::new(source)),
            provider: Some(provider.to_string()),
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Convenience: the vendor replied 2xx but the payload did not contain
    /// what the adapter needs (no candidates, empty text, wrong shape).
    pub fn malformed_response(message: impl Into<String>, provider: &str) -> Self {
        Self {
            kind: ErrorKind::MalformedResponse,
            message: message.into(),
            retryable: false,
            source: None,
            provider: Some(provider.to_string()),
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Convenience: zero providers enabled — client-input class, raised
    /// before any vendor call is attempted.
    pub fn no_providers_configured() -> Self {
        Self {
            kind: ErrorKind::NoProvidersConfigured,
            message: "no providers configured: every credential is absent or empty".into(),
            retryable: false,
            source: None,
            provider: None,
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Convenience: every dispatched vendor call failed — upstream class,
    /// distinct from [`Error::no_providers_configured`]. The message names
    /// each provider's failure so the round is diagnosable from the error
    /// alone.
    pub fn all_providers_failed(failures: &[Error]) -> Self {
        let detail = failures
            .iter()
            .map(|e| {
                format!(
                    "{}: {:?}: {}",
                    e.provider.as_deref().unwrap_or("unknown"),
                    e.kind,
                    e.message
                )
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            kind: ErrorKind::AllProvidersFailed,
            message: format!("all providers failed: {detail}"),
            retryable: true,
            source: None,
            provider: None,
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Convenience: publishing-sink error. Secondary by contract — callers
    /// report it alongside a successful generation, never instead of one.
    pub fn publish(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            kind: ErrorKind::Publish,
            message: message.into(),
            retryable: status_code.map(|s| s >= 500).unwrap_or(true),
            source: None,
            provider: None,
            status_code,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Reclassify an error kind based on the error message body.
    /// Public so provider adapters can apply message-based reclassification
    /// after vendor-specific overrides.
    pub fn classify_by_message_pub(message: &str, default: ErrorKind) -> ErrorKind {
        Self::classify_by_message(message, default)
    }

    fn classify_by_message(message: &str, default: ErrorKind) -> ErrorKind {
        let lower = message.to_lowercase();
        if lower.contains("not found") || lower.contains("does not exist") {
            ErrorKind::NotFound
        } else if lower.contains("unauthorized")
            || lower.contains("invalid key")
            || lower.contains("api key not valid")
        {
            ErrorKind::Authentication
        } else if lower.contains("content filter")
            || lower.contains("safety")
            || lower.contains("blocked")
        {
            ErrorKind::ContentFilter
        } else if lower.contains("quota")
            || lower.contains("billing")
            || lower.contains("insufficient funds")
        {
            ErrorKind::QuotaExceeded
        } else {
            default
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- from_http_status mapping ---

    #[test]
    fn test_error_from_http_status_401() {
        let err = Error::from_http_status(401, "Unauthorized".into(), "anthropic", None, None);
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!err.retryable);
        assert_eq!(err.provider, Some("anthropic".to_string()));
        assert_eq!(err.status_code, Some(401));
    }

    #[test]
    fn test_error_from_http_status_429_is_retryable() {
        let err = Error::from_http_status(429, "Rate limited".into(), "openai", None, None);
        assert_eq!(err.kind, ErrorKind::RateLimit);
        assert!(err.retryable);
    }

    #[test]
    fn test_error_from_http_status_5xx() {
        for status in [500, 502, 503, 504] {
            let err = Error::from_http_status(status, "Server error".into(), "gemini", None, None);
            assert_eq!(err.kind, ErrorKind::Server, "status {status}");
            assert!(err.retryable, "status {status}");
        }
    }

    #[test]
    fn test_all_status_codes_map_correctly() {
        let cases = vec![
            (400, ErrorKind::InvalidRequest, false),
            (401, ErrorKind::Authentication, false),
            (403, ErrorKind::AccessDenied, false),
            (404, ErrorKind::NotFound, false),
            (408, ErrorKind::RequestTimeout, true),
            (413, ErrorKind::InvalidRequest, false),
            (422, ErrorKind::InvalidRequest, false),
            (429, ErrorKind::RateLimit, true),
            (500, ErrorKind::Server, true),
        ];
        for (status, expected_kind, expected_retryable) in cases {
            let err = Error::from_http_status(status, "test".into(), "test", None, None);
            assert_eq!(err.kind, expected_kind, "status {status}");
            assert_eq!(err.retryable, expected_retryable, "status {status}");
        }
    }

    #[test]
    fn test_error_from_http_status_unknown_defaults_to_retryable() {
        let err = Error::from_http_status(999, "Unknown".into(), "test", None, None);
        assert_eq!(err.kind, ErrorKind::Server);
        assert!(err.retryable);
    }

    // --- Message-based classification ---

    #[test]
    fn test_message_classification_quota() {
        let err = Error::from_http_status(400, "quota exceeded".into(), "test", None, None);
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert!(!err.retryable);
    }

    #[test]
    fn test_message_classification_blocked() {
        let err = Error::from_http_status(
            400,
            "response blocked by safety filter".into(),
            "test",
            None,
            None,
        );
        assert_eq!(err.kind, ErrorKind::ContentFilter);
        assert!(!err.retryable);
    }

    #[test]
    fn test_message_classification_api_key_not_valid() {
        // Gemini returns HTTP 400 (not 401) for invalid API keys.
        let err = Error::from_http_status(
            400,
            "API key not valid. Please pass a valid API key.".into(),
            "gemini",
            None,
            None,
        );
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!err.retryable);
    }

    // --- retry_after / raw passthrough ---

    #[test]
    fn test_error_from_http_status_with_retry_after() {
        let err = Error::from_http_status(
            429,
            "Rate limited".into(),
            "openai",
            None,
            Some(Duration::from_secs(5)),
        );
        assert_eq!(err.retry_after, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_error_from_http_status_with_raw() {
        let raw = serde_json::json!({"error": {"type": "rate_limit"}});
        let err =
            Error::from_http_status(429, "Rate limited".into(), "openai", Some(raw.clone()), None);
        assert_eq!(err.raw, Some(raw));
    }

    // --- Convenience constructors ---

    #[test]
    fn test_error_configuration() {
        let err = Error::configuration("missing topic");
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert_eq!(err.message, "missing topic");
        assert!(!err.retryable);
    }

    #[test]
    fn test_error_network() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::network("connection failed", "openai", inner);
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.retryable);
        assert!(err.source.is_some());
        assert_eq!(err.provider, Some("openai".to_string()));
    }

    #[test]
    fn test_error_malformed_response() {
        let err = Error::malformed_response("response contained no candidates", "gemini");
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
        assert!(!err.retryable);
        assert_eq!(err.provider, Some("gemini".to_string()));
    }

    #[test]
    fn test_error_no_providers_configured() {
        let err = Error::no_providers_configured();
        assert_eq!(err.kind, ErrorKind::NoProvidersConfigured);
        assert!(!err.retryable);
        assert!(err.provider.is_none());
    }

    #[test]
    fn test_error_all_providers_failed_names_each_provider() {
        let failures = vec![
            Error::from_http_status(429, "rate limited".into(), "openai", None, None),
            Error::network(
                "connection failed",
                "gemini",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
            ),
        ];
        let err = Error::all_providers_failed(&failures);
        assert_eq!(err.kind, ErrorKind::AllProvidersFailed);
        assert!(err.message.contains("openai"));
        assert!(err.message.contains("gemini"));
        assert!(err.message.contains("rate limited"));
    }

    #[test]
    fn test_error_publish_retryability_follows_status() {
        assert!(Error::publish("timeout", None).retryable);
        assert!(Error::publish("bad gateway", Some(502)).retryable);
        assert!(!Error::publish("invalid credentials", Some(401)).retryable);
    }

    // --- Kind predicates ---

    #[test]
    fn test_is_provider_error_groups_vendor_kinds() {
        assert!(ErrorKind::RateLimit.is_provider_error());
        assert!(ErrorKind::Network.is_provider_error());
        assert!(ErrorKind::MalformedResponse.is_provider_error());
        assert!(!ErrorKind::NoProvidersConfigured.is_provider_error());
        assert!(!ErrorKind::AllProvidersFailed.is_provider_error());
        assert!(!ErrorKind::Publish.is_provider_error());
        assert!(!ErrorKind::Configuration.is_provider_error());
    }

    // --- Display and std::error::Error ---

    #[test]
    fn test_error_display_output() {
        let err = Error::from_http_status(500, "Server error".into(), "test", None, None);
        let display = format!("{}", err);
        assert!(display.contains("Server"));
        assert!(display.contains("Server error"));
    }

    #[test]
    fn test_error_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::network("connection failed", "openai", inner);
        assert!(std::error::Error::source(&err).is_some());
    }
}
