// Gemini (Google AI) generateContent API adapter.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use draftpress_types::{
    AdapterTimeout, ArticleGenerator, BoxFuture, ContentBrief, Error, ErrorKind, GeneratedArticle,
    ProviderId,
};

use crate::prompt::build_prompt;

/// Default Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini generateContent API adapter.
pub struct GeminiGenerator {
    api_key: SecretString,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a new GeminiGenerator with the given API key.
    ///
    /// Uses default timeouts: connect=10s, request=120s.
    pub fn new(api_key: SecretString) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a new GeminiGenerator with a custom base URL (for testing
    /// against a local stub server).
    pub fn new_with_base_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self::builder(api_key).base_url(base_url).build()
    }

    /// Create a new GeminiGenerator with custom timeouts.
    pub fn new_with_timeout(api_key: SecretString, timeout: AdapterTimeout) -> Self {
        Self::builder(api_key).timeout(timeout).build()
    }

    /// Create from environment variable GEMINI_API_KEY, falling back to GOOGLE_API_KEY.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| Error::configuration("GEMINI_API_KEY or GOOGLE_API_KEY not set"))?;
        Ok(Self::new(SecretString::from(api_key)))
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(api_key: SecretString) -> GeminiGeneratorBuilder {
        GeminiGeneratorBuilder::new(api_key)
    }

    fn build_http_client(timeout: &AdapterTimeout) -> reqwest::Client {
        reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs_f64(timeout.connect))
            .timeout(std::time::Duration::from_secs_f64(timeout.request))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            })
    }

    /// Build common HTTP headers for Gemini API requests.
    ///
    /// Uses the x-goog-api-key header rather than query-parameter
    /// authentication — both are supported, and the header keeps API keys out
    /// of server access logs and proxy logs.
    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            self.api_key.expose_secret().parse().map_err(|_| {
                Error::configuration("Invalid API key: contains non-ASCII or control characters")
            })?,
        );
        headers.insert("content-type", "application/json".parse().unwrap());
        Ok(headers)
    }

    /// Build the URL for a generateContent request.
    fn build_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Perform the single HTTP request for generate().
    async fn do_generate(&self, brief: ContentBrief) -> Result<GeneratedArticle, Error> {
        let url = self.build_url(&self.model);
        let body = translate_brief(&brief);
        let request_headers = self.build_headers()?;

        tracing::debug!(model = %self.model, topic = %brief.topic, "dispatching gemini generation");

        let http_response = self
            .http_client
            .post(&url)
            .headers(request_headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {e}"), "gemini", e))?;

        let status = http_response.status().as_u16();
        let headers = http_response.headers().clone();

        if status >= 400 {
            let error_body: serde_json::Value = http_response.json().await.unwrap_or(
                serde_json::json!({"error": {"message": "Failed to parse error response"}}),
            );
            return Err(parse_error(status, &headers, error_body));
        }

        let response_body: serde_json::Value = http_response
            .json()
            .await
            .map_err(|e| Error::network(format!("Failed to parse response: {e}"), "gemini", e))?;

        parse_response(response_body, &brief.topic, &self.model)
    }
}

impl ArticleGenerator for GeminiGenerator {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
        Box::pin(self.do_generate(brief))
    }
}

/// Builder for constructing a `GeminiGenerator` with fine-grained configuration.
pub struct GeminiGeneratorBuilder {
    api_key: SecretString,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<AdapterTimeout>,
}

impl GeminiGeneratorBuilder {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: None,
            model: None,
            timeout: None,
        }
    }

    /// Set a custom base URL (e.g., for proxies or testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model id used for every generation call.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set custom timeout configuration.
    pub fn timeout(mut self, timeout: AdapterTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> GeminiGenerator {
        let timeout = self.timeout.unwrap_or_default();
        GeminiGenerator {
            api_key: self.api_key,
            base_url: self
                .base_url
                .map(|u| crate::util::normalize_base_url(&u))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_client: GeminiGenerator::build_http_client(&timeout),
        }
    }
}

/// Build the generateContent request body for a brief.
pub(crate) fn translate_brief(brief: &ContentBrief) -> serde_json::Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": build_prompt(brief)}],
        }],
    })
}

/// Parse a 2xx generateContent body into a GeneratedArticle.
///
/// Only `candidates[0]` is read; Gemini may return several candidates and
/// the rest are ignored. Text parts within the first candidate are
/// concatenated in order.
pub(crate) fn parse_response(
    raw: serde_json::Value,
    title: &str,
    requested_model: &str,
) -> Result<GeneratedArticle, Error> {
    let model = raw
        .get("modelVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_model)
        .to_string();

    let text: String = raw
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::malformed_response(
            "response contained no candidates with text",
            "gemini",
        ));
    }

    Ok(GeneratedArticle::new(ProviderId::Gemini, title, text, model))
}

/// Map an error response to the unified Error.
pub(crate) fn parse_error(
    status: u16,
    headers: &reqwest::header::HeaderMap,
    body: serde_json::Value,
) -> Error {
    let (error_message, error_code) = crate::util::http::parse_provider_error_message(
        &body,
        &["error", "message"],
        &["error", "status"],
    );

    let retry_after = crate::util::http::parse_retry_after(headers);

    let mut err = Error::from_http_status(status, error_message, "gemini", Some(body), retry_after);
    err.error_code = error_code.clone();

    // Override ErrorKind based on gRPC status codes, which Gemini reports in
    // the error body independently of the HTTP status.
    if let Some(ref code) = error_code {
        match code.as_str() {
            "DEADLINE_EXCEEDED" => err.kind = ErrorKind::RequestTimeout,
            "PERMISSION_DENIED" => err.kind = ErrorKind::AccessDenied,
            "RESOURCE_EXHAUSTED" => err.kind = ErrorKind::RateLimit,
            "UNAUTHENTICATED" => err.kind = ErrorKind::Authentication,
            "NOT_FOUND" => err.kind = ErrorKind::NotFound,
            "INVALID_ARGUMENT" => err.kind = ErrorKind::InvalidRequest,
            "UNAVAILABLE" | "INTERNAL" => err.kind = ErrorKind::Server,
            _ => {}
        }
    }

    // Message-based reclassification runs AFTER the gRPC override so cases
    // like HTTP 400 + INVALID_ARGUMENT + "API key not valid" land on
    // Authentication.
    err.kind = Error::classify_by_message_pub(&err.message, err.kind);

    // Recalculate retryable from the final kind.
    err.retryable = matches!(
        err.kind,
        ErrorKind::RateLimit | ErrorKind::Server | ErrorKind::RequestTimeout | ErrorKind::Network
    );

    err
}
