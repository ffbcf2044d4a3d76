// Anthropic Messages API adapter.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use draftpress_types::{
    AdapterTimeout, ArticleGenerator, BoxFuture, ContentBrief, Error, GeneratedArticle, ProviderId,
};

use crate::prompt::build_prompt;

/// Default Anthropic API base URL.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Required Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Anthropic requires max_tokens on every request. Generous enough for a
/// long-form article at the calendar's largest target length.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Messages API adapter.
pub struct AnthropicGenerator {
    api_key: SecretString,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl AnthropicGenerator {
    /// Create a new AnthropicGenerator with the given API key.
    ///
    /// Uses default timeouts: connect=10s, request=120s.
    pub fn new(api_key: SecretString) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a new AnthropicGenerator with a custom base URL (for testing
    /// against a local stub server).
    pub fn new_with_base_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self::builder(api_key).base_url(base_url).build()
    }

    /// Create a new AnthropicGenerator with custom timeouts.
    pub fn new_with_timeout(api_key: SecretString, timeout: AdapterTimeout) -> Self {
        Self::builder(api_key).timeout(timeout).build()
    }

    /// Create from environment variable ANTHROPIC_API_KEY.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| Error::configuration("ANTHROPIC_API_KEY not set"))?;
        Ok(Self::new(SecretString::from(api_key)))
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(api_key: SecretString) -> AnthropicGeneratorBuilder {
        AnthropicGeneratorBuilder::new(api_key)
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

    /// Build common HTTP headers for Anthropic API requests.
    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            self.api_key.expose_secret().parse().map_err(|_| {
                Error::configuration("Invalid API key: contains non-ASCII or control characters")
            })?,
        );
        headers.insert("anthropic-version", ANTHROPIC_VERSION.parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());
        Ok(headers)
    }

    /// Perform the single HTTP request for generate().
    async fn do_generate(&self, brief: ContentBrief) -> Result<GeneratedArticle, Error> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = translate_brief(&brief, &self.model);
        let request_headers = self.build_headers()?;

        tracing::debug!(model = %self.model, topic = %brief.topic, "dispatching anthropic generation");

        let http_response = self
            .http_client
            .post(&url)
            .headers(request_headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {e}"), "anthropic", e))?;

        let status = http_response.status().as_u16();
        let headers = http_response.headers().clone();

        if status >= 400 {
            let error_body: serde_json::Value = http_response.json().await.unwrap_or(
                serde_json::json!({"error": {"message": "Failed to parse error response"}}),
            );
            return Err(parse_error(status, &headers, error_body));
        }

        let response_body: serde_json::Value = http_response.json().await.map_err(|e| {
            Error::network(format!("Failed to parse response: {e}"), "anthropic", e)
        })?;

        parse_response(response_body, &brief.topic)
    }
}

impl ArticleGenerator for AnthropicGenerator {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
        Box::pin(self.do_generate(brief))
    }
}

/// Builder for constructing an `AnthropicGenerator` with fine-grained configuration.
pub struct AnthropicGeneratorBuilder {
    api_key: SecretString,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<AdapterTimeout>,
}

impl AnthropicGeneratorBuilder {
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

    pub fn build(self) -> AnthropicGenerator {
        let timeout = self.timeout.unwrap_or_default();
        AnthropicGenerator {
            api_key: self.api_key,
            base_url: self
                .base_url
                .map(|u| crate::util::normalize_base_url(&u))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_client: AnthropicGenerator::build_http_client(&timeout),
        }
    }
}

/// Build the Messages API request body for a brief.
pub(crate) fn translate_brief(brief: &ContentBrief, model: &str) -> serde_json::Value {
    json!({
        "model": model,
        "max_tokens": DEFAULT_MAX_TOKENS,
        "messages": [{
            "role": "user",
            "content": build_prompt(brief),
        }],
    })
}

/// Parse a 2xx Messages API body into a GeneratedArticle.
///
/// Anthropic returns a single message whose content blocks are segments of
/// one reply; the text blocks are concatenated in order.
pub(crate) fn parse_response(
    raw: serde_json::Value,
    title: &str,
) -> Result<GeneratedArticle, Error> {
    let model = raw
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let text: String = raw
        .get("content")
        .and_then(|v| v.as_array())
        .map(|blocks| {
            blocks
                .iter()
                .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::malformed_response(
            "response contained no text blocks",
            "anthropic",
        ));
    }

    Ok(GeneratedArticle::new(
        ProviderId::Anthropic,
        title,
        text,
        model,
    ))
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
        &["error", "type"],
    );

    let retry_after = crate::util::http::parse_retry_after(headers);

    let mut err =
        Error::from_http_status(status, error_message, "anthropic", Some(body), retry_after);
    err.error_code = error_code;
    err
}
