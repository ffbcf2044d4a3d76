// OpenAI Chat Completions API adapter.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use draftpress_types::{
    AdapterTimeout, ArticleGenerator, BoxFuture, ContentBrief, Error, GeneratedArticle, ProviderId,
};

use crate::prompt::build_prompt;

/// Default OpenAI API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model when none is configured.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI Chat Completions API adapter.
pub struct OpenAiGenerator {
    api_key: SecretString,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl OpenAiGenerator {
    /// Create a new OpenAiGenerator with the given API key.
    ///
    /// Uses default timeouts: connect=10s, request=120s.
    pub fn new(api_key: SecretString) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a new OpenAiGenerator with a custom base URL (for testing
    /// against a local stub server).
    pub fn new_with_base_url(api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self::builder(api_key).base_url(base_url).build()
    }

    /// Create a new OpenAiGenerator with custom timeouts.
    pub fn new_with_timeout(api_key: SecretString, timeout: AdapterTimeout) -> Self {
        Self::builder(api_key).timeout(timeout).build()
    }

    /// Create from environment variable OPENAI_API_KEY.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| Error::configuration("OPENAI_API_KEY not set"))?;
        Ok(Self::new(SecretString::from(api_key)))
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(api_key: SecretString) -> OpenAiGeneratorBuilder {
        OpenAiGeneratorBuilder::new(api_key)
    }

    /// Build an HTTP client with the given timeout configuration.
    ///
    /// Wires `connect` → `connect_timeout()` and `request` → `timeout()`.
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

    /// Build common HTTP headers for OpenAI API requests.
    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "authorization",
            format!("Bearer {}", self.api_key.expose_secret())
                .parse()
                .map_err(|_| {
                    Error::configuration(
                        "Invalid API key: contains non-ASCII or control characters",
                    )
                })?,
        );
        headers.insert("content-type", "application/json".parse().unwrap());
        Ok(headers)
    }

    /// Perform the single HTTP request for generate().
    async fn do_generate(&self, brief: ContentBrief) -> Result<GeneratedArticle, Error> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = translate_brief(&brief, &self.model);
        let request_headers = self.build_headers()?;

        tracing::debug!(model = %self.model, topic = %brief.topic, "dispatching openai generation");

        let http_response = self
            .http_client
            .post(&url)
            .headers(request_headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {e}"), "openai", e))?;

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
            .map_err(|e| Error::network(format!("Failed to parse response: {e}"), "openai", e))?;

        parse_response(response_body, &brief.topic)
    }
}

impl ArticleGenerator for OpenAiGenerator {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
        Box::pin(self.do_generate(brief))
    }
}

/// Builder for constructing an `OpenAiGenerator` with fine-grained configuration.
pub struct OpenAiGeneratorBuilder {
    api_key: SecretString,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<AdapterTimeout>,
}

impl OpenAiGeneratorBuilder {
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

    pub fn build(self) -> OpenAiGenerator {
        let timeout = self.timeout.unwrap_or_default();
        OpenAiGenerator {
            api_key: self.api_key,
            base_url: self
                .base_url
                .map(|u| crate::util::normalize_base_url(&u))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_client: OpenAiGenerator::build_http_client(&timeout),
        }
    }
}

/// Build the Chat Completions request body for a brief.
pub(crate) fn translate_brief(brief: &ContentBrief, model: &str) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [{
            "role": "user",
            "content": build_prompt(brief),
        }],
    })
}

/// Parse a 2xx Chat Completions body into a GeneratedArticle.
///
/// Only `choices[0]` is read; additional candidates are ignored.
pub(crate) fn parse_response(
    raw: serde_json::Value,
    title: &str,
) -> Result<GeneratedArticle, Error> {
    let model = raw
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let text = raw
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|a| a.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::malformed_response("response contained no choices", "openai"))?;

    if text.trim().is_empty() {
        return Err(Error::malformed_response(
            "response text payload is empty",
            "openai",
        ));
    }

    Ok(GeneratedArticle::new(ProviderId::OpenAi, title, text, model))
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
        &["error", "code"],
    );

    let retry_after = crate::util::http::parse_retry_after(headers);

    let mut err = Error::from_http_status(status, error_message, "openai", Some(body), retry_after);
    err.error_code = error_code;
    err
}
