// WordPress REST publishing sink — creates draft posts from selected articles.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use draftpress_types::{AdapterTimeout, Error, GeneratedArticle};

/// The draft created in the CMS.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishedDraft {
    pub id: u64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: String,
}

/// Publishes selected articles as WordPress drafts via the REST API, using an
/// application password over HTTP Basic auth.
///
/// Publishing is a secondary sink: a failure here is reported alongside the
/// generation result, never instead of it. Callers must not convert a
/// publish error into a round failure.
pub struct WordPressPublisher {
    base_url: String,
    username: String,
    app_password: SecretString,
    http_client: reqwest::Client,
}

impl WordPressPublisher {
    /// Create a new publisher for a WordPress site.
    ///
    /// Uses default timeouts: connect=10s, request=120s.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        app_password: SecretString,
    ) -> Self {
        let timeout = AdapterTimeout::default();
        Self {
            base_url: crate::util::normalize_base_url(&base_url.into()),
            username: username.into(),
            app_password,
            http_client: Self::build_http_client(&timeout),
        }
    }

    /// Create from environment variables `WORDPRESS_BASE_URL`,
    /// `WORDPRESS_USERNAME`, and `WORDPRESS_APP_PASSWORD`.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("WORDPRESS_BASE_URL")
            .map_err(|_| Error::configuration("WORDPRESS_BASE_URL not set"))?;
        let username = std::env::var("WORDPRESS_USERNAME")
            .map_err(|_| Error::configuration("WORDPRESS_USERNAME not set"))?;
        let app_password = std::env::var("WORDPRESS_APP_PASSWORD")
            .map_err(|_| Error::configuration("WORDPRESS_APP_PASSWORD not set"))?;
        Ok(Self::new(
            base_url,
            username,
            SecretString::from(app_password),
        ))
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

    /// Create a draft post from the article. One POST, no retries.
    pub async fn publish_draft(&self, article: &GeneratedArticle) -> Result<PublishedDraft, Error> {
        let url = format!("{}/wp-json/wp/v2/posts", self.base_url);
        let body = draft_body(article);

        tracing::debug!(title = %article.title, provider = %article.provider, "publishing draft");

        let http_response = self
            .http_client
            .post(&url)
            .basic_auth(&self.username, Some(self.app_password.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::publish(format!("HTTP request failed: {e}"), None))?;

        let status = http_response.status().as_u16();

        if status >= 400 {
            let error_body: serde_json::Value = http_response
                .json()
                .await
                .unwrap_or(serde_json::json!({"message": "Failed to parse error response"}));
            let message = error_body
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error_body.to_string());
            return Err(Error::publish(message, Some(status)));
        }

        let draft: PublishedDraft = http_response
            .json()
            .await
            .map_err(|e| Error::publish(format!("Failed to parse response: {e}"), None))?;

        tracing::debug!(post_id = draft.id, "draft created");
        Ok(draft)
    }
}

/// Build the post-creation body for an article.
pub(crate) fn draft_body(article: &GeneratedArticle) -> serde_json::Value {
    json!({
        "title": article.title,
        "content": article.body,
        "status": "draft",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_test_article;
    use draftpress_types::{ErrorKind, ProviderId};

    #[test]
    fn test_new_normalizes_base_url() {
        let publisher = WordPressPublisher::new(
            "https://blog.example.com/",
            "editor",
            SecretString::from("pass".to_string()),
        );
        assert_eq!(publisher.base_url, "https://blog.example.com");
    }

    #[test]
    fn test_draft_body_shape() {
        let article = make_test_article(ProviderId::Anthropic, "Draft title", 10);
        let body = draft_body(&article);
        assert_eq!(body["title"], "Draft title");
        assert_eq!(body["status"], "draft");
        assert_eq!(body["content"], article.body);
    }

    #[test]
    fn test_published_draft_deserializes_wordpress_response() {
        let raw = serde_json::json!({
            "id": 4217,
            "link": "https://blog.example.com/?p=4217",
            "status": "draft",
            "type": "post"
        });
        let draft: PublishedDraft = serde_json::from_value(raw).unwrap();
        assert_eq!(draft.id, 4217);
        assert_eq!(draft.status, "draft");
    }

    #[test]
    fn test_publish_errors_use_publish_kind() {
        let err = Error::publish("rest_cannot_create", Some(401));
        assert_eq!(err.kind, ErrorKind::Publish);
        assert!(!err.kind.is_provider_error());
    }
}
