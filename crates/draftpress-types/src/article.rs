// GeneratedArticle — one provider's successful output for a brief.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::ProviderId;

/// Count whitespace-delimited tokens.
///
/// This is the word-count definition used everywhere in the workspace:
/// adapters derive `GeneratedArticle::word_count` from it, and the selector's
/// fallback score reads the derived value. Vendor-reported counts are never
/// trusted.
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// One successful generation. Produced exactly once per successful adapter
/// call; immutable afterwards apart from `score`, which an external scoring
/// stage may populate before selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArticle {
    /// The adapter that produced this article.
    pub provider: ProviderId,
    /// Article title. Adapters do not generate their own titles; this is the
    /// brief's topic.
    pub title: String,
    /// Full article body as returned by the vendor.
    pub body: String,
    /// Vendor model id that produced the body.
    pub model: String,
    /// Whitespace-token count of `body`, derived at construction.
    pub word_count: u32,
    pub produced_at: DateTime<Utc>,
    /// Externally-populated quality score. When absent the selector falls
    /// back to `word_count`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl GeneratedArticle {
    /// Build an article from a vendor text payload, deriving `word_count`
    /// from the body.
    pub fn new(
        provider: ProviderId,
        title: impl Into<String>,
        body: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let body = body.into();
        Self {
            provider,
            title: title.into(),
            word_count: count_words(&body),
            body,
            model: model.into(),
            produced_at: Utc::now(),
            score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_basic() {
        assert_eq!(count_words("one two three"), 3);
    }

    #[test]
    fn test_count_words_collapses_whitespace() {
        assert_eq!(count_words("  one\t two \n\nthree  "), 3);
    }

    #[test]
    fn test_count_words_empty() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t  "), 0);
    }

    #[test]
    fn test_article_derives_word_count_from_body() {
        let article = GeneratedArticle::new(
            ProviderId::OpenAi,
            "Title",
            "alpha beta gamma delta",
            "gpt-4o-mini",
        );
        assert_eq!(article.word_count, 4);
        assert_eq!(article.word_count, count_words(&article.body));
    }

    #[test]
    fn test_article_starts_unscored() {
        let article = GeneratedArticle::new(ProviderId::Gemini, "T", "body text", "gemini-2.0-flash");
        assert!(article.score.is_none());
    }

    #[test]
    fn test_article_serde_roundtrip() {
        let article =
            GeneratedArticle::new(ProviderId::Anthropic, "Title", "a b c", "claude-sonnet-4");
        let json = serde_json::to_string(&article).unwrap();
        // score omitted while unset
        assert!(!json.contains("score"));
        let back: GeneratedArticle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.provider, ProviderId::Anthropic);
        assert_eq!(back.word_count, 3);
        assert_eq!(back.produced_at, article.produced_at);
    }
}
