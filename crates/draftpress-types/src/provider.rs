// ArticleGenerator trait — the contract every provider adapter must implement.

use std::future::Future;
use std::pin::Pin;

use crate::article::GeneratedArticle;
use crate::brief::ContentBrief;
use crate::credentials::ProviderId;
use crate::error::Error;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The contract every provider adapter must implement.
///
/// Uses an explicit BoxFuture return type instead of the `async-trait`
/// macro for two reasons:
/// 1. No hidden heap allocations from macro expansion
/// 2. Explicit control over lifetime bounds
///
/// Adapters are constructed only for enabled providers — a missing credential
/// is the orchestrator's concern, never the adapter's.
pub trait ArticleGenerator: Send + Sync {
    /// Which vendor this adapter wraps.
    fn id(&self) -> ProviderId;

    /// Issue exactly one generation call for the brief. No retries, no
    /// streaming, no multi-turn exchange.
    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>>;
}

/// Blanket delegation so a shared handle (e.g. `Arc<MockGenerator>` in tests)
/// can be registered as an adapter while the caller keeps a clone for
/// assertions. Defined here, in the trait's home crate, because an equivalent
/// impl in a downstream crate would violate the orphan rule.
impl<T: ArticleGenerator + ?Sized> ArticleGenerator for std::sync::Arc<T> {
    fn id(&self) -> ProviderId {
        self.as_ref().id()
    }

    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
        self.as_ref().generate(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::Category;

    // Compile-time verification: a stub can implement the trait and be boxed.
    struct StubGenerator;

    impl ArticleGenerator for StubGenerator {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
            Box::pin(async move {
                Ok(GeneratedArticle::new(
                    ProviderId::OpenAi,
                    brief.topic,
                    "stub body",
                    "stub-model",
                ))
            })
        }
    }

    #[test]
    fn test_article_generator_trait_object() {
        let generator: Box<dyn ArticleGenerator> = Box::new(StubGenerator);
        assert_eq!(generator.id(), ProviderId::OpenAi);
    }

    #[tokio::test]
    async fn test_article_generator_title_follows_brief_topic() {
        let generator: Box<dyn ArticleGenerator> = Box::new(StubGenerator);
        let brief = ContentBrief::new("Stub topic", Category::Technology)
            .keywords(vec!["stub".into()]);
        let article = generator.generate(brief).await.unwrap();
        assert_eq!(article.title, "Stub topic");
    }
}
