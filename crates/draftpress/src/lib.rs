// draftpress: Layers 2–4 — provider adapters, orchestration, selection,
// topic calendar, and the publishing sink
#![allow(clippy::result_large_err)]

pub mod orchestrator;
pub mod prompt;
pub mod providers;
pub mod publish;
pub mod selector;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod topics;
pub mod util;

// --- Curated re-exports from draftpress-types (Layer 1) ---
// We avoid `pub use draftpress_types::*` to keep the public API surface
// intentional and prevent internal types from leaking to consumers.
pub use draftpress_types::{
    count_words,
    AdapterTimeout,
    ArticleGenerator,
    // Type aliases
    BoxFuture,
    Category,
    // Brief and result types
    ContentBrief,
    // Errors
    Error,
    ErrorKind,
    GeneratedArticle,
    // Credentials
    ProviderCredentials,
    ProviderId,
};

// --- Core orchestration types at crate root ---
pub use orchestrator::{GenerationReport, GenerationRound, Orchestrator, OrchestratorBuilder};

// --- Selection at crate root ---
pub use selector::{effective_score, select_best};

// --- Prompt assembly at crate root ---
pub use prompt::build_prompt;

// --- Topic calendar at crate root ---
pub use topics::{brief_for_date, category_for_weekday};

// --- Publishing sink at crate root ---
pub use publish::{PublishedDraft, WordPressPublisher};

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the curated re-exports cover the essential public types.
    #[test]
    fn test_curated_reexports_available() {
        let _ = Category::Technology;
        let _ = ProviderId::OpenAi;
        let _ = ErrorKind::AllProvidersFailed;
        let _ = AdapterTimeout::default();
        let _ = ProviderCredentials::default();
        let _: fn() -> OrchestratorBuilder = Orchestrator::builder;
        assert_eq!(count_words("a b"), 2);
    }

    #[test]
    fn test_prompt_reexported_at_crate_root() {
        let brief = ContentBrief::new("Topic", Category::Travel).keywords(vec!["kw".into()]);
        assert!(build_prompt(&brief).contains("Topic"));
    }
}
