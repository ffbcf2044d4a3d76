// MockGenerator — testing utility for unit and integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use draftpress_types::{
    ArticleGenerator, BoxFuture, ContentBrief, Error, GeneratedArticle, ProviderId,
};

/// Create a minimal test article whose body has exactly `word_count`
/// whitespace-delimited tokens.
pub fn make_test_article(
    provider: ProviderId,
    title: &str,
    word_count: u32,
) -> GeneratedArticle {
    let body = vec!["word"; word_count as usize].join(" ");
    GeneratedArticle::new(provider, title, body, "test-model")
}

/// A mock provider adapter for testing. Returns pre-configured articles or
/// errors in the order they were queued (unified FIFO queue).
pub struct MockGenerator {
    id: ProviderId,
    /// Unified queue: Ok(article) or Err(error), consumed in insertion order.
    actions: Mutex<Vec<Result<GeneratedArticle, Error>>>,
    recorded: Mutex<Vec<ContentBrief>>,
    call_count: AtomicUsize,
    /// Optional delay before settling each call (for settlement-order tests;
    /// pair with `#[tokio::test(start_paused = true)]`).
    delay: Mutex<Option<Duration>>,
}

impl MockGenerator {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            actions: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            delay: Mutex::new(None),
        }
    }

    /// Queue a successful article. Returned by the next `generate()` call
    /// after all previously queued items have been consumed.
    pub fn with_article(self, article: GeneratedArticle) -> Self {
        self.actions.lock().unwrap().push(Ok(article));
        self
    }

    /// Queue an error. Returned by the next `generate()` call after all
    /// previously queued items have been consumed.
    pub fn with_error(self, error: Error) -> Self {
        self.actions.lock().unwrap().push(Err(error));
        self
    }

    /// Delay each call before it settles.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Return a clone of all briefs recorded by `generate()` calls.
    pub fn recorded_briefs(&self) -> Vec<ContentBrief> {
        self.recorded.lock().unwrap().clone()
    }
}

impl ArticleGenerator for MockGenerator {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn generate(&self, brief: ContentBrief) -> BoxFuture<'_, Result<GeneratedArticle, Error>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(brief);
        let delay = *self.delay.lock().unwrap();
        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            let mut actions = self.actions.lock().unwrap();
            if !actions.is_empty() {
                return actions.remove(0);
            }
            Err(Error::configuration("MockGenerator: no actions configured"))
        })
    }
}

// Arc delegation so tests can keep a handle for assertions after the
// orchestrator takes ownership of the boxed adapter is provided by the
// blanket `impl ArticleGenerator for Arc<T>` in draftpress-types (a local
// impl here would violate the orphan rule: both `Arc` and the trait are
// foreign to this crate).
