// Orchestrator — concurrent fan-out over enabled providers with
// settle-all-then-filter semantics.

use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use draftpress_types::{
    AdapterTimeout, ArticleGenerator, ContentBrief, Error, GeneratedArticle, ProviderCredentials,
    ProviderId,
};

use crate::providers::{AnthropicGenerator, GeminiGenerator, OpenAiGenerator};
use crate::selector::select_best_index;

/// One orchestration round's outcome set plus its observable failure detail.
///
/// `articles` holds one entry per provider that succeeded, in settlement
/// order — the order calls completed, not the order they were dispatched.
/// A round is only constructed with a non-empty `articles`; an empty outcome
/// surfaces as [`Error::all_providers_failed`] instead.
#[derive(Debug)]
pub struct GenerationRound {
    pub articles: Vec<GeneratedArticle>,
    /// Provider failures recovered during the round; never empty-checked by
    /// callers to decide success (partial failure is not failure).
    pub failures: Vec<Error>,
    /// How many providers were dispatched (successes + failures).
    pub dispatched: usize,
    pub elapsed: Duration,
}

impl GenerationRound {
    pub fn success_count(&self) -> usize {
        self.articles.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// The composed generate-and-pick-one result.
#[derive(Debug)]
pub struct GenerationReport {
    pub best: GeneratedArticle,
    /// Remaining successful articles, still in settlement order.
    pub alternatives: Vec<GeneratedArticle>,
    pub failures: Vec<Error>,
    pub elapsed: Duration,
}

/// The core orchestrator holding one adapter per enabled provider.
pub struct Orchestrator {
    providers: Vec<Box<dyn ArticleGenerator>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("providers", &self.provider_ids())
            .finish()
    }
}

/// Builder for constructing an Orchestrator from explicit adapters.
pub struct OrchestratorBuilder {
    providers: Vec<Box<dyn ArticleGenerator>>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register a provider adapter. Dispatch starts all registered adapters
    /// concurrently; registration order carries no priority.
    pub fn provider(mut self, adapter: Box<dyn ArticleGenerator>) -> Self {
        self.providers.push(adapter);
        self
    }

    /// Build the Orchestrator. Fails with NoProvidersConfigured when no
    /// adapter was registered.
    pub fn build(self) -> Result<Orchestrator, Error> {
        if self.providers.is_empty() {
            return Err(Error::no_providers_configured());
        }
        Ok(Orchestrator {
            providers: self.providers,
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Create a new OrchestratorBuilder.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Build an orchestrator with one adapter per enabled credential, using
    /// default adapter timeouts.
    ///
    /// Fails with NoProvidersConfigured when the enabled set is empty — no
    /// network call is ever attempted in that case.
    pub fn from_credentials(credentials: &ProviderCredentials) -> Result<Self, Error> {
        Self::from_credentials_with_timeout(credentials, AdapterTimeout::default())
    }

    /// Build an orchestrator with one adapter per enabled credential and the
    /// given adapter timeouts.
    pub fn from_credentials_with_timeout(
        credentials: &ProviderCredentials,
        timeout: AdapterTimeout,
    ) -> Result<Self, Error> {
        // Each adapter gets its own SecretString rebuilt from the credential.
        let key_for = |secret: &SecretString| SecretString::from(secret.expose_secret().to_owned());

        let mut builder = OrchestratorBuilder::new();
        if let Some(key) = credentials.get(ProviderId::OpenAi) {
            builder = builder.provider(Box::new(OpenAiGenerator::new_with_timeout(
                key_for(key),
                timeout.clone(),
            )));
        }
        if let Some(key) = credentials.get(ProviderId::Anthropic) {
            builder = builder.provider(Box::new(AnthropicGenerator::new_with_timeout(
                key_for(key),
                timeout.clone(),
            )));
        }
        if let Some(key) = credentials.get(ProviderId::Gemini) {
            builder = builder.provider(Box::new(GeminiGenerator::new_with_timeout(
                key_for(key),
                timeout,
            )));
        }
        builder.build()
    }

    /// Auto-register providers whose API keys are found in environment
    /// variables (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GEMINI_API_KEY` /
    /// `GOOGLE_API_KEY`).
    ///
    /// Timeout configuration (optional, shared across all adapters):
    /// - `DRAFTPRESS_CONNECT_TIMEOUT` — connection timeout in seconds (default: 10)
    /// - `DRAFTPRESS_REQUEST_TIMEOUT` — request timeout in seconds (default: 120)
    pub fn from_env() -> Result<Self, Error> {
        Self::from_credentials_with_timeout(&ProviderCredentials::from_env(), Self::timeout_from_env())
    }

    /// Parse timeout configuration from environment variables.
    /// Falls back to `AdapterTimeout::default()` for any unset or unparseable values.
    fn timeout_from_env() -> AdapterTimeout {
        let defaults = AdapterTimeout::default();
        AdapterTimeout {
            connect: std::env::var("DRAFTPRESS_CONNECT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(defaults.connect),
            request: std::env::var("DRAFTPRESS_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(defaults.request),
        }
    }

    /// The registered providers, in registration order.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Dispatch the brief to every registered provider concurrently and wait
    /// for all of them to settle.
    ///
    /// Join-all-settle semantics: every dispatched call runs to success or
    /// failure before this returns — never first-wins. Individual failures
    /// are logged, recorded in the round, and do not abort siblings. No
    /// round-level timeout exists by design; the per-adapter connect/request
    /// timeouts are the only internal bound, and in-flight calls are never
    /// cancelled.
    pub async fn generate_all(&self, brief: &ContentBrief) -> Result<GenerationRound, Error> {
        brief.validate()?;

        let started = Instant::now();
        let dispatched = self.providers.len();

        // All futures start together; next() yields them in completion order.
        let mut in_flight: FuturesUnordered<_> = self
            .providers
            .iter()
            .map(|provider| {
                let brief = brief.clone();
                async move { (provider.id(), provider.generate(brief).await) }
            })
            .collect();

        let mut articles: Vec<GeneratedArticle> = Vec::new();
        let mut failures: Vec<Error> = Vec::new();

        while let Some((id, outcome)) = in_flight.next().await {
            match outcome {
                Ok(article) => {
                    tracing::debug!(
                        provider = %id,
                        words = article.word_count,
                        "provider settled with an article"
                    );
                    articles.push(article);
                }
                Err(error) => {
                    tracing::warn!(
                        provider = %id,
                        error = %error,
                        "provider failed; siblings unaffected"
                    );
                    failures.push(error);
                }
            }
        }

        let elapsed = started.elapsed();

        if articles.is_empty() {
            return Err(Error::all_providers_failed(&failures));
        }

        tracing::debug!(
            succeeded = articles.len(),
            failed = failures.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "round settled"
        );

        Ok(GenerationRound {
            articles,
            failures,
            dispatched,
            elapsed,
        })
    }

    /// The composed operation: generate from every provider, then pick one.
    ///
    /// The report keeps the non-selected articles as alternatives and the
    /// per-provider failures for callers that expose partial-failure detail.
    pub async fn generate_and_select(
        &self,
        brief: &ContentBrief,
    ) -> Result<GenerationReport, Error> {
        let GenerationRound {
            mut articles,
            failures,
            dispatched: _,
            elapsed,
        } = self.generate_all(brief).await?;

        // The round guarantees a non-empty outcome set.
        let best_idx = select_best_index(&articles).unwrap_or_default();
        let best = articles.remove(best_idx);

        Ok(GenerationReport {
            best,
            alternatives: articles,
            failures,
            elapsed,
        })
    }
}
