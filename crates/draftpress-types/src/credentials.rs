// Provider identities and the per-provider credential set.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// The supported vendors, in dispatch-registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderId {
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Anthropic, ProviderId::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One optional secret per provider. A provider is enabled iff its credential
/// is present and non-empty after trimming — an empty string in the
/// environment disables the provider rather than producing a doomed adapter.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub openai: Option<SecretString>,
    pub anthropic: Option<SecretString>,
    pub gemini: Option<SecretString>,
}

impl ProviderCredentials {
    /// Read credentials from the environment.
    ///
    /// Keys: `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GEMINI_API_KEY`
    /// (fallback: `GOOGLE_API_KEY`).
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().map(SecretString::from);
        Self {
            openai: read("OPENAI_API_KEY"),
            anthropic: read("ANTHROPIC_API_KEY"),
            gemini: read("GEMINI_API_KEY").or_else(|| read("GOOGLE_API_KEY")),
        }
    }

    /// Builder-style setter for a single provider's credential.
    pub fn with(mut self, provider: ProviderId, key: impl Into<String>) -> Self {
        let secret = Some(SecretString::from(key.into()));
        match provider {
            ProviderId::OpenAi => self.openai = secret,
            ProviderId::Anthropic => self.anthropic = secret,
            ProviderId::Gemini => self.gemini = secret,
        }
        self
    }

    /// The credential for one provider, if enabled.
    pub fn get(&self, provider: ProviderId) -> Option<&SecretString> {
        let secret = match provider {
            ProviderId::OpenAi => self.openai.as_ref(),
            ProviderId::Anthropic => self.anthropic.as_ref(),
            ProviderId::Gemini => self.gemini.as_ref(),
        };
        secret.filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// Whether one provider is enabled (credential present and non-empty).
    pub fn is_enabled(&self, provider: ProviderId) -> bool {
        self.get(provider).is_some()
    }

    /// The enabled providers, in declaration order.
    pub fn enabled(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}

impl std::fmt::Debug for ProviderCredentials {
    // Secrets never reach Debug output; only the enabled set is shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("enabled", &self.enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_provider_id_as_str() {
        assert_eq!(ProviderId::OpenAi.as_str(), "openai");
        assert_eq!(ProviderId::Anthropic.as_str(), "anthropic");
        assert_eq!(ProviderId::Gemini.as_str(), "gemini");
    }

    #[test]
    fn test_provider_id_serde() {
        let json = serde_json::to_string(&ProviderId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
        let back: ProviderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProviderId::OpenAi);
    }

    #[test]
    fn test_default_has_no_enabled_providers() {
        let creds = ProviderCredentials::default();
        assert!(creds.enabled().is_empty());
    }

    #[test]
    fn test_empty_string_credential_is_disabled() {
        let creds = ProviderCredentials::default()
            .with(ProviderId::OpenAi, "key1")
            .with(ProviderId::Anthropic, "")
            .with(ProviderId::Gemini, "key3");
        assert_eq!(
            creds.enabled(),
            vec![ProviderId::OpenAi, ProviderId::Gemini]
        );
        assert!(!creds.is_enabled(ProviderId::Anthropic));
    }

    #[test]
    fn test_whitespace_only_credential_is_disabled() {
        let creds = ProviderCredentials::default().with(ProviderId::OpenAi, "   ");
        assert!(creds.enabled().is_empty());
    }

    #[test]
    fn test_enabled_follows_declaration_order() {
        let creds = ProviderCredentials::default()
            .with(ProviderId::Gemini, "g")
            .with(ProviderId::OpenAi, "o")
            .with(ProviderId::Anthropic, "a");
        assert_eq!(
            creds.enabled(),
            vec![ProviderId::OpenAi, ProviderId::Anthropic, ProviderId::Gemini]
        );
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let creds = ProviderCredentials::default().with(ProviderId::OpenAi, "sk-secret-value");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("OpenAi"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_keys() {
        // Safety: tests run serially via #[serial], no concurrent env access.
        unsafe {
            std::env::set_var("OPENAI_API_KEY", "env-key");
            std::env::remove_var("ANTHROPIC_API_KEY");
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GOOGLE_API_KEY");
        }
        let creds = ProviderCredentials::from_env();
        assert_eq!(creds.enabled(), vec![ProviderId::OpenAi]);
        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_gemini_falls_back_to_google_key() {
        // Safety: tests run serially via #[serial], no concurrent env access.
        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("ANTHROPIC_API_KEY");
            std::env::remove_var("GEMINI_API_KEY");
            std::env::set_var("GOOGLE_API_KEY", "google-key");
        }
        let creds = ProviderCredentials::from_env();
        assert!(creds.is_enabled(ProviderId::Gemini));
        unsafe {
            std::env::remove_var("GOOGLE_API_KEY");
        }
    }
}
