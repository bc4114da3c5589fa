use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

use crate::credential::{ApiKeySource, CredentialChannel, SessionCredential};
use crate::prompt::PromptOptions;

/// Prefix of every setting read from the environment, e.g. `ELDERFIT__MODEL_ID`.
pub const ENV_PREFIX: &str = "ELDERFIT";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("base_url `{0}` is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("model_id must not be empty")]
    EmptyModelId,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// How the key travels to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyTransport {
    /// `?key=...`
    #[default]
    Query,
    /// `x-goog-api-key: ...`
    Header,
}

impl From<ApiKeyTransport> for gemini_ox::ApiKeyPlacement {
    fn from(transport: ApiKeyTransport) -> Self {
        match transport {
            ApiKeyTransport::Query => gemini_ox::ApiKeyPlacement::query(),
            ApiKeyTransport::Header => gemini_ox::ApiKeyPlacement::header(),
        }
    }
}

/// Deployment configuration
///
/// Loaded from environment variables with the `ELDERFIT__` prefix:
/// `ELDERFIT__MODEL_ID`, `ELDERFIT__BASE_URL`, `ELDERFIT__API_VERSION`,
/// `ELDERFIT__API_KEY_SOURCE` (`user_entered` | `preconfigured`),
/// `ELDERFIT__API_KEY_ENV`, `ELDERFIT__API_KEY_TRANSPORT` (`query` | `header`),
/// `ELDERFIT__MAX_RECOMMENDATION_LENGTH`, `ELDERFIT__REQUEST_TIMEOUT_SECS`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub api_key_source: ApiKeySource,
    /// Name of the variable holding the deployment secret.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub api_key_transport: ApiKeyTransport,
    #[serde(default)]
    pub max_recommendation_length: Option<usize>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(skip)]
    pub(crate) preconfigured_key: Option<SessionCredential>,
}

fn default_model_id() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    gemini_ox::DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    gemini_ox::DEFAULT_API_VERSION.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            api_key_source: ApiKeySource::default(),
            api_key_env: default_api_key_env(),
            api_key_transport: ApiKeyTransport::default(),
            max_recommendation_length: None,
            request_timeout_secs: None,
            preconfigured_key: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// The deployment secret is only read when `api_key_source` is
    /// `preconfigured`. A missing secret is not an error here; it surfaces
    /// as `MissingCredential` on the first submit.
    ///
    /// # Errors
    ///
    /// - `SettingsError::Config` if a variable does not parse into its field
    ///   (for example an unknown `API_KEY_SOURCE` value)
    /// - `SettingsError::EmptyModelId` if `MODEL_ID` is blank
    /// - `SettingsError::InvalidBaseUrl` if `BASE_URL` is not a URL
    pub fn load() -> Result<Self, SettingsError> {
        Self::build(Environment::with_prefix(ENV_PREFIX), |name| {
            std::env::var(name).ok()
        })
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. The deployment secret is looked up in the same map.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::load`].
    pub fn load_from(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        Self::build(
            Environment::with_prefix(ENV_PREFIX).source(Some(vars.clone())),
            |name| vars.get(name).cloned(),
        )
    }

    fn build(
        environment: Environment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings: Settings = Config::builder()
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        if settings.api_key_source == ApiKeySource::Preconfigured {
            settings.preconfigured_key =
                lookup(&settings.api_key_env).and_then(SessionCredential::new);
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.model_id.trim().is_empty() {
            return Err(SettingsError::EmptyModelId);
        }
        url::Url::parse(&self.base_url)
            .map_err(|_| SettingsError::InvalidBaseUrl(self.base_url.clone()))?;
        Ok(())
    }

    /// Sets the deployment secret directly, switching the source to `preconfigured`.
    #[must_use]
    pub fn with_preconfigured_key(mut self, key: Option<SessionCredential>) -> Self {
        self.api_key_source = ApiKeySource::Preconfigured;
        self.preconfigured_key = key;
        self
    }

    #[must_use]
    pub fn credential_channel(&self) -> CredentialChannel {
        match self.api_key_source {
            ApiKeySource::UserEntered => CredentialChannel::UserEntered,
            ApiKeySource::Preconfigured => {
                CredentialChannel::Preconfigured(self.preconfigured_key.clone())
            }
        }
    }

    #[must_use]
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            target_length: self.max_recommendation_length,
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(&HashMap::new()).unwrap();
        assert_eq!(settings.model_id, "gemini-2.0-flash");
        assert_eq!(settings.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(settings.api_version, "v1beta");
        assert_eq!(settings.api_key_source, ApiKeySource::UserEntered);
        assert_eq!(settings.api_key_transport, ApiKeyTransport::Query);
        assert_eq!(settings.prompt_options(), PromptOptions::default());
        assert_eq!(settings.request_timeout(), None);
        assert_eq!(settings.credential_channel(), CredentialChannel::UserEntered);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::load_from(&vars(&[
            ("ELDERFIT__MODEL_ID", "gemini-1.5-pro"),
            ("ELDERFIT__API_KEY_TRANSPORT", "header"),
            ("ELDERFIT__MAX_RECOMMENDATION_LENGTH", "1200"),
            ("ELDERFIT__REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(settings.model_id, "gemini-1.5-pro");
        assert_eq!(settings.api_key_transport, ApiKeyTransport::Header);
        assert_eq!(settings.prompt_options().target_length, Some(1200));
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_preconfigured_secret_from_named_variable() {
        let settings = Settings::load_from(&vars(&[
            ("ELDERFIT__API_KEY_SOURCE", "preconfigured"),
            ("ELDERFIT__API_KEY_ENV", "VITE_GEMINI_KEY"),
            ("VITE_GEMINI_KEY", "deployed-secret"),
        ]))
        .unwrap();

        match settings.credential_channel() {
            CredentialChannel::Preconfigured(Some(credential)) => {
                assert_eq!(credential.expose(), "deployed-secret");
            }
            other => panic!("Expected preconfigured credential, got {other:?}"),
        }
        assert!(!format!("{settings:?}").contains("deployed-secret"));
    }

    #[test]
    fn test_user_entered_source_ignores_secret() {
        let settings =
            Settings::load_from(&vars(&[("GEMINI_API_KEY", "deployed-secret")])).unwrap();
        assert_eq!(settings.credential_channel(), CredentialChannel::UserEntered);
    }

    #[test]
    fn test_missing_secret_is_not_a_load_error() {
        let settings =
            Settings::load_from(&vars(&[("ELDERFIT__API_KEY_SOURCE", "preconfigured")])).unwrap();
        assert_eq!(
            settings.credential_channel(),
            CredentialChannel::Preconfigured(None)
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Settings::load_from(&vars(&[("ELDERFIT__API_KEY_SOURCE", "both")])).is_err());
        assert!(matches!(
            Settings::load_from(&vars(&[("ELDERFIT__BASE_URL", "not a url")])),
            Err(SettingsError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            Settings::load_from(&vars(&[("ELDERFIT__MODEL_ID", "   ")])),
            Err(SettingsError::EmptyModelId)
        ));
    }
}
