//! Session-scoped API credential.

use core::fmt;
use serde::Deserialize;

use crate::profile::InputProfile;

/// An API key held in memory for the current session only.
///
/// No `Display` or `Serialize`; the value is only readable through
/// [`SessionCredential::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Trims `value`; returns `None` when nothing is left.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for attaching to an outgoing request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential([REDACTED])")
    }
}

/// Which channel supplies the credential. Exactly one is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApiKeySource {
    /// The user types the key into the form on every session.
    #[default]
    UserEntered,
    /// The key is a deployment secret read at startup.
    Preconfigured,
}

/// Resolves the session credential from the configured channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialChannel {
    UserEntered,
    Preconfigured(Option<SessionCredential>),
}

impl CredentialChannel {
    /// The credential for this submit, if the active channel has one.
    /// The inactive channel is never consulted.
    #[must_use]
    pub fn resolve(&self, input: &InputProfile) -> Option<SessionCredential> {
        match self {
            CredentialChannel::UserEntered => SessionCredential::new(&input.api_key),
            CredentialChannel::Preconfigured(secret) => secret.clone(),
        }
    }

    #[must_use]
    pub fn source(&self) -> ApiKeySource {
        match self {
            CredentialChannel::UserEntered => ApiKeySource::UserEntered,
            CredentialChannel::Preconfigured(_) => ApiKeySource::Preconfigured,
        }
    }
}
