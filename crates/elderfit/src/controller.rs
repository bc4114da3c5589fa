//! Sequencing of validate → build → send with a single-flight display.
//!
//! Every submit takes the next generation number. A transition is only
//! written to the shared [`DisplayState`] while its generation is still the
//! latest, so a slow earlier request can never overwrite a newer one. Work
//! already in flight is not cancelled; its result is dropped on arrival.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{CompletionBackend, RecommendationClient};
use crate::config::{Settings, SettingsError};
use crate::error::PipelineError;
use crate::profile::InputProfile;
use crate::prompt::{self, PromptOptions};
use crate::validator::ProfileValidator;

/// Completion text together with the submit that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationResult {
    pub text: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Building,
    Sending,
    Succeeded(RecommendationResult),
    /// User-facing message.
    Failed(String),
}

impl Phase {
    /// True while a request is between submit and completion.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Validating | Phase::Building | Phase::Sending)
    }
}

/// What the UI renders: the latest generation and where it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub generation: u64,
    pub phase: Phase,
}

/// How a submit ended from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The final phase was published to the display.
    Applied(Phase),
    /// A newer submit (or a reset) took over; nothing was published.
    Superseded { generation: u64 },
}

pub struct RequestController<B> {
    validator: ProfileValidator,
    options: PromptOptions,
    backend: B,
    state: watch::Sender<DisplayState>,
}

impl RequestController<RecommendationClient> {
    /// Wires validator, prompt options and a Gemini-backed client from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::HttpClient` if the HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self::new(
            ProfileValidator::new(settings.credential_channel()),
            settings.prompt_options(),
            RecommendationClient::from_settings(settings)?,
        ))
    }
}

impl<B: CompletionBackend> RequestController<B> {
    pub fn new(validator: ProfileValidator, options: PromptOptions, backend: B) -> Self {
        let (state, _) = watch::channel(DisplayState::default());
        Self {
            validator,
            options,
            backend,
            state,
        }
    }

    /// Receiver that observes every published transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs one submit to completion.
    ///
    /// Always enters `Validating`, whatever the current phase. Errors are
    /// folded into [`Phase::Failed`] with a user-facing message.
    pub async fn submit(&self, input: InputProfile) -> Submission {
        let generation = self.begin();
        info!(
            generation,
            key_source = %self.validator.channel().source(),
            "recommendation requested"
        );

        let phase = match self.run(generation, &input).await {
            Ok(Some(text)) => Phase::Succeeded(RecommendationResult { text, generation }),
            Ok(None) => return Submission::Superseded { generation },
            Err(err) => {
                warn!(generation, error = %err, "recommendation failed");
                Phase::Failed(err.user_message())
            }
        };

        if self.transition(generation, phase.clone()) {
            info!(
                generation,
                succeeded = matches!(phase, Phase::Succeeded(_)),
                "recommendation published"
            );
            Submission::Applied(phase)
        } else {
            debug!(generation, "discarding superseded completion");
            Submission::Superseded { generation }
        }
    }

    /// Back to `Idle`. Anything still in flight becomes stale.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            state.generation += 1;
            state.phase = Phase::Idle;
        });
    }

    /// `Ok(None)` when the request went stale before the network call.
    async fn run(
        &self,
        generation: u64,
        input: &InputProfile,
    ) -> Result<Option<String>, PipelineError> {
        let validated = self.validator.validate(input)?;

        if !self.transition(generation, Phase::Building) {
            return Ok(None);
        }
        let prompt = prompt::build(&validated.profile, &self.options);

        if !self.transition(generation, Phase::Sending) {
            return Ok(None);
        }
        let text = self.backend.generate(&prompt, &validated.credential).await?;
        Ok(Some(text))
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.phase = Phase::Validating;
            generation = state.generation;
        });
        generation
    }

    /// Publishes `phase` if `generation` is still the latest.
    fn transition(&self, generation: u64, phase: Phase) -> bool {
        self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.phase = phase;
            true
        })
    }
}
