#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

//! Personalised exercise recommendations for elderly users.
//!
//! A UI collaborator hands an [`InputProfile`] to a [`RequestController`],
//! which validates it, renders the prompt, calls Gemini through
//! [`RecommendationClient`] and publishes either the completion text or a
//! user-facing error message.
//!
//! ```rust,no_run
//! # use elderfit::{InputProfile, RequestController, Settings};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let controller = RequestController::from_settings(&settings)?;
//! let input = InputProfile::builder()
//!     .api_key("your-api-key")
//!     .height("165")
//!     .weight("60")
//!     .pain_areas("무릎 관절")
//!     .build();
//! controller.submit(input).await;
//! println!("{:?}", controller.snapshot().phase);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod profile;
pub mod prompt;
pub mod telemetry;
pub mod validator;

pub use crate::client::{CompletionBackend, RecommendationClient};
pub use crate::config::{ApiKeyTransport, Settings, SettingsError};
pub use crate::controller::{
    DisplayState, Phase, RecommendationResult, RequestController, Submission,
};
pub use crate::credential::{ApiKeySource, CredentialChannel, SessionCredential};
pub use crate::error::{ApiError, PipelineError, ValidationError};
pub use crate::profile::{
    ExerciseFrequency, Field, InputProfile, NormalizedProfile, ResponseLanguage, TimeWindow,
};
pub use crate::prompt::PromptOptions;
pub use crate::validator::{ProfileValidator, ValidatedProfile};
