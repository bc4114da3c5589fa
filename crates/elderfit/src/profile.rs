//! Profile snapshots: the raw form input and its normalized counterpart.

use bon::Builder;
use core::fmt;
use serde::Deserialize;

/// Rendered for empty pain areas and diseases.
pub const DEFAULT_NONE: &str = "없음";
/// Rendered for an empty personality/activity field.
pub const DEFAULT_PERSONALITY: &str = "일반적";

/// Raw form values captured on submit. Every field is the string the user
/// typed; nothing is parsed until validation.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Builder)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProfile {
    /// Credential typed into the form. Only read when the configured key
    /// source is user-entered.
    #[builder(default, into)]
    pub api_key: String,
    #[builder(default, into)]
    pub height: String,
    #[builder(default, into)]
    pub weight: String,
    #[builder(default, into)]
    pub body_fat_percent: String,
    #[builder(default, into)]
    pub muscle_mass: String,
    #[builder(default, into)]
    pub pain_areas: String,
    #[builder(default, into)]
    pub diseases: String,
    #[builder(default, into)]
    pub personality: String,
    #[builder(default, into)]
    pub age: String,
    #[builder(default, into)]
    pub exercise_frequency: String,
    #[builder(default, into)]
    pub preferred_time_window: String,
    #[builder(default, into)]
    pub response_language: String,
}

impl fmt::Debug for InputProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProfile")
            .field(
                "api_key",
                &if self.api_key.is_empty() { "" } else { "[REDACTED]" },
            )
            .field("height", &self.height)
            .field("weight", &self.weight)
            .field("body_fat_percent", &self.body_fat_percent)
            .field("muscle_mass", &self.muscle_mass)
            .field("pain_areas", &self.pain_areas)
            .field("diseases", &self.diseases)
            .field("personality", &self.personality)
            .field("age", &self.age)
            .field("exercise_frequency", &self.exercise_frequency)
            .field("preferred_time_window", &self.preferred_time_window)
            .field("response_language", &self.response_language)
            .finish()
    }
}

/// Validated profile with numbers parsed and defaults substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub pain_areas: String,
    pub diseases: String,
    pub personality: String,
    pub age: Option<u32>,
    pub exercise_frequency: Option<ExerciseFrequency>,
    pub preferred_time_window: Option<TimeWindow>,
    pub response_language: ResponseLanguage,
}

/// Profile fields that can fail validation, named as on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Height,
    Weight,
    BodyFatPercent,
    MuscleMass,
    Age,
    ExerciseFrequency,
    PreferredTimeWindow,
    ResponseLanguage,
}

impl Field {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Form label shown to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Height => "키",
            Field::Weight => "몸무게",
            Field::BodyFatPercent => "체지방량",
            Field::MuscleMass => "골격근량",
            Field::Age => "나이",
            Field::ExerciseFrequency => "현재 운동 빈도",
            Field::PreferredTimeWindow => "선호 운동 시간대",
            Field::ResponseLanguage => "응답 언어",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ExerciseFrequency {
    #[strum(to_string = "none", serialize = "운동 안 함")]
    None,
    #[strum(to_string = "1-2", serialize = "주 1-2회")]
    OneToTwoPerWeek,
    #[strum(to_string = "3-4", serialize = "주 3-4회")]
    ThreeToFourPerWeek,
    #[strum(to_string = "daily", serialize = "매일")]
    Daily,
}

impl ExerciseFrequency {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExerciseFrequency::None => "운동 안 함",
            ExerciseFrequency::OneToTwoPerWeek => "주 1-2회",
            ExerciseFrequency::ThreeToFourPerWeek => "주 3-4회",
            ExerciseFrequency::Daily => "매일",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum TimeWindow {
    #[strum(to_string = "morning", serialize = "오전")]
    Morning,
    #[strum(to_string = "afternoon", serialize = "오후")]
    Afternoon,
    #[strum(to_string = "evening", serialize = "저녁")]
    Evening,
}

impl TimeWindow {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Morning => "오전",
            TimeWindow::Afternoon => "오후",
            TimeWindow::Evening => "저녁",
        }
    }
}

/// Language the recommendation is written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::Display, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ResponseLanguage {
    #[default]
    #[strum(to_string = "ko", serialize = "korean", serialize = "한국어")]
    Korean,
    #[strum(to_string = "en", serialize = "english", serialize = "영어")]
    English,
}

impl ResponseLanguage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResponseLanguage::Korean => "한국어",
            ResponseLanguage::English => "영어",
        }
    }
}
