//! Normalization and validation of a submitted [`InputProfile`].
//!
//! Validation is fail-fast: the credential is checked first, then fields in
//! the order of [`FIELD_ORDER`], and the first offending field is reported.

use std::str::FromStr;

use crate::credential::{CredentialChannel, SessionCredential};
use crate::error::ValidationError;
use crate::profile::{
    DEFAULT_NONE, DEFAULT_PERSONALITY, ExerciseFrequency, Field, InputProfile, NormalizedProfile,
    ResponseLanguage, TimeWindow,
};

/// Order in which fields are checked.
pub const FIELD_ORDER: [Field; 8] = [
    Field::Height,
    Field::Weight,
    Field::BodyFatPercent,
    Field::MuscleMass,
    Field::Age,
    Field::ExerciseFrequency,
    Field::PreferredTimeWindow,
    Field::ResponseLanguage,
];

const MAX_BODY_FAT_PERCENT: f64 = 100.0;
const MAX_AGE: u32 = 150;

/// Output of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProfile {
    pub profile: NormalizedProfile,
    pub credential: SessionCredential,
}

#[derive(Debug, Clone)]
pub struct ProfileValidator {
    channel: CredentialChannel,
}

impl ProfileValidator {
    #[must_use]
    pub fn new(channel: CredentialChannel) -> Self {
        Self { channel }
    }

    #[must_use]
    pub fn channel(&self) -> &CredentialChannel {
        &self.channel
    }

    /// # Errors
    ///
    /// - `ValidationError::MissingCredential` when the configured channel has
    ///   no credential, regardless of the other fields
    /// - `ValidationError::InvalidField` for the first field, in
    ///   [`FIELD_ORDER`], that fails to parse or is out of range
    pub fn validate(&self, input: &InputProfile) -> Result<ValidatedProfile, ValidationError> {
        let credential = self
            .channel
            .resolve(input)
            .ok_or(ValidationError::MissingCredential)?;

        let profile = NormalizedProfile {
            height_cm: non_negative(&input.height, Field::Height)?,
            weight_kg: non_negative(&input.weight, Field::Weight)?,
            body_fat_percent: percentage(&input.body_fat_percent, Field::BodyFatPercent)?,
            muscle_mass_kg: non_negative(&input.muscle_mass, Field::MuscleMass)?,
            age: age(&input.age)?,
            exercise_frequency: enumerated::<ExerciseFrequency>(
                &input.exercise_frequency,
                Field::ExerciseFrequency,
            )?,
            preferred_time_window: enumerated::<TimeWindow>(
                &input.preferred_time_window,
                Field::PreferredTimeWindow,
            )?,
            response_language: enumerated::<ResponseLanguage>(
                &input.response_language,
                Field::ResponseLanguage,
            )?
            .unwrap_or_default(),
            pain_areas: text_or(&input.pain_areas, DEFAULT_NONE),
            diseases: text_or(&input.diseases, DEFAULT_NONE),
            personality: text_or(&input.personality, DEFAULT_PERSONALITY),
        };

        Ok(ValidatedProfile {
            profile,
            credential,
        })
    }
}

/// Blank input is absent; anything else must be a finite, non-negative number.
fn non_negative(raw: &str, field: Field) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        // abs() folds -0 into 0
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value.abs())),
        _ => Err(ValidationError::InvalidField(field)),
    }
}

fn percentage(raw: &str, field: Field) -> Result<Option<f64>, ValidationError> {
    match non_negative(raw, field)? {
        Some(value) if value > MAX_BODY_FAT_PERCENT => Err(ValidationError::InvalidField(field)),
        other => Ok(other),
    }
}

fn age(raw: &str) -> Result<Option<u32>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u32>() {
        Ok(years) if years <= MAX_AGE => Ok(Some(years)),
        _ => Err(ValidationError::InvalidField(Field::Age)),
    }
}

fn enumerated<T: FromStr>(raw: &str, field: Field) -> Result<Option<T>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    T::from_str(raw)
        .map(Some)
        .map_err(|_| ValidationError::InvalidField(field))
}

/// Trims and collapses every whitespace run (newlines included) to one space.
fn text_or(raw: &str, default: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        default.to_string()
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::ApiKeySource;

    fn validator() -> ProfileValidator {
        ProfileValidator::new(CredentialChannel::UserEntered)
    }

    #[test]
    fn test_missing_credential_wins_over_field_errors() {
        let input = InputProfile::builder()
            .weight("-5")
            .body_fat_percent("150")
            .build();
        assert_eq!(
            validator().validate(&input),
            Err(ValidationError::MissingCredential)
        );
    }

    #[test]
    fn test_missing_preconfigured_secret() {
        let validator = ProfileValidator::new(CredentialChannel::Preconfigured(None));
        assert_eq!(validator.channel().source(), ApiKeySource::Preconfigured);
        let input = InputProfile::builder()
            .api_key("test-key")
            .height("165")
            .build();
        assert_eq!(
            validator.validate(&input),
            Err(ValidationError::MissingCredential)
        );
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let input = InputProfile::builder()
            .api_key("test-key")
            .weight("-60")
            .build();
        assert_eq!(
            validator().validate(&input),
            Err(ValidationError::InvalidField(Field::Weight))
        );
    }

    #[test]
    fn test_body_fat_over_hundred_is_rejected() {
        let input = InputProfile::builder()
            .api_key("test-key")
            .body_fat_percent("150")
            .build();
        assert_eq!(
            validator().validate(&input),
            Err(ValidationError::InvalidField(Field::BodyFatPercent))
        );
    }

    #[test]
    fn test_non_numeric_and_non_finite_values() {
        for raw in ["abc", "165cm", "NaN", "inf", "1e400"] {
            let input = InputProfile::builder()
                .api_key("test-key")
                .height(raw)
                .build();
            assert_eq!(
                validator().validate(&input),
                Err(ValidationError::InvalidField(Field::Height)),
                "height {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_first_offending_field_is_reported() {
        let input = InputProfile::builder()
            .api_key("test-key")
            .muscle_mass("-1")
            .weight("heavy")
            .age("abc")
            .build();
        assert_eq!(
            validator().validate(&input),
            Err(ValidationError::InvalidField(Field::Weight))
        );
    }

    #[test]
    fn test_age_and_enumerations() {
        let cases: [(fn(&mut InputProfile), Field); 5] = [
            (|i| i.age = "72.5".to_string(), Field::Age),
            (|i| i.age = "151".to_string(), Field::Age),
            (
                |i| i.preferred_time_window = "midnight".to_string(),
                Field::PreferredTimeWindow,
            ),
            (
                |i| i.exercise_frequency = "weekly".to_string(),
                Field::ExerciseFrequency,
            ),
            (
                |i| i.response_language = "fr".to_string(),
                Field::ResponseLanguage,
            ),
        ];
        for (set, field) in cases {
            let mut input = InputProfile::builder().api_key("test-key").build();
            set(&mut input);
            assert_eq!(
                validator().validate(&input),
                Err(ValidationError::InvalidField(field))
            );
        }
    }

    #[test]
    fn test_only_credential_is_mandatory() {
        let input = InputProfile::builder().api_key("test-key").build();
        let validated = validator().validate(&input).unwrap();
        let profile = validated.profile;
        assert_eq!(profile.height_cm, None);
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.pain_areas, "없음");
        assert_eq!(profile.diseases, "없음");
        assert_eq!(profile.personality, "일반적");
        assert_eq!(profile.response_language, ResponseLanguage::Korean);
        assert_eq!(validated.credential.expose(), "test-key");
    }

    #[test]
    fn test_values_are_parsed_and_trimmed() {
        let input = InputProfile::builder()
            .api_key("test-key")
            .height(" 165 ")
            .weight("60.5")
            .body_fat_percent("100")
            .muscle_mass("-0")
            .age("72")
            .exercise_frequency("1-2")
            .preferred_time_window("오전")
            .response_language("en")
            .pain_areas("  무릎 관절,\n  허리 통증 ")
            .diseases("고혈압")
            .personality("   ")
            .build();

        let profile = validator().validate(&input).unwrap().profile;
        assert_eq!(profile.height_cm, Some(165.0));
        assert_eq!(profile.weight_kg, Some(60.5));
        assert_eq!(profile.body_fat_percent, Some(100.0));
        assert_eq!(profile.muscle_mass_kg, Some(0.0));
        assert!(profile.muscle_mass_kg.unwrap().is_sign_positive());
        assert_eq!(profile.age, Some(72));
        assert_eq!(
            profile.exercise_frequency,
            Some(ExerciseFrequency::OneToTwoPerWeek)
        );
        assert_eq!(profile.preferred_time_window, Some(TimeWindow::Morning));
        assert_eq!(profile.response_language, ResponseLanguage::English);
        assert_eq!(profile.pain_areas, "무릎 관절, 허리 통증");
        assert_eq!(profile.diseases, "고혈압");
        assert_eq!(profile.personality, "일반적");
    }

    fn invalidate(input: &mut InputProfile, field: Field) {
        let slot = match field {
            Field::Height => &mut input.height,
            Field::Weight => &mut input.weight,
            Field::BodyFatPercent => &mut input.body_fat_percent,
            Field::MuscleMass => &mut input.muscle_mass,
            Field::Age => &mut input.age,
            Field::ExerciseFrequency => &mut input.exercise_frequency,
            Field::PreferredTimeWindow => &mut input.preferred_time_window,
            Field::ResponseLanguage => &mut input.response_language,
        };
        *slot = "???".to_string();
    }

    #[test]
    fn test_first_invalid_field_in_order_is_reported() {
        for (i, expected) in FIELD_ORDER.iter().enumerate() {
            let mut input = InputProfile::builder().api_key("test-key").build();
            for field in &FIELD_ORDER[i..] {
                invalidate(&mut input, *field);
            }
            assert_eq!(
                validator().validate(&input),
                Err(ValidationError::InvalidField(*expected))
            );
        }
    }
}
