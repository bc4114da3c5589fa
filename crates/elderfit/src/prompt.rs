//! Prompt assembly.
//!
//! The prompt has four parts, always in this order:
//!
//! 1. an instruction framing the model as an elderly-health expert,
//! 2. the profile block, one `- label: value` line per field,
//! 3. the four numbered output sections the UI renders,
//! 4. a closing directive naming the response language and optional length.
//!
//! | field | empty value renders as |
//! |---|---|
//! | pain areas | `없음` |
//! | diseases | `없음` |
//! | personality | `일반적` |
//! | numbers, age, enumerations | empty |

use crate::profile::NormalizedProfile;

const INSTRUCTION: &str = "당신은 노인 건강 전문가입니다. 다음 정보를 바탕으로 안전하고 효과적인 맞춤형 운동 프로그램을 추천해주세요.";

const PROFILE_HEADER: &str = "**노인 정보:**";

const FORMAT_HEADER: &str = "**다음 형식으로 추천해주세요:**";

/// Numbered sections the model must answer with. The UI relies on this shape.
pub const SECTIONS: [(&str, &[&str]); 4] = [
    ("전반적인 건강 평가", &["BMI 및 체성분 분석", "주의사항"]),
    (
        "추천 운동 프로그램",
        &[
            "유산소 운동 (구체적인 운동, 시간, 빈도)",
            "근력 운동 (구체적인 운동, 세트, 횟수)",
            "유연성/균형 운동",
            "각 운동별 안전 수칙",
        ],
    ),
    (
        "운동 시 주의사항",
        &["통증이나 질병 관련 주의점", "금지 동작"],
    ),
    ("생활 습관 조언", &["영양 관리", "수면 및 휴식"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptOptions {
    /// Upper bound on the answer length in characters; `None` is unbounded.
    pub target_length: Option<usize>,
}

/// Renders the prompt for `profile`. Pure and deterministic.
#[must_use]
pub fn build(profile: &NormalizedProfile, options: &PromptOptions) -> String {
    let blocks = [
        INSTRUCTION.to_string(),
        profile_block(profile),
        format_block(),
        closing_directive(profile, options),
    ];
    blocks.join("\n\n") + "\n"
}

fn profile_block(profile: &NormalizedProfile) -> String {
    let lines = [
        ("키", measurement(profile.height_cm, "cm")),
        ("몸무게", measurement(profile.weight_kg, "kg")),
        ("체지방량", measurement(profile.body_fat_percent, "%")),
        ("골격근량", measurement(profile.muscle_mass_kg, "kg")),
        ("아픈 곳", profile.pain_areas.clone()),
        ("질병", profile.diseases.clone()),
        ("성격/활동 성향", profile.personality.clone()),
        (
            "나이",
            profile.age.map(|age| format!("{age}세")).unwrap_or_default(),
        ),
        (
            "현재 운동 빈도",
            profile
                .exercise_frequency
                .map(|f| f.label().to_string())
                .unwrap_or_default(),
        ),
        (
            "선호 운동 시간대",
            profile
                .preferred_time_window
                .map(|w| w.label().to_string())
                .unwrap_or_default(),
        ),
        ("응답 언어", profile.response_language.label().to_string()),
    ];

    std::iter::once(PROFILE_HEADER.to_string())
        .chain(
            lines
                .into_iter()
                .map(|(label, value)| format!("- {label}: {value}").trim_end().to_string()),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

fn measurement(value: Option<f64>, unit: &str) -> String {
    value.map(|v| format!("{v}{unit}")).unwrap_or_default()
}

fn format_block() -> String {
    let sections = SECTIONS
        .iter()
        .enumerate()
        .map(|(i, (title, bullets))| {
            std::iter::once(format!("{}. **{title}**", i + 1))
                .chain(bullets.iter().map(|b| format!("   - {b}")))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{FORMAT_HEADER}\n\n{sections}")
}

fn closing_directive(profile: &NormalizedProfile, options: &PromptOptions) -> String {
    let language = profile.response_language.label();
    match options.target_length {
        Some(limit) => format!(
            "{language}로 친절하고 이해하기 쉽게 작성해주세요. 전체 답변은 공백 포함 {limit}자 이내로 작성해주세요."
        ),
        None => format!("{language}로 친절하고 이해하기 쉽게 작성해주세요."),
    }
}
