use thiserror::Error;

use crate::profile::Field;

/// Rejections raised before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The configured channel has no credential for this session.
    #[error("no API credential is available")]
    MissingCredential,

    /// The field is not a number, is negative or non-finite, is out of range,
    /// or is not one of the accepted enumerated values.
    #[error("invalid value for field `{0}`")]
    InvalidField(Field),
}

/// Failures of the outbound generateContent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The service answered with a non-success HTTP status.
    #[error("request failed with HTTP status {status}")]
    RequestFailed { status: u16 },

    /// A success response without usable text at
    /// `candidates[0].content.parts[0].text`.
    #[error("response did not contain a completion")]
    MalformedResponse,

    /// DNS, connect, timeout or reset; no status was received.
    #[error("network failure")]
    NetworkFailure,

    /// Endpoint or model settings do not form a valid request.
    #[error("client configuration is invalid")]
    InvalidConfiguration,
}

/// Anything that can end a submit without a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ValidationError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingCredential => "Gemini API 키를 입력해주세요.".to_string(),
            ValidationError::InvalidField(field) => {
                format!("{} 값을 확인해주세요.", field.label())
            }
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RequestFailed { status } => {
                format!("API 요청 실패 (HTTP {status}). API 키를 확인해주세요.")
            }
            ApiError::MalformedResponse => "응답 데이터를 처리할 수 없습니다.".to_string(),
            ApiError::NetworkFailure => {
                "네트워크 오류로 운동 추천을 생성하지 못했습니다. 다시 시도해주세요.".to_string()
            }
            ApiError::InvalidConfiguration => {
                "서비스 설정 오류로 요청을 보낼 수 없습니다.".to_string()
            }
        }
    }
}

impl PipelineError {
    /// Single human-readable message for the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Validation(e) => e.user_message(),
            PipelineError::Api(e) => e.user_message(),
        }
    }
}
