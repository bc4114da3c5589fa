use gemini_ox::{FinishReason, GenerateContentResponse};

#[test]
fn test_response_with_only_usage_metadata() {
    // Blocked prompts come back without candidates
    let json_response = r#"{
        "modelVersion": "gemini-2.0-flash",
        "responseId": "3E_JaLLtI_TT_uMP1pHHmAU",
        "promptFeedback": { "blockReason": "SAFETY" },
        "usageMetadata": {
            "promptTokenCount": 181,
            "totalTokenCount": 181
        }
    }"#;

    let response: GenerateContentResponse =
        serde_json::from_str(json_response).expect("response should parse");
    assert!(response.candidates.is_empty());
    assert_eq!(response.model_version.as_deref(), Some("gemini-2.0-flash"));
    assert!(response.prompt_feedback.is_some());
    assert_eq!(response.first_text(), None);
}

#[test]
fn test_response_with_candidates_and_usage_metadata() {
    let json_response = r#"{
        "candidates": [
            {
                "content": {
                    "parts": [
                        {
                            "text": "1. **전반적인 건강 평가**\n..."
                        }
                    ],
                    "role": "model"
                },
                "finishReason": "STOP",
                "index": 0,
                "safetyRatings": []
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 20,
            "totalTokenCount": 30
        }
    }"#;

    let response: GenerateContentResponse =
        serde_json::from_str(json_response).expect("response should parse");
    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.first_finish_reason(), Some(FinishReason::Stop));
    assert!(response.first_text().unwrap().starts_with("1. **"));
}

#[test]
fn test_wrong_shape_is_a_decode_error() {
    assert!(serde_json::from_str::<GenerateContentResponse>(r#"{"candidates":"nope"}"#).is_err());
    assert!(serde_json::from_str::<GenerateContentResponse>("[]").is_err());
}
