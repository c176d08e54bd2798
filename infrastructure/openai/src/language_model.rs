use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use business::domain::suggestion::errors::InferenceError;
use business::domain::suggestion::prompt::GenerationRequest;
use business::domain::suggestion::services::LanguageModelClient;

use crate::client::OpenAIClient;

const TEMPERATURE: f64 = 0.8;
const MAX_TOKENS: u32 = 1200;

/// Chat completions backed implementation of the language model port.
///
/// The adapter only classifies failures. Throttling (HTTP 429) becomes
/// `RateLimited`; everything else that keeps a completion from arriving
/// is reported as `Transport`.
pub struct LanguageModelOpenAI {
    client: OpenAIClient,
}

impl LanguageModelOpenAI {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "model": self.client.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        })
    }
}

fn classify_status(status: StatusCode) -> Result<(), InferenceError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(InferenceError::RateLimited);
    }
    if !status.is_success() {
        return Err(InferenceError::Transport(format!("http status {}", status)));
    }
    Ok(())
}

fn extract_content(data: &Value) -> Result<String, InferenceError> {
    data["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or_else(|| InferenceError::Transport("completion without content".to_string()))
}

#[async_trait]
impl LanguageModelClient for LanguageModelOpenAI {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, InferenceError> {
        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        classify_status(response.status())?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        extract_content(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::Locale;
    use business::domain::suggestion::model::SuggestionKind;
    use std::time::Duration;

    fn adapter() -> LanguageModelOpenAI {
        LanguageModelOpenAI::new(OpenAIClient::new(
            "key".to_string(),
            "gpt-test".to_string(),
            "http://localhost".to_string(),
            Duration::from_secs(5),
        ))
    }

    #[test]
    fn should_classify_too_many_requests_as_rate_limited() {
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            Err(InferenceError::RateLimited)
        );
    }

    #[test]
    fn should_classify_server_error_as_transport() {
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY),
            Err(InferenceError::Transport(_))
        ));
        assert_eq!(classify_status(StatusCode::OK), Ok(()));
    }

    #[test]
    fn should_extract_first_choice_content() {
        let data = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "[]"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        });

        assert_eq!(extract_content(&data), Ok("[]".to_string()));
    }

    #[test]
    fn should_report_transport_when_completion_is_empty() {
        let data = json!({"choices": []});

        assert!(matches!(
            extract_content(&data),
            Err(InferenceError::Transport(_))
        ));
    }

    #[test]
    fn should_send_both_prompts_with_configured_model() {
        let request = GenerationRequest {
            kind: SuggestionKind::Drink,
            locale: Locale::English,
            system_prompt: "system".to_string(),
            user_prompt: "user".to_string(),
            expected_items: 3,
            max_name_chars: 30,
        };

        let body = adapter().request_body(&request);

        assert_eq!(body["model"], "gpt-test");
        assert_eq!(body["messages"][0]["content"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
    }
}
