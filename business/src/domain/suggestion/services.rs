use async_trait::async_trait;

use super::errors::InferenceError;
use super::prompt::GenerationRequest;

/// Port to the external generative model. Returns the raw completion
/// text; retries and timeouts are the caller's job.
#[async_trait]
pub trait LanguageModelClient: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, InferenceError>;
}
