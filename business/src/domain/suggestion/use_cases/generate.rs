use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::errors::{GenerationError, SuggestionError};
use crate::domain::suggestion::model::{Suggestion, SuggestionKind};

#[derive(Debug)]
pub struct GenerateSuggestionsParams {
    pub user_id: UserId,
    pub kind: SuggestionKind,
    /// Fired when the requesting view goes away; nothing is committed after.
    pub cancel: CancellationToken,
}

/// How a generation cycle ended. Generation failures are absorbed here and
/// never surface as `SuggestionError`.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A validated batch was committed to the store and the history.
    Accepted(Vec<Suggestion>),
    /// Every attempt failed; the store now holds an empty batch.
    Exhausted {
        attempts: u32,
        last_error: GenerationError,
    },
    /// Torn down at a suspension point before committing.
    Cancelled,
    /// Another cycle for the same user and kind is running.
    AlreadyInFlight,
}

impl GenerationOutcome {
    /// Batch to render. Empty for every outcome except `Accepted`.
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            GenerationOutcome::Accepted(batch) => batch,
            _ => &[],
        }
    }
}

#[async_trait]
pub trait GenerateSuggestionsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: GenerateSuggestionsParams,
    ) -> Result<GenerationOutcome, SuggestionError>;
}
