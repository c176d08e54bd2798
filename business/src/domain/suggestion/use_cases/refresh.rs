use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::errors::SuggestionError;
use crate::domain::suggestion::model::SuggestionKind;
use crate::domain::suggestion::store::SuggestionStore;

use super::generate::GenerationOutcome;

#[derive(Debug)]
pub struct RefreshSuggestionsParams {
    pub user_id: UserId,
    pub kind: SuggestionKind,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The displayed batch is still fresh.
    NotDue(SuggestionStore),
    Generated(GenerationOutcome),
}

/// Runs a generation cycle only when the cadence decider says the stored
/// batch is stale.
#[async_trait]
pub trait RefreshSuggestionsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: RefreshSuggestionsParams,
    ) -> Result<RefreshOutcome, SuggestionError>;
}
