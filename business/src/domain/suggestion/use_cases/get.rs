use async_trait::async_trait;

use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::errors::SuggestionError;
use crate::domain::suggestion::model::SuggestionKind;
use crate::domain::suggestion::store::SuggestionStore;

#[derive(Debug)]
pub struct GetSuggestionsParams {
    pub user_id: UserId,
    pub kind: SuggestionKind,
}

#[async_trait]
pub trait GetSuggestionsUseCase: Send + Sync {
    async fn execute(&self, params: GetSuggestionsParams)
    -> Result<SuggestionStore, SuggestionError>;
}
