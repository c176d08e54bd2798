use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::SuggestionKind;
use super::store::SuggestionStore;

/// Port to the persistent key-value store.
///
/// Values live under `suggestions:<kind>` and `history:<kind>`, scoped by
/// user. Missing keys load as empty values.
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    async fn load_store(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
    ) -> Result<SuggestionStore, RepositoryError>;

    async fn save_store(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
        store: &SuggestionStore,
    ) -> Result<(), RepositoryError>;

    async fn load_history(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
    ) -> Result<Vec<String>, RepositoryError>;

    /// Writes the store and the history together. Either both keys are
    /// updated or neither is.
    async fn commit_batch(
        &self,
        user_id: &UserId,
        kind: SuggestionKind,
        store: &SuggestionStore,
        history: &[String],
    ) -> Result<(), RepositoryError>;
}
