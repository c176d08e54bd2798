use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::suggestion::errors::SuggestionError;
use crate::domain::suggestion::repository::SuggestionRepository;
use crate::domain::suggestion::store::SuggestionStore;
use crate::domain::suggestion::use_cases::get::{GetSuggestionsParams, GetSuggestionsUseCase};

pub struct GetSuggestionsUseCaseImpl {
    pub repository: Arc<dyn SuggestionRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetSuggestionsUseCase for GetSuggestionsUseCaseImpl {
    async fn execute(
        &self,
        params: GetSuggestionsParams,
    ) -> Result<SuggestionStore, SuggestionError> {
        self.logger.debug(&format!(
            "Reading {} suggestions for {}",
            params.kind, params.user_id
        ));
        Ok(self
            .repository
            .load_store(&params.user_id, params.kind)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::UserId;
    use crate::domain::suggestion::model::SuggestionKind;
    use mockall::mock;

    mock! {
        pub SuggestionRepo {}

        #[async_trait]
        impl SuggestionRepository for SuggestionRepo {
            async fn load_store(&self, user_id: &UserId, kind: SuggestionKind) -> Result<SuggestionStore, RepositoryError>;
            async fn save_store(&self, user_id: &UserId, kind: SuggestionKind, store: &SuggestionStore) -> Result<(), RepositoryError>;
            async fn load_history(&self, user_id: &UserId, kind: SuggestionKind) -> Result<Vec<String>, RepositoryError>;
            async fn commit_batch(&self, user_id: &UserId, kind: SuggestionKind, store: &SuggestionStore, history: &[String]) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_return_persisted_store_for_kind() {
        let mut repo = MockSuggestionRepo::new();
        repo.expect_load_store()
            .withf(|user, kind| user.as_str() == "u1" && *kind == SuggestionKind::Drink)
            .times(1)
            .returning(|_, _| Ok(SuggestionStore::default()));
        let use_case = GetSuggestionsUseCaseImpl {
            repository: Arc::new(repo),
            logger: mock_logger(),
        };

        let store = use_case
            .execute(GetSuggestionsParams {
                user_id: UserId::new("u1"),
                kind: SuggestionKind::Drink,
            })
            .await
            .unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn should_map_repository_failure() {
        let mut repo = MockSuggestionRepo::new();
        repo.expect_load_store()
            .returning(|_, _| Err(RepositoryError::DatabaseError));
        let use_case = GetSuggestionsUseCaseImpl {
            repository: Arc::new(repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(GetSuggestionsParams {
                user_id: UserId::new("u1"),
                kind: SuggestionKind::Meal,
            })
            .await;

        assert!(matches!(result, Err(SuggestionError::Repository(_))));
    }
}
