use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::logger::Logger;
use crate::domain::profile::repository::UserProfileRepository;
use crate::domain::suggestion::errors::SuggestionError;
use crate::domain::suggestion::repository::SuggestionRepository;
use crate::domain::suggestion::settings::SuggestionSettings;
use crate::domain::suggestion::use_cases::generate::{
    GenerateSuggestionsParams, GenerateSuggestionsUseCase,
};
use crate::domain::suggestion::use_cases::refresh::{
    RefreshOutcome, RefreshSuggestionsParams, RefreshSuggestionsUseCase,
};

pub struct RefreshSuggestionsUseCaseImpl {
    pub repository: Arc<dyn SuggestionRepository>,
    pub profiles: Arc<dyn UserProfileRepository>,
    pub generator: Arc<dyn GenerateSuggestionsUseCase>,
    pub settings: SuggestionSettings,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RefreshSuggestionsUseCase for RefreshSuggestionsUseCaseImpl {
    async fn execute(
        &self,
        params: RefreshSuggestionsParams,
    ) -> Result<RefreshOutcome, SuggestionError> {
        let profile = self
            .profiles
            .get_profile(&params.user_id)
            .await
            .map_err(|e| {
                self.logger.error(&format!(
                    "Could not load profile of {}: {}",
                    params.user_id, e
                ));
                SuggestionError::ProfileUnavailable
            })?;
        if self.settings.require_subscription && !profile.is_subscribed {
            return Err(SuggestionError::SubscriptionRequired);
        }

        let store = self
            .repository
            .load_store(&params.user_id, params.kind)
            .await?;

        let local_now = profile.local_time(Utc::now());
        let due = self.settings.cadence.should_refresh(
            params.kind,
            store.last_updated(),
            store.last_category(),
            &local_now,
        );
        if !due {
            return Ok(RefreshOutcome::NotDue(store));
        }

        self.logger.info(&format!(
            "{} suggestions for {} are stale, generating",
            params.kind, params.user_id
        ));
        let outcome = self
            .generator
            .execute(GenerateSuggestionsParams {
                user_id: params.user_id,
                kind: params.kind,
                cancel: params.cancel,
            })
            .await?;
        Ok(RefreshOutcome::Generated(outcome))
    }
}
