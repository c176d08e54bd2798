use std::sync::Arc;

use logger::TracingLogger;
use openai::client::OpenAIClient;
use openai::language_model::LanguageModelOpenAI;
use persistence::profile::repository::UserProfileRepositoryPostgres;
use persistence::suggestion::repository::SuggestionRepositoryPostgres;

use business::application::suggestion::generate::GenerateSuggestionsUseCaseImpl;
use business::application::suggestion::get::GetSuggestionsUseCaseImpl;
use business::application::suggestion::in_flight::InFlightRegistry;
use business::application::suggestion::refresh::RefreshSuggestionsUseCaseImpl;
use business::application::suggestion::scheduler::SuggestionScheduler;

use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub suggestion_api: crate::api::suggestion::routes::SuggestionApi,
    pub scheduler: Arc<SuggestionScheduler>,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, config: &AppConfig) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let suggestion_repository = Arc::new(SuggestionRepositoryPostgres::new(pool.clone()));
        let profile_repository = Arc::new(UserProfileRepositoryPostgres::new(pool));

        let openai = &config.openai;
        let language_model = Arc::new(LanguageModelOpenAI::new(OpenAIClient::new(
            openai.api_key.clone(),
            openai.model.clone(),
            openai.base_url.clone(),
            openai.timeout,
        )));

        let settings = config.suggestion.settings.clone();
        let in_flight = Arc::new(InFlightRegistry::new());

        // Suggestion use cases
        let generate_use_case = Arc::new(GenerateSuggestionsUseCaseImpl {
            repository: suggestion_repository.clone(),
            profiles: profile_repository.clone(),
            model: language_model,
            in_flight: in_flight.clone(),
            settings: settings.clone(),
            logger: logger.clone(),
        });
        let refresh_use_case = Arc::new(RefreshSuggestionsUseCaseImpl {
            repository: suggestion_repository.clone(),
            profiles: profile_repository,
            generator: generate_use_case.clone(),
            settings,
            logger: logger.clone(),
        });
        let get_use_case = Arc::new(GetSuggestionsUseCaseImpl {
            repository: suggestion_repository,
            logger: logger.clone(),
        });

        let scheduler = Arc::new(SuggestionScheduler::new(
            refresh_use_case.clone(),
            in_flight,
            config.suggestion.poll_interval,
            config.suggestion.subscription_ttl,
            logger,
        ));

        let suggestion_api = crate::api::suggestion::routes::SuggestionApi::new(
            get_use_case,
            refresh_use_case,
            generate_use_case,
            scheduler.clone(),
        );

        Self {
            health_api,
            suggestion_api,
            scheduler,
        }
    }
}
