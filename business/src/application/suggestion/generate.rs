use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::application::suggestion::in_flight::InFlightRegistry;
use crate::domain::logger::Logger;
use crate::domain::profile::model::{DailyIntake, NutritionRemainder, UserProfile};
use crate::domain::profile::repository::UserProfileRepository;
use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::category::Category;
use crate::domain::suggestion::errors::{GenerationError, SuggestionError};
use crate::domain::suggestion::history::GenerationHistory;
use crate::domain::suggestion::model::{Suggestion, SuggestionKind};
use crate::domain::suggestion::prompt::{PromptBuilder, PromptContext};
use crate::domain::suggestion::repository::SuggestionRepository;
use crate::domain::suggestion::retry::{CycleEvent, CycleStep, GenerationCycle};
use crate::domain::suggestion::services::LanguageModelClient;
use crate::domain::suggestion::settings::SuggestionSettings;
use crate::domain::suggestion::store::SuggestionStore;
use crate::domain::suggestion::use_cases::generate::{
    GenerateSuggestionsParams, GenerateSuggestionsUseCase, GenerationOutcome,
};
use crate::domain::suggestion::validation::{ValidationContext, validate};

/// Retry/backoff controller around one generation cycle.
pub struct GenerateSuggestionsUseCaseImpl {
    pub repository: Arc<dyn SuggestionRepository>,
    pub profiles: Arc<dyn UserProfileRepository>,
    pub model: Arc<dyn LanguageModelClient>,
    pub in_flight: Arc<InFlightRegistry>,
    pub settings: SuggestionSettings,
    pub logger: Arc<dyn Logger>,
}

/// State loaded once per cycle and threaded through every attempt.
struct CycleInputs {
    user_id: UserId,
    kind: SuggestionKind,
    profile: UserProfile,
    category: Category,
    remainder: NutritionRemainder,
    store: SuggestionStore,
    history: GenerationHistory,
}

#[async_trait]
impl GenerateSuggestionsUseCase for GenerateSuggestionsUseCaseImpl {
    async fn execute(
        &self,
        params: GenerateSuggestionsParams,
    ) -> Result<GenerationOutcome, SuggestionError> {
        let GenerateSuggestionsParams {
            user_id,
            kind,
            cancel,
        } = params;

        let profile = self.profiles.get_profile(&user_id).await.map_err(|e| {
            self.logger
                .error(&format!("Could not load profile of {}: {}", user_id, e));
            SuggestionError::ProfileUnavailable
        })?;

        if self.settings.require_subscription && !profile.is_subscribed {
            return Err(SuggestionError::SubscriptionRequired);
        }

        let Some(_permit) = self.in_flight.try_acquire(&user_id, kind) else {
            self.logger.debug(&format!(
                "Skipping {} generation for {}: a cycle is already running",
                kind, user_id
            ));
            return Ok(GenerationOutcome::AlreadyInFlight);
        };

        let inputs = self.prepare(user_id, kind, profile).await?;
        self.run_cycle(inputs, &cancel).await
    }
}

impl GenerateSuggestionsUseCaseImpl {
    async fn prepare(
        &self,
        user_id: UserId,
        kind: SuggestionKind,
        profile: UserProfile,
    ) -> Result<CycleInputs, SuggestionError> {
        let local_now = profile.local_time(Utc::now());
        let category = Category::at(kind, &local_now);

        let mut store = self.repository.load_store(&user_id, kind).await?;
        store.set_last_category(category);
        self.repository.save_store(&user_id, kind, &store).await?;

        let intake = match self
            .profiles
            .get_daily_intake(&user_id, local_now.date_naive())
            .await
        {
            Ok(intake) => intake,
            Err(e) => {
                self.logger.warn(&format!(
                    "Daily intake unavailable for {}, using full targets: {}",
                    user_id, e
                ));
                DailyIntake::default()
            }
        };
        let remainder = NutritionRemainder::compute(&profile.daily_targets, &intake);

        let names = self.repository.load_history(&user_id, kind).await?;
        let history = GenerationHistory::from_names(names, self.settings.history_cap);

        Ok(CycleInputs {
            user_id,
            kind,
            profile,
            category,
            remainder,
            store,
            history,
        })
    }

    async fn run_cycle(
        &self,
        mut inputs: CycleInputs,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome, SuggestionError> {
        let mut cycle = GenerationCycle::new(self.settings.retry.clone());
        let mut last_error: Option<GenerationError> = None;
        let mut response = String::new();
        let mut accepted: Vec<Suggestion> = Vec::new();

        let mut step = cycle.on(CycleEvent::Trigger);
        loop {
            step = match step {
                CycleStep::Request { attempt } => {
                    self.logger.info(&format!(
                        "Requesting {} suggestions for {} (attempt {}/{})",
                        inputs.kind,
                        inputs.user_id,
                        attempt + 1,
                        self.settings.retry.total_attempts()
                    ));
                    let request = PromptBuilder::build(&PromptContext {
                        kind: inputs.kind,
                        category: inputs.category,
                        budget: inputs.profile.preferred_budget,
                        remainder: inputs.remainder,
                        profile: &inputs.profile,
                        exclusions: inputs.history.names(),
                    });

                    let result = tokio::select! {
                        _ = cancel.cancelled() => return Ok(self.cancelled(&inputs)),
                        result = self.model.complete(&request) => result,
                    };

                    match result {
                        Ok(text) => {
                            response = text;
                            cycle.on(CycleEvent::ResponseReceived)
                        }
                        Err(e) => {
                            let error = GenerationError::from(e);
                            self.logger.warn(&format!(
                                "Language model call failed for {} {}: {}",
                                inputs.user_id, inputs.kind, error
                            ));
                            last_error = Some(error.clone());
                            cycle.on(CycleEvent::Rejected(error))
                        }
                    }
                }
                CycleStep::Validate => {
                    let ctx = ValidationContext {
                        kind: inputs.kind,
                        locale: inputs.profile.locale,
                        category: inputs.category,
                        history: &inputs.history,
                    };
                    match validate(&response, &ctx) {
                        Ok(batch) => {
                            accepted = batch;
                            cycle.on(CycleEvent::BatchAccepted)
                        }
                        Err(e) => {
                            self.logger.warn(&format!(
                                "Rejected {} batch for {} [rule={}]: {}",
                                inputs.kind,
                                inputs.user_id,
                                e.rule(),
                                e
                            ));
                            let error = GenerationError::Validation(e);
                            last_error = Some(error.clone());
                            cycle.on(CycleEvent::Rejected(error))
                        }
                    }
                }
                CycleStep::RetryAfter {
                    delay,
                    next_attempt,
                } => {
                    self.logger.debug(&format!(
                        "Retrying {} generation for {} in {} ms",
                        inputs.kind,
                        inputs.user_id,
                        delay.as_millis()
                    ));
                    tokio::select! {
                        _ = cancel.cancelled() => return Ok(self.cancelled(&inputs)),
                        _ = tokio::time::sleep(delay) => {}
                    }
                    CycleStep::Request {
                        attempt: next_attempt,
                    }
                }
                CycleStep::Commit => {
                    if cancel.is_cancelled() {
                        return Ok(self.cancelled(&inputs));
                    }
                    return self.commit(&mut inputs, accepted).await;
                }
                CycleStep::GiveUp(exhausted) => {
                    return self.give_up(&mut inputs, exhausted, last_error).await;
                }
                CycleStep::Ignored => {
                    self.logger.error(&format!(
                        "Generation cycle for {} {} stalled in state {}",
                        inputs.user_id,
                        inputs.kind,
                        cycle.state()
                    ));
                    let exhausted = GenerationError::ExhaustedRetries {
                        attempts: cycle.attempt() + 1,
                    };
                    return self.give_up(&mut inputs, exhausted, last_error).await;
                }
            };
        }
    }

    /// Store and history are written in one repository call so readers
    /// never see a batch without its history entry.
    async fn commit(
        &self,
        inputs: &mut CycleInputs,
        batch: Vec<Suggestion>,
    ) -> Result<GenerationOutcome, SuggestionError> {
        inputs
            .history
            .reconcile(batch.iter().map(|s| s.name.clone()));
        inputs.store.set_suggestions(batch.clone(), Utc::now());

        self.repository
            .commit_batch(
                &inputs.user_id,
                inputs.kind,
                &inputs.store,
                inputs.history.names(),
            )
            .await?;

        self.logger.info(&format!(
            "Accepted {} {} suggestions for {}",
            batch.len(),
            inputs.kind,
            inputs.user_id
        ));
        Ok(GenerationOutcome::Accepted(batch))
    }

    async fn give_up(
        &self,
        inputs: &mut CycleInputs,
        exhausted: GenerationError,
        last_error: Option<GenerationError>,
    ) -> Result<GenerationOutcome, SuggestionError> {
        let attempts = match exhausted {
            GenerationError::ExhaustedRetries { attempts } => attempts,
            _ => self.settings.retry.total_attempts(),
        };

        inputs.store.clear(Utc::now());
        self.repository
            .save_store(&inputs.user_id, inputs.kind, &inputs.store)
            .await?;

        let last_error = last_error.unwrap_or(exhausted);
        self.logger.error(&format!(
            "Giving up on {} suggestions for {} after {} attempts: {}",
            inputs.kind, inputs.user_id, attempts, last_error
        ));
        Ok(GenerationOutcome::Exhausted {
            attempts,
            last_error,
        })
    }

    fn cancelled(&self, inputs: &CycleInputs) -> GenerationOutcome {
        self.logger.info(&format!(
            "Cancelled {} generation for {} before commit",
            inputs.kind, inputs.user_id
        ));
        GenerationOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::Locale;
    use crate::domain::suggestion::errors::{InferenceError, ValidationError};
    use crate::domain::suggestion::prompt::GenerationRequest;
    use chrono::NaiveDate;
    use mockall::mock;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

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
        pub ProfileRepo {}

        #[async_trait]
        impl UserProfileRepository for ProfileRepo {
            async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError>;
            async fn get_daily_intake(&self, user_id: &UserId, date: NaiveDate) -> Result<DailyIntake, RepositoryError>;
        }
    }

    mock! {
        pub Model {}

        #[async_trait]
        impl LanguageModelClient for Model {
            async fn complete(&self, request: &GenerationRequest) -> Result<String, InferenceError>;
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
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn test_user_id() -> UserId {
        UserId::new("test-user-id")
    }

    fn subscribed_profile() -> UserProfile {
        let mut profile = UserProfile::new(test_user_id(), Locale::English);
        profile.is_subscribed = true;
        profile
    }

    fn profile_repo(profile: UserProfile) -> MockProfileRepo {
        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get_profile()
            .returning(move |_| Ok(profile.clone()));
        profiles
            .expect_get_daily_intake()
            .returning(|_, _| Ok(DailyIntake::default()));
        profiles
    }

    fn meal_item(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "calories": 400, "protein": 25, "carbs": 45, "fat": 10,
            "difficulty": "Easy", "timeToMake": "15 min", "budget": "low",
            "quickRecipe": "Cook and serve warm.", "cuisine": "home-style"
        })
    }

    fn valid_meals() -> String {
        json!([
            meal_item("2 eggs + 1 toast"),
            meal_item("1 bowl rice + 2 kofta"),
            meal_item("150g lentils + 1 pita"),
        ])
        .to_string()
    }

    fn meals_missing_protein_on_second_item() -> String {
        let mut batch = json!([
            meal_item("2 eggs + 1 toast"),
            meal_item("1 bowl rice + 2 kofta"),
            meal_item("150g lentils + 1 pita"),
        ]);
        batch[1].as_object_mut().unwrap().remove("protein");
        batch.to_string()
    }

    /// Repository with an empty store and history that records whatever
    /// is saved or committed.
    struct RecordingRepo {
        saved: Arc<Mutex<Vec<SuggestionStore>>>,
        committed: Arc<Mutex<Vec<(SuggestionKind, SuggestionStore, Vec<String>)>>>,
    }

    fn recording_repo(history: Vec<String>) -> (MockSuggestionRepo, RecordingRepo) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let committed = Arc::new(Mutex::new(Vec::new()));
        let mut repo = MockSuggestionRepo::new();
        repo.expect_load_store()
            .returning(|_, _| Ok(SuggestionStore::default()));
        repo.expect_load_history()
            .returning(move |_, _| Ok(history.clone()));
        let saved_clone = saved.clone();
        repo.expect_save_store().returning(move |_, _, store| {
            saved_clone.lock().unwrap().push(store.clone());
            Ok(())
        });
        let committed_clone = committed.clone();
        repo.expect_commit_batch()
            .returning(move |_, kind, store, history| {
                committed_clone
                    .lock()
                    .unwrap()
                    .push((kind, store.clone(), history.to_vec()));
                Ok(())
            });
        (repo, RecordingRepo { saved, committed })
    }

    /// Model answering from a script, one entry per call; the last entry
    /// repeats once the script runs out.
    fn scripted_model(
        script: Vec<Result<String, InferenceError>>,
    ) -> (MockModel, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let mut model = MockModel::new();
        model.expect_complete().returning(move |_| {
            let n = calls_clone.fetch_add(1, Ordering::SeqCst);
            script[n.min(script.len() - 1)].clone()
        });
        (model, calls)
    }

    fn use_case(
        repository: MockSuggestionRepo,
        profiles: MockProfileRepo,
        model: MockModel,
    ) -> GenerateSuggestionsUseCaseImpl {
        GenerateSuggestionsUseCaseImpl {
            repository: Arc::new(repository),
            profiles: Arc::new(profiles),
            model: Arc::new(model),
            in_flight: Arc::new(InFlightRegistry::new()),
            settings: SuggestionSettings::default(),
            logger: mock_logger(),
        }
    }

    fn params(kind: SuggestionKind) -> GenerateSuggestionsParams {
        GenerateSuggestionsParams {
            user_id: test_user_id(),
            kind,
            cancel: CancellationToken::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_commit_batch_and_history_when_first_attempt_is_valid() {
        let (repo, recorded) = recording_repo(vec![]);
        let (model, calls) = scripted_model(vec![Ok(valid_meals())]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.suggestions().len(), 3);

        let committed = recorded.committed.lock().unwrap();
        assert_eq!(committed.len(), 1);
        let (kind, store, history) = &committed[0];
        assert_eq!(*kind, SuggestionKind::Meal);
        assert_eq!(store.suggestions(), outcome.suggestions());
        assert!(store.last_updated().is_some());
        assert_eq!(
            history,
            &vec![
                "2 eggs + 1 toast".to_string(),
                "1 bowl rice + 2 kofta".to_string(),
                "150g lentils + 1 pita".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_clear_store_after_four_structurally_invalid_attempts() {
        let (repo, recorded) = recording_repo(vec![]);
        let (model, calls) = scripted_model(vec![Ok(meals_missing_protein_on_second_item())]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            outcome,
            GenerationOutcome::Exhausted {
                attempts: 4,
                last_error: GenerationError::Validation(ValidationError::MissingField {
                    index: 1,
                    field: "protein"
                }),
            }
        );
        assert!(outcome.suggestions().is_empty());
        assert!(recorded.committed.lock().unwrap().is_empty());

        let saved = recorded.saved.lock().unwrap();
        let last = saved.last().unwrap();
        assert!(last.is_empty());
        assert!(last.last_category().is_some());
        assert!(last.last_updated().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn should_retry_after_rejection_and_accept_second_batch() {
        let (repo, recorded) = recording_repo(vec![]);
        let (model, calls) = scripted_model(vec![Ok("not json".to_string()), Ok(valid_meals())]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);
        let started = Instant::now();

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(outcome, GenerationOutcome::Accepted(_)));
        assert_eq!(recorded.committed.lock().unwrap().len(), 1);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1000) && waited < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn should_back_off_exponentially_when_rate_limited() {
        let (repo, _recorded) = recording_repo(vec![]);
        let (model, calls) = scripted_model(vec![
            Err(InferenceError::RateLimited),
            Err(InferenceError::RateLimited),
            Err(InferenceError::RateLimited),
            Ok(valid_meals()),
        ]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);
        let started = Instant::now();

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(matches!(outcome, GenerationOutcome::Accepted(_)));
        // 1000 + 2000 + 4000
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(7000) && waited < Duration::from_millis(7100));
    }

    #[tokio::test(start_paused = true)]
    async fn should_reject_batch_repeating_history_and_keep_history_capped() {
        let mut history: Vec<String> = (0..29).map(|i| format!("{} dates + 1 milk", i)).collect();
        history.push("2 eggs + 1 toast".to_string());
        let (repo, recorded) = recording_repo(history);
        let fresh = json!([
            meal_item("3 eggs + 1 pita"),
            meal_item("1 bowl rice + 2 kofta"),
            meal_item("150g lentils + 1 pita"),
        ])
        .to_string();
        let (model, calls) = scripted_model(vec![Ok(valid_meals()), Ok(fresh)]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(outcome, GenerationOutcome::Accepted(_)));
        let committed = recorded.committed.lock().unwrap();
        let (_, _, history) = &committed[0];
        assert_eq!(history.len(), 30);
        assert_eq!(history.last().unwrap(), "150g lentils + 1 pita");
        assert!(history.contains(&"2 eggs + 1 toast".to_string()));
        assert!(!history.contains(&"0 dates + 1 milk".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn should_be_noop_when_cycle_already_in_flight() {
        let repo = MockSuggestionRepo::new();
        let mut model = MockModel::new();
        model.expect_complete().times(0);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);
        let _permit = use_case
            .in_flight
            .try_acquire(&test_user_id(), SuggestionKind::Meal);

        let outcome = use_case.execute(params(SuggestionKind::Meal)).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::AlreadyInFlight);
    }

    #[tokio::test(start_paused = true)]
    async fn should_require_subscription_when_enabled() {
        let repo = MockSuggestionRepo::new();
        let mut model = MockModel::new();
        model.expect_complete().times(0);
        let mut profile = subscribed_profile();
        profile.is_subscribed = false;
        let use_case = use_case(repo, profile_repo(profile), model);

        let result = use_case.execute(params(SuggestionKind::Drink)).await;

        assert!(matches!(result, Err(SuggestionError::SubscriptionRequired)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_profile_unavailable_when_profile_store_fails() {
        let repo = MockSuggestionRepo::new();
        let model = MockModel::new();
        let mut profiles = MockProfileRepo::new();
        profiles
            .expect_get_profile()
            .returning(|_| Err(RepositoryError::DatabaseError));
        let use_case = use_case(repo, profiles, model);

        let result = use_case.execute(params(SuggestionKind::Meal)).await;

        assert!(matches!(result, Err(SuggestionError::ProfileUnavailable)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_commit_when_cancelled_during_backoff() {
        let (repo, recorded) = recording_repo(vec![]);
        let cancel = CancellationToken::new();
        let cancel_from_model = cancel.clone();
        let mut model = MockModel::new();
        model.expect_complete().times(1).returning(move |_| {
            cancel_from_model.cancel();
            Err(InferenceError::Transport("connection reset".to_string()))
        });
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let outcome = use_case
            .execute(GenerateSuggestionsParams {
                user_id: test_user_id(),
                kind: SuggestionKind::Meal,
                cancel,
            })
            .await
            .unwrap();

        assert_eq!(outcome, GenerationOutcome::Cancelled);
        assert!(recorded.committed.lock().unwrap().is_empty());
        assert!(
            !use_case
                .in_flight
                .is_in_flight(&test_user_id(), SuggestionKind::Meal)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_drink_history_in_its_own_namespace() {
        let drinks = json!([
            {
                "name": "Mint lemonade", "calories": 90, "protein": 0, "carbs": 22, "fat": 0,
                "difficulty": "Easy", "timeToMake": "5 min", "budget": "€",
                "quickRecipe": "Blend lemon, mint and water.", "type": "hydration"
            },
            {
                "name": "Date milkshake", "calories": 260, "protein": 9, "carbs": 40, "fat": 6,
                "difficulty": "Easy", "timeToMake": "5 min", "budget": "€€",
                "quickRecipe": "Blend dates with cold milk.", "type": "energy"
            },
            {
                "name": "Chamomile tea", "calories": 5, "protein": 0, "carbs": 1, "fat": 0,
                "difficulty": "Easy", "timeToMake": "5 min", "budget": "€",
                "quickRecipe": "Steep for four minutes.", "type": "relaxation"
            }
        ])
        .to_string();
        let mut repo = MockSuggestionRepo::new();
        repo.expect_load_store()
            .withf(|_, kind| *kind == SuggestionKind::Drink)
            .returning(|_, _| Ok(SuggestionStore::default()));
        repo.expect_save_store()
            .withf(|_, kind, _| *kind == SuggestionKind::Drink)
            .returning(|_, _, _| Ok(()));
        repo.expect_load_history()
            .withf(|_, kind| *kind == SuggestionKind::Drink)
            .returning(|_, _| Ok(vec!["2 eggs + 1 toast".to_string()]));
        repo.expect_commit_batch()
            .withf(|_, kind, store, history| {
                *kind == SuggestionKind::Drink
                    && store.suggestions().len() == 3
                    && history.len() == 4
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let (model, _) = scripted_model(vec![Ok(drinks)]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let outcome = use_case.execute(params(SuggestionKind::Drink)).await.unwrap();

        assert!(
            outcome
                .suggestions()
                .iter()
                .all(|s| s.kind() == SuggestionKind::Drink)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_propagate_commit_failure_without_reporting_acceptance() {
        let mut repo = MockSuggestionRepo::new();
        repo.expect_load_store()
            .returning(|_, _| Ok(SuggestionStore::default()));
        repo.expect_save_store().returning(|_, _, _| Ok(()));
        repo.expect_load_history().returning(|_, _| Ok(vec![]));
        repo.expect_commit_batch()
            .returning(|_, _, _, _| Err(RepositoryError::DatabaseError));
        let (model, _) = scripted_model(vec![Ok(valid_meals())]);
        let use_case = use_case(repo, profile_repo(subscribed_profile()), model);

        let result = use_case.execute(params(SuggestionKind::Meal)).await;

        assert!(matches!(result, Err(SuggestionError::Repository(_))));
    }
}
