use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::suggestion::in_flight::InFlightRegistry;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::model::SuggestionKind;
use crate::domain::suggestion::use_cases::refresh::{
    RefreshOutcome, RefreshSuggestionsParams, RefreshSuggestionsUseCase,
};

struct Subscription {
    token: CancellationToken,
    last_seen: Instant,
}

type Subscriptions = HashMap<(UserId, SuggestionKind), Subscription>;

/// Periodic poll over every mounted suggestion view.
///
/// A subscription lives from view mount to teardown, or until the view has
/// not been seen for `subscription_ttl`. Its token is a child of the
/// scheduler's root token, so shutting the scheduler down cancels every
/// pending inference and backoff as well.
pub struct SuggestionScheduler {
    refresh: Arc<dyn RefreshSuggestionsUseCase>,
    in_flight: Arc<InFlightRegistry>,
    subscriptions: Mutex<Subscriptions>,
    root: CancellationToken,
    poll_interval: Duration,
    subscription_ttl: Duration,
    logger: Arc<dyn Logger>,
}

impl SuggestionScheduler {
    pub fn new(
        refresh: Arc<dyn RefreshSuggestionsUseCase>,
        in_flight: Arc<InFlightRegistry>,
        poll_interval: Duration,
        subscription_ttl: Duration,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            refresh,
            in_flight,
            subscriptions: Mutex::new(HashMap::new()),
            root: CancellationToken::new(),
            poll_interval,
            subscription_ttl,
            logger,
        }
    }

    fn subscriptions(&self) -> MutexGuard<'_, Subscriptions> {
        self.subscriptions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a mounted view, or marks it seen again, and returns the
    /// token its cycles run under. Mounting twice reuses the live token.
    pub fn subscribe(&self, user_id: &UserId, kind: SuggestionKind) -> CancellationToken {
        let now = Instant::now();
        let mut subscriptions = self.subscriptions();
        let subscription = subscriptions
            .entry((user_id.clone(), kind))
            .or_insert_with(|| Subscription {
                token: self.root.child_token(),
                last_seen: now,
            });
        if subscription.token.is_cancelled() {
            subscription.token = self.root.child_token();
        }
        subscription.last_seen = now;
        subscription.token.clone()
    }

    /// Token for a single user-initiated cycle. It is not registered, so
    /// the poll never picks the pair up, but `shutdown` still cancels it.
    pub fn one_off_token(&self) -> CancellationToken {
        self.root.child_token()
    }

    /// Tears a view down. Any cycle running under its token stops at the
    /// next suspension point without committing.
    pub fn unsubscribe(&self, user_id: &UserId, kind: SuggestionKind) -> bool {
        match self.subscriptions().remove(&(user_id.clone(), kind)) {
            Some(subscription) => {
                subscription.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, user_id: &UserId, kind: SuggestionKind) -> bool {
        self.subscriptions()
            .contains_key(&(user_id.clone(), kind))
    }

    /// Drops subscriptions whose view has not been seen for the TTL, then
    /// starts a refresh-if-due for every remaining one that has no cycle
    /// in flight. Returns the spawned tasks.
    pub fn tick(&self) -> Vec<JoinHandle<()>> {
        self.evict_stale();

        let due: Vec<_> = self
            .subscriptions()
            .iter()
            .filter(|((user_id, kind), _)| !self.in_flight.is_in_flight(user_id, *kind))
            .map(|((user_id, kind), subscription)| {
                (user_id.clone(), *kind, subscription.token.clone())
            })
            .collect();

        due.into_iter()
            .map(|(user_id, kind, cancel)| {
                let refresh = Arc::clone(&self.refresh);
                let logger = Arc::clone(&self.logger);
                tokio::spawn(async move {
                    let params = RefreshSuggestionsParams {
                        user_id: user_id.clone(),
                        kind,
                        cancel,
                    };
                    match refresh.execute(params).await {
                        Ok(RefreshOutcome::NotDue(_)) => {}
                        Ok(RefreshOutcome::Generated(outcome)) => logger.debug(&format!(
                            "Poll refreshed {} suggestions for {}: {} accepted",
                            kind,
                            user_id,
                            outcome.suggestions().len()
                        )),
                        Err(e) => logger.warn(&format!(
                            "Poll refresh of {} suggestions for {} failed: {}",
                            kind, user_id, e
                        )),
                    }
                })
            })
            .collect()
    }

    fn evict_stale(&self) {
        let now = Instant::now();
        let ttl = self.subscription_ttl;
        let mut evicted = Vec::new();
        self.subscriptions().retain(|(user_id, kind), subscription| {
            let alive = now.duration_since(subscription.last_seen) < ttl;
            if !alive {
                subscription.token.cancel();
                evicted.push(format!("{}/{}", user_id, kind));
            }
            alive
        });
        if !evicted.is_empty() {
            self.logger.debug(&format!(
                "Evicted {} idle subscription(s): {}",
                evicted.len(),
                evicted.join(", ")
            ));
        }
    }

    /// Polls at the configured interval until `shutdown` is called.
    pub async fn run(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        self.logger.info(&format!(
            "Suggestion scheduler polling every {} s",
            self.poll_interval.as_secs()
        ));

        loop {
            tokio::select! {
                _ = self.root.cancelled() => break,
                _ = interval.tick() => {
                    self.tick();
                }
            }
        }

        self.logger.info("Suggestion scheduler stopped");
    }

    /// Cancels every subscription and stops `run`.
    pub fn shutdown(&self) {
        self.root.cancel();
        self.subscriptions().clear();
    }
}
