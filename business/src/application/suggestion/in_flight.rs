use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::shared::value_objects::UserId;
use crate::domain::suggestion::model::SuggestionKind;

type FlightKey = (UserId, SuggestionKind);

/// Shared `loading` flags, one per user and suggestion kind. Every trigger
/// site consults the same registry so cycles never overlap.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    active: Mutex<HashSet<FlightKey>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn active(&self) -> MutexGuard<'_, HashSet<FlightKey>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_in_flight(&self, user_id: &UserId, kind: SuggestionKind) -> bool {
        self.active().contains(&(user_id.clone(), kind))
    }

    /// Marks a cycle as running. Returns `None` when one already is; the
    /// flag is released when the permit drops.
    pub fn try_acquire(
        self: &Arc<Self>,
        user_id: &UserId,
        kind: SuggestionKind,
    ) -> Option<InFlightPermit> {
        let key = (user_id.clone(), kind);
        if !self.active().insert(key.clone()) {
            return None;
        }
        Some(InFlightPermit {
            registry: Arc::clone(self),
            key,
        })
    }
}

#[derive(Debug)]
pub struct InFlightPermit {
    registry: Arc<InFlightRegistry>,
    key: FlightKey,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.registry.active().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_refuse_second_permit_for_same_kind() {
        let registry = Arc::new(InFlightRegistry::new());
        let user = UserId::new("u1");

        let permit = registry.try_acquire(&user, SuggestionKind::Meal);

        assert!(permit.is_some());
        assert!(registry.is_in_flight(&user, SuggestionKind::Meal));
        assert!(registry.try_acquire(&user, SuggestionKind::Meal).is_none());
    }

    #[test]
    fn should_keep_kinds_and_users_independent() {
        let registry = Arc::new(InFlightRegistry::new());
        let user = UserId::new("u1");
        let _meal = registry.try_acquire(&user, SuggestionKind::Meal);

        assert!(registry.try_acquire(&user, SuggestionKind::Drink).is_some());
        assert!(
            registry
                .try_acquire(&UserId::new("u2"), SuggestionKind::Meal)
                .is_some()
        );
    }

    #[test]
    fn should_release_flag_when_permit_drops() {
        let registry = Arc::new(InFlightRegistry::new());
        let user = UserId::new("u1");

        drop(registry.try_acquire(&user, SuggestionKind::Drink));

        assert!(!registry.is_in_flight(&user, SuggestionKind::Drink));
        assert!(registry.try_acquire(&user, SuggestionKind::Drink).is_some());
    }
}
