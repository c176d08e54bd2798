use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::model::Suggestion;

/// Currently displayed batch of one kind plus its refresh metadata.
///
/// Persisted as `{suggestions, lastUpdated, lastCategory}`. Readers outside
/// this crate only get snapshots; every mutation goes through the
/// acceptance path of the generation controller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionStore {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    last_category: Option<Category>,
}

impl SuggestionStore {
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_category(&self) -> Option<Category> {
        self.last_category
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Replaces the batch wholesale and stamps the refresh time.
    pub(crate) fn set_suggestions(&mut self, batch: Vec<Suggestion>, now: DateTime<Utc>) {
        self.suggestions = batch;
        self.last_updated = Some(now);
    }

    /// Stamped when a cycle starts so a long generation does not trigger
    /// a second one for the same slot.
    pub(crate) fn set_last_category(&mut self, category: Category) {
        self.last_category = Some(category);
    }

    /// Drops the batch after an unrecoverable failure. The refresh time is
    /// stamped so the cadence does not start another cycle until the next
    /// slot or max age; a manual refresh is still possible.
    pub(crate) fn clear(&mut self, now: DateTime<Utc>) {
        self.set_suggestions(Vec::new(), now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::suggestion::model::{
        BudgetTier, Difficulty, Macros, SuggestionDetails,
    };
    use chrono::TimeZone;

    fn suggestion(name: &str) -> Suggestion {
        Suggestion {
            name: name.to_string(),
            category: Category::Lunch,
            macros: Macros::default(),
            difficulty: Difficulty::Easy,
            time_to_make: "10 min".to_string(),
            budget: BudgetTier::Low,
            quick_recipe: "Mix".to_string(),
            details: SuggestionDetails::Meal {
                cuisine: "home-style".to_string(),
            },
        }
    }

    #[test]
    fn should_replace_batch_and_stamp_time() {
        let mut store = SuggestionStore::default();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap();

        store.set_suggestions(vec![suggestion("a"), suggestion("b"), suggestion("c")], now);
        store.set_suggestions(vec![suggestion("d"), suggestion("e"), suggestion("f")], now);

        assert_eq!(store.suggestions().len(), 3);
        assert_eq!(store.suggestions()[0].name, "d");
        assert_eq!(store.last_updated(), Some(now));
    }

    #[test]
    fn should_stamp_refresh_time_and_keep_category_when_cleared() {
        let mut store = SuggestionStore::default();
        let accepted_at = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        let failed_at = Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap();
        store.set_last_category(Category::Lunch);
        store.set_suggestions(vec![suggestion("a")], accepted_at);

        store.clear(failed_at);

        assert!(store.is_empty());
        assert_eq!(store.last_updated(), Some(failed_at));
        assert_eq!(store.last_category(), Some(Category::Lunch));
    }

    #[test]
    fn should_persist_with_camel_case_keys() {
        let mut store = SuggestionStore::default();
        store.set_last_category(Category::Night);

        let json = serde_json::to_value(&store).unwrap();

        assert_eq!(json["lastCategory"], "night");
        assert!(json["lastUpdated"].is_null());
        assert!(json["suggestions"].as_array().unwrap().is_empty());

        let restored: SuggestionStore = serde_json::from_value(json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn should_load_empty_store_from_empty_object() {
        let restored: SuggestionStore = serde_json::from_str("{}").unwrap();
        assert_eq!(restored, SuggestionStore::default());
    }
}
