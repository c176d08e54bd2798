use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::category::Category;
use super::model::SuggestionKind;

/// Decides when a displayed batch has gone stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CadencePolicy {
    /// Age at which a batch is refreshed regardless of category.
    pub max_age: Duration,
}

impl Default for CadencePolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::hours(2),
        }
    }
}

impl CadencePolicy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Pure decision over the stored refresh metadata.
    ///
    /// First match wins: no previous refresh, batch older than `max_age`,
    /// or the local time-of-day slot moved away from `last_category`.
    /// `now` must be expressed in the user's local offset.
    pub fn should_refresh(
        &self,
        kind: SuggestionKind,
        last_updated: Option<DateTime<Utc>>,
        last_category: Option<Category>,
        now: &DateTime<FixedOffset>,
    ) -> bool {
        let Some(last_updated) = last_updated else {
            return true;
        };

        if now.with_timezone(&Utc) - last_updated >= self.max_age {
            return true;
        }

        Some(Category::at(kind, now)) != last_category
    }
}
