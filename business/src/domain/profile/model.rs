use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::domain::shared::value_objects::{Locale, UserId};
use crate::domain::suggestion::model::{BudgetTier, Macros};

/// Profile attributes read from the remote document store.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub diet_type: Option<String>,
    pub allergies: Vec<String>,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goals: Vec<String>,
    pub activity_level: Option<String>,
    pub locale: Locale,
    /// Offset of the user's wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
    pub is_subscribed: bool,
    pub daily_targets: Macros,
    pub preferred_budget: BudgetTier,
}

impl UserProfile {
    /// Minimal profile with no optional attributes.
    pub fn new(user_id: UserId, locale: Locale) -> Self {
        Self {
            user_id,
            diet_type: None,
            allergies: Vec::new(),
            age: None,
            weight_kg: None,
            height_cm: None,
            goals: Vec::new(),
            activity_level: None,
            locale,
            utc_offset_minutes: 0,
            is_subscribed: false,
            daily_targets: Macros::default(),
            preferred_budget: BudgetTier::Medium,
        }
    }

    /// Converts an instant to the user's wall clock. Offsets outside
    /// +-24h are treated as UTC.
    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        now.with_timezone(&offset)
    }
}

/// Macros already logged by the user today.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyIntake {
    pub consumed: Macros,
}

/// What is left of today's targets. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionRemainder(pub Macros);

impl NutritionRemainder {
    pub fn compute(targets: &Macros, intake: &DailyIntake) -> Self {
        Self(targets.saturating_sub(&intake.consumed))
    }

    pub fn macros(&self) -> &Macros {
        &self.0
    }
}
