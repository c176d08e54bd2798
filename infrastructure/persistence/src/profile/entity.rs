use sqlx::FromRow;

use business::domain::profile::model::{DailyIntake, UserProfile};
use business::domain::shared::value_objects::{Locale, UserId};
use business::domain::suggestion::model::{BudgetTier, Macros};

#[derive(Debug, FromRow)]
pub struct UserProfileEntity {
    pub user_id: String,
    pub diet_type: Option<String>,
    pub allergies: Vec<String>,
    pub age: Option<i32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub goals: Vec<String>,
    pub activity_level: Option<String>,
    pub language: String,
    pub utc_offset_minutes: i32,
    pub is_subscribed: bool,
    pub target_calories: f64,
    pub target_protein: f64,
    pub target_carbs: f64,
    pub target_fat: f64,
    pub preferred_budget: Option<String>,
}

impl UserProfileEntity {
    pub fn into_domain(self) -> UserProfile {
        let preferred_budget = self
            .preferred_budget
            .as_deref()
            .and_then(|tier| tier.parse::<BudgetTier>().ok())
            .unwrap_or(BudgetTier::Medium);

        UserProfile {
            user_id: UserId::new(self.user_id),
            diet_type: self.diet_type,
            allergies: self.allergies,
            age: self.age.and_then(|age| u32::try_from(age).ok()),
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            goals: self.goals,
            activity_level: self.activity_level,
            locale: Locale::from_language_tag(&self.language),
            utc_offset_minutes: self.utc_offset_minutes,
            is_subscribed: self.is_subscribed,
            daily_targets: Macros {
                calories: self.target_calories,
                protein: self.target_protein,
                carbs: self.target_carbs,
                fat: self.target_fat,
            },
            preferred_budget,
        }
    }
}

/// Sum of the macros logged on one day.
#[derive(Debug, FromRow)]
pub struct DailyIntakeEntity {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl DailyIntakeEntity {
    pub fn into_domain(self) -> DailyIntake {
        DailyIntake {
            consumed: Macros {
                calories: self.calories,
                protein: self.protein,
                carbs: self.carbs,
                fat: self.fat,
            },
        }
    }
}
