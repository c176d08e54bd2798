use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};

use business::domain::suggestion::model::{Macros, Suggestion, SuggestionDetails};
use business::domain::suggestion::store::SuggestionStore;
use business::domain::suggestion::use_cases::generate::GenerationOutcome;

#[derive(Debug, Clone, Object)]
pub struct MacrosResponse {
    /// Energy in kcal
    pub calories: f64,
    /// Grams
    pub protein: f64,
    /// Grams
    pub carbs: f64,
    /// Grams
    pub fat: f64,
}

impl From<Macros> for MacrosResponse {
    fn from(m: Macros) -> Self {
        Self {
            calories: m.calories,
            protein: m.protein,
            carbs: m.carbs,
            fat: m.fat,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub name: String,
    /// Time-of-day slot the suggestion was generated for
    pub category: String,
    pub macros: MacrosResponse,
    /// Easy, Medium or Hard
    pub difficulty: String,
    pub time_to_make: String,
    /// low, medium or high
    pub budget: String,
    pub quick_recipe: String,
    /// Meals only
    #[oai(skip_serializing_if_is_none)]
    pub cuisine: Option<String>,
    /// Drinks only: hydration, energy, recovery or relaxation
    #[oai(rename = "type", skip_serializing_if_is_none)]
    pub drink_type: Option<String>,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(s: Suggestion) -> Self {
        let (cuisine, drink_type) = match s.details {
            SuggestionDetails::Meal { cuisine } => (Some(cuisine), None),
            SuggestionDetails::Drink { drink_type } => (None, Some(drink_type)),
        };

        Self {
            name: s.name,
            category: s.category.to_string(),
            macros: s.macros.into(),
            difficulty: s.difficulty.to_string(),
            time_to_make: s.time_to_make,
            budget: s.budget.to_string(),
            quick_recipe: s.quick_recipe,
            cuisine,
            drink_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Enum)]
pub enum GenerationOutcomeDto {
    #[oai(rename = "accepted")]
    Accepted,
    #[oai(rename = "exhausted")]
    Exhausted,
    #[oai(rename = "cancelled")]
    Cancelled,
}

/// Snapshot of the displayed batch for one kind.
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestionResponse>,
    #[oai(skip_serializing_if_is_none)]
    pub last_updated: Option<DateTime<Utc>>,
    #[oai(skip_serializing_if_is_none)]
    pub last_category: Option<String>,
    /// True when the batch is empty and a manual refresh should be offered
    pub refreshable: bool,
    /// Set when this request ran a generation cycle
    #[oai(skip_serializing_if_is_none)]
    pub outcome: Option<GenerationOutcomeDto>,
}

impl From<SuggestionStore> for SuggestionsResponse {
    fn from(store: SuggestionStore) -> Self {
        Self {
            refreshable: store.is_empty(),
            last_updated: store.last_updated(),
            last_category: store.last_category().map(|c| c.to_string()),
            suggestions: store
                .suggestions()
                .iter()
                .cloned()
                .map(SuggestionResponse::from)
                .collect(),
            outcome: None,
        }
    }
}

impl SuggestionsResponse {
    pub fn with_outcome(mut self, outcome: &GenerationOutcome) -> Self {
        self.outcome = match outcome {
            GenerationOutcome::Accepted(_) => Some(GenerationOutcomeDto::Accepted),
            GenerationOutcome::Exhausted { .. } => Some(GenerationOutcomeDto::Exhausted),
            GenerationOutcome::Cancelled => Some(GenerationOutcomeDto::Cancelled),
            GenerationOutcome::AlreadyInFlight => None,
        };
        self
    }
}
