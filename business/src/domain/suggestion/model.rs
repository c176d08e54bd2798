use serde::{Deserialize, Serialize};

use super::category::Category;

/// Independent suggestion namespaces. Keys, history and in-flight guards
/// never cross between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Meal,
    Drink,
}

impl SuggestionKind {
    /// Storage key of the persisted suggestion store for this kind.
    pub fn store_key(&self) -> String {
        format!("suggestions:{}", self)
    }

    /// Storage key of the persisted name history for this kind.
    pub fn history_key(&self) -> String {
        format!("history:{}", self)
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionKind::Meal => write!(f, "meal"),
            SuggestionKind::Drink => write!(f, "drink"),
        }
    }
}

impl std::str::FromStr for SuggestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meal" | "meals" => Ok(SuggestionKind::Meal),
            "drink" | "drinks" => Ok(SuggestionKind::Drink),
            _ => Err(format!("Invalid suggestion kind: {}", s)),
        }
    }
}

/// Preparation difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {}", s)),
        }
    }
}

/// Coarse price tier. Models frequently answer with currency symbols, so
/// `€`, `€€` and `€€€` are accepted as input spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "low", alias = "€")]
    Low,
    #[serde(rename = "medium", alias = "€€")]
    Medium,
    #[serde(rename = "high", alias = "€€€")]
    High,
}

impl BudgetTier {
    /// Highest tier allowed for the given kind.
    pub fn ceiling(kind: SuggestionKind) -> Self {
        match kind {
            SuggestionKind::Meal => BudgetTier::Medium,
            SuggestionKind::Drink => BudgetTier::High,
        }
    }

    /// Clamps a requested tier to what the kind allows.
    pub fn clamp_for(self, kind: SuggestionKind) -> Self {
        self.min(Self::ceiling(kind))
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetTier::Low => write!(f, "low"),
            BudgetTier::Medium => write!(f, "medium"),
            BudgetTier::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" | "€" => Ok(BudgetTier::Low),
            "medium" | "€€" => Ok(BudgetTier::Medium),
            "high" | "€€€" => Ok(BudgetTier::High),
            _ => Err(format!("Invalid budget tier: {}", s)),
        }
    }
}

/// Macronutrients in kcal and grams. All components are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    /// Component-wise `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &Macros) -> Macros {
        Macros {
            calories: (self.calories - other.calories).max(0.0),
            protein: (self.protein - other.protein).max(0.0),
            carbs: (self.carbs - other.carbs).max(0.0),
            fat: (self.fat - other.fat).max(0.0),
        }
    }
}

/// Fields specific to each suggestion variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionDetails {
    Meal {
        cuisine: String,
    },
    Drink {
        #[serde(rename = "type")]
        drink_type: String,
    },
}

/// One accepted meal or drink suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub name: String,
    pub category: Category,
    pub macros: Macros,
    pub difficulty: Difficulty,
    pub time_to_make: String,
    pub budget: BudgetTier,
    pub quick_recipe: String,
    #[serde(flatten)]
    pub details: SuggestionDetails,
}

impl Suggestion {
    pub fn kind(&self) -> SuggestionKind {
        match self.details {
            SuggestionDetails::Meal { .. } => SuggestionKind::Meal,
            SuggestionDetails::Drink { .. } => SuggestionKind::Drink,
        }
    }
}

/// Number of suggestions in every accepted batch.
pub const BATCH_SIZE: usize = 3;
