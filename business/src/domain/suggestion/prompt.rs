use crate::domain::profile::model::{NutritionRemainder, UserProfile};
use crate::domain::shared::value_objects::Locale;

use super::category::Category;
use super::keywords::forbidden_keywords;
use super::model::{BATCH_SIZE, BudgetTier, Difficulty, SuggestionKind};
use super::validation::MAX_NAME_CHARS;

/// Literal cuisine every meal suggestion must carry.
pub const MEAL_CUISINE: &str = "home-style";

const DRINK_TYPES: &[&str] = &["hydration", "energy", "recovery", "relaxation"];

const BUDGET_TIERS: [BudgetTier; 3] = [BudgetTier::Low, BudgetTier::Medium, BudgetTier::High];

/// Difficulties the model may use for each kind. Meals stay simple.
fn difficulties(kind: SuggestionKind) -> &'static [Difficulty] {
    match kind {
        SuggestionKind::Meal => &[Difficulty::Easy, Difficulty::Medium],
        SuggestionKind::Drink => &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
    }
}

/// `"a" | "b"` over the display names of `values`.
fn alternatives<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|value| format!("\"{}\"", value))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Payload handed to the language model. The constraints it states are
/// re-checked by the validation pipeline whatever the model does.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub kind: SuggestionKind,
    pub locale: Locale,
    pub system_prompt: String,
    pub user_prompt: String,
    pub expected_items: usize,
    pub max_name_chars: usize,
}

/// Inputs for one prompt.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub kind: SuggestionKind,
    pub category: Category,
    pub budget: BudgetTier,
    pub remainder: NutritionRemainder,
    pub profile: &'a UserProfile,
    /// Recently accepted names the model must not repeat.
    pub exclusions: &'a [String],
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(ctx: &PromptContext<'_>) -> GenerationRequest {
        let locale = ctx.profile.locale;
        GenerationRequest {
            kind: ctx.kind,
            locale,
            system_prompt: Self::system_prompt(ctx.kind, locale),
            user_prompt: Self::user_prompt(ctx),
            expected_items: BATCH_SIZE,
            max_name_chars: MAX_NAME_CHARS,
        }
    }

    fn system_prompt(kind: SuggestionKind, locale: Locale) -> String {
        let role = match kind {
            SuggestionKind::Meal => {
                "You are a nutrition assistant for a diet tracking app. You suggest simple, cheap home food that fits the user's remaining macros."
            }
            SuggestionKind::Drink => {
                "You are a hydration assistant for a diet tracking app. You suggest healthy non-alcoholic drinks that fit the user's remaining macros."
            }
        };

        let mut prompt = format!(
            "{role}\nReturn ONLY a valid JSON array with exactly {BATCH_SIZE} items, no additional text."
        );
        if locale.is_arabic() {
            prompt.push_str(
                "\nWrite every human-readable value (name, timeToMake, quickRecipe) in Arabic script only. Never use Latin letters in those fields. Keep keys and the values of difficulty, budget, cuisine and type exactly as specified in English.",
            );
        }
        prompt
    }

    fn user_prompt(ctx: &PromptContext<'_>) -> String {
        let profile = ctx.profile;
        let budget = ctx.budget.clamp_for(ctx.kind);
        let remainder = ctx.remainder.macros();

        let mut lines = vec![
            format!(
                "Suggest {} {} options for {}.",
                BATCH_SIZE, ctx.kind, ctx.category
            ),
            String::new(),
            "REMAINING FOR TODAY:".to_string(),
            format!(
                "- calories: {:.0} kcal, protein: {:.0} g, carbs: {:.0} g, fat: {:.0} g",
                remainder.calories, remainder.protein, remainder.carbs, remainder.fat
            ),
            String::new(),
            "USER:".to_string(),
        ];

        lines.push(format!("- diet: {}", profile.diet_type.as_deref().unwrap_or("none")));
        lines.push(format!("- allergies: {}", join_or_none(&profile.allergies)));
        if let Some(age) = profile.age {
            lines.push(format!("- age: {}", age));
        }
        if let Some(weight) = profile.weight_kg {
            lines.push(format!("- weight: {:.1} kg", weight));
        }
        if let Some(height) = profile.height_cm {
            lines.push(format!("- height: {:.0} cm", height));
        }
        lines.push(format!("- goals: {}", join_or_none(&profile.goals)));
        lines.push(format!(
            "- activity level: {}",
            profile.activity_level.as_deref().unwrap_or("unknown")
        ));

        lines.push(String::new());
        lines.push("RULES:".to_string());
        lines.push(format!("- Exactly {} items, all with different names", BATCH_SIZE));
        lines.push(format!("- Budget: \"{}\" or cheaper", budget));
        match ctx.kind {
            SuggestionKind::Meal => {
                lines.push(format!(
                    "- name: at most {} characters, quantities joined with \"+\" like \"2 eggs + 1 toast\"",
                    MAX_NAME_CHARS
                ));
                lines.push(format!(
                    "- difficulty: {}",
                    alternatives(difficulties(ctx.kind))
                ));
                lines.push(format!("- cuisine: always \"{}\"", MEAL_CUISINE));
            }
            SuggestionKind::Drink => {
                lines.push(format!(
                    "- name: at most {} characters and must say what the drink is (juice, tea, smoothie...)",
                    MAX_NAME_CHARS
                ));
                lines.push(format!("- type: one of {}", DRINK_TYPES.join(", ")));
            }
        }
        lines.push(format!(
            "- Never mention: {}",
            forbidden_keywords(ctx.kind, profile.locale).join(", ")
        ));
        if !ctx.exclusions.is_empty() {
            lines.push(format!(
                "- Do not reuse these names: {}",
                ctx.exclusions.join(" | ")
            ));
        }

        lines.push(String::new());
        lines.push("Return JSON array with this EXACT structure:".to_string());
        lines.push(Self::shape(ctx.kind));

        lines.join("\n")
    }

    fn shape(kind: SuggestionKind) -> String {
        let ceiling = BudgetTier::ceiling(kind);
        let budgets = alternatives(BUDGET_TIERS.into_iter().filter(|tier| *tier <= ceiling));
        let classification = match kind {
            SuggestionKind::Meal => format!("\"cuisine\": \"{}\"", MEAL_CUISINE),
            SuggestionKind::Drink => format!("\"type\": \"{}\"", DRINK_TYPES.join("\" | \"")),
        };
        format!(
            r#"[
  {{
    "name": "short name",
    "calories": 0,
    "protein": 0,
    "carbs": 0,
    "fat": 0,
    "difficulty": {},
    "timeToMake": "duration",
    "budget": {},
    "quickRecipe": "one or two sentences",
    {}
  }}
]"#,
            alternatives(difficulties(kind)),
            budgets,
            classification
        )
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
