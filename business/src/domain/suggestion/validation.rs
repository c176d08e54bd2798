use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::domain::shared::value_objects::Locale;

use super::category::Category;
use super::errors::ValidationError;
use super::history::GenerationHistory;
use super::keywords::{find_keyword, forbidden_keywords, is_beverage};
use super::model::{
    BATCH_SIZE, BudgetTier, Difficulty, Macros, Suggestion, SuggestionDetails, SuggestionKind,
};

/// Longest accepted meal name, in characters.
pub const MAX_NAME_CHARS: usize = 30;

static LATIN_LETTER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\p{Latin}").ok());

/// Everything the pipeline needs besides the raw text.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub kind: SuggestionKind,
    pub locale: Locale,
    /// Slot the accepted batch is tagged with.
    pub category: Category,
    pub history: &'a GenerationHistory,
}

/// Item shape as the model is asked to return it. Every field is optional
/// here so that absence is reported per field instead of as a parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSuggestion {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    time_to_make: Option<String>,
    #[serde(default)]
    budget: Option<String>,
    #[serde(default)]
    quick_recipe: Option<String>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default, rename = "type")]
    drink_type: Option<String>,
}

/// Item after structural checks, before the domain rules.
struct CheckedItem {
    name: String,
    macros: Macros,
    difficulty: Difficulty,
    time_to_make: String,
    budget: BudgetTier,
    quick_recipe: String,
    classification: String,
}

impl CheckedItem {
    fn searchable_text(&self) -> String {
        format!("{} {}", self.name, self.quick_recipe)
    }

    fn human_readable_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("timeToMake", self.time_to_make.as_str()),
            ("quickRecipe", self.quick_recipe.as_str()),
        ]
    }
}

/// Runs the full pipeline over raw model output. Any rule violation
/// discards the whole batch.
pub fn validate(raw_text: &str, ctx: &ValidationContext<'_>) -> Result<Vec<Suggestion>, ValidationError> {
    let raw_items = parse_items(raw_text)?;

    if raw_items.len() != BATCH_SIZE {
        return Err(ValidationError::WrongCardinality {
            expected: BATCH_SIZE,
            actual: raw_items.len(),
        });
    }

    let items = raw_items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| check_structure(index, raw, ctx.kind))
        .collect::<Result<Vec<_>, _>>()?;

    check_budget(&items, ctx.kind)?;
    check_forbidden_keywords(&items, ctx)?;
    check_script(&items, ctx.locale)?;
    if ctx.kind == SuggestionKind::Meal {
        check_meal_names(&items)?;
    }
    check_unique_names(&items)?;
    check_history(&items, ctx.history)?;
    if ctx.kind == SuggestionKind::Drink {
        check_beverages(&items, ctx.locale)?;
    }

    Ok(items
        .into_iter()
        .map(|item| into_suggestion(item, ctx))
        .collect())
}

/// Removes a surrounding Markdown code fence (with or without a language
/// tag) and trims whitespace.
pub fn strip_code_fence(raw_text: &str) -> &str {
    let text = raw_text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse_items(raw_text: &str) -> Result<Vec<RawSuggestion>, ValidationError> {
    serde_json::from_str::<Vec<RawSuggestion>>(strip_code_fence(raw_text))
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))
}

fn required_text(
    index: usize,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { index, field }),
    }
}

fn required_amount(
    index: usize,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { index, field }),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::NegativeValue { index, field }),
        Some(v) => Ok(v),
    }
}

fn check_structure(
    index: usize,
    raw: RawSuggestion,
    kind: SuggestionKind,
) -> Result<CheckedItem, ValidationError> {
    let name = required_text(index, "name", raw.name)?;
    let time_to_make = required_text(index, "timeToMake", raw.time_to_make)?;
    let quick_recipe = required_text(index, "quickRecipe", raw.quick_recipe)?;
    let difficulty = required_text(index, "difficulty", raw.difficulty)?;
    let budget = required_text(index, "budget", raw.budget)?;
    let classification = match kind {
        SuggestionKind::Meal => required_text(index, "cuisine", raw.cuisine)?,
        SuggestionKind::Drink => required_text(index, "type", raw.drink_type)?,
    };

    let macros = Macros {
        calories: required_amount(index, "calories", raw.calories)?,
        protein: required_amount(index, "protein", raw.protein)?,
        carbs: required_amount(index, "carbs", raw.carbs)?,
        fat: required_amount(index, "fat", raw.fat)?,
    };

    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|_| ValidationError::InvalidValue {
            index,
            field: "difficulty",
            value: difficulty.clone(),
        })?;
    let budget = budget
        .parse::<BudgetTier>()
        .map_err(|_| ValidationError::InvalidValue {
            index,
            field: "budget",
            value: budget.clone(),
        })?;

    Ok(CheckedItem {
        name,
        macros,
        difficulty,
        time_to_make,
        budget,
        quick_recipe,
        classification,
    })
}

fn check_budget(items: &[CheckedItem], kind: SuggestionKind) -> Result<(), ValidationError> {
    let ceiling = BudgetTier::ceiling(kind);
    match items.iter().position(|item| item.budget > ceiling) {
        Some(index) => Err(ValidationError::ForbiddenBudget { index }),
        None => Ok(()),
    }
}

fn check_forbidden_keywords(
    items: &[CheckedItem],
    ctx: &ValidationContext<'_>,
) -> Result<(), ValidationError> {
    let forbidden = forbidden_keywords(ctx.kind, ctx.locale);
    for (index, item) in items.iter().enumerate() {
        if let Some(keyword) = find_keyword(&item.searchable_text(), &forbidden) {
            return Err(ValidationError::ForbiddenKeyword {
                index,
                keyword: keyword.to_string(),
            });
        }
    }
    Ok(())
}

fn contains_latin(text: &str) -> bool {
    match LATIN_LETTER.as_ref() {
        Some(re) => re.is_match(text),
        None => text.chars().any(|c| c.is_ascii_alphabetic()),
    }
}

fn check_script(items: &[CheckedItem], locale: Locale) -> Result<(), ValidationError> {
    if !locale.is_arabic() {
        return Ok(());
    }
    for (index, item) in items.iter().enumerate() {
        for (field, text) in item.human_readable_fields() {
            if contains_latin(text) {
                return Err(ValidationError::LatinScript { index, field });
            }
        }
    }
    Ok(())
}

fn check_meal_names(items: &[CheckedItem]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        let length = item.name.chars().count();
        if length > MAX_NAME_CHARS {
            return Err(ValidationError::NameTooLong { index, length });
        }
        let has_digit = item.name.chars().any(char::is_numeric);
        if !has_digit || !item.name.contains('+') {
            return Err(ValidationError::NameShape { index });
        }
    }
    Ok(())
}

fn check_unique_names(items: &[CheckedItem]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.name.as_str()) {
            return Err(ValidationError::DuplicateName(item.name.clone()));
        }
    }
    Ok(())
}

fn check_history(items: &[CheckedItem], history: &GenerationHistory) -> Result<(), ValidationError> {
    match items.iter().find(|item| history.contains(&item.name)) {
        Some(item) => Err(ValidationError::RepeatedFromHistory(item.name.clone())),
        None => Ok(()),
    }
}

fn check_beverages(items: &[CheckedItem], locale: Locale) -> Result<(), ValidationError> {
    match items
        .iter()
        .position(|item| !is_beverage(&item.searchable_text(), locale))
    {
        Some(index) => Err(ValidationError::NotABeverage { index }),
        None => Ok(()),
    }
}

fn into_suggestion(item: CheckedItem, ctx: &ValidationContext<'_>) -> Suggestion {
    let details = match ctx.kind {
        SuggestionKind::Meal => SuggestionDetails::Meal {
            cuisine: item.classification,
        },
        SuggestionKind::Drink => SuggestionDetails::Drink {
            drink_type: item.classification,
        },
    };
    Suggestion {
        name: item.name,
        category: ctx.category,
        macros: item.macros,
        difficulty: item.difficulty,
        time_to_make: item.time_to_make,
        budget: item.budget,
        quick_recipe: item.quick_recipe,
        details,
    }
}
