//! Keyword sets used by the prompt builder and the validation pipeline.
//! All entries are lowercase. Forbidden terms and Arabic beverage words
//! are matched as substrings; English beverage words only as whole words.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::shared::value_objects::Locale;

use super::model::SuggestionKind;

const LUXURY_TERMS: &[&str] = &[
    "caviar",
    "truffle",
    "lobster",
    "wagyu",
    "foie gras",
    "saffron",
    "gourmet",
    "luxury",
    "champagne",
    "oyster",
    "كافيار",
    "كمأة",
    "لوبستر",
    "جراد البحر",
    "زعفران",
    "فاخر",
];

const HALAL_RESTRICTED_TERMS: &[&str] = &[
    "pork",
    "bacon",
    "ham",
    "lard",
    "wine",
    "beer",
    "alcohol",
    "خنزير",
    "لحم خنزير",
    "نبيذ",
    "بيرة",
    "كحول",
];

const ALCOHOLIC_TERMS: &[&str] = &[
    "wine",
    "beer",
    "vodka",
    "whisky",
    "whiskey",
    "tequila",
    "cocktail",
    "liqueur",
    "alcohol",
    "نبيذ",
    "بيرة",
    "كحول",
    "فودكا",
];

const BEVERAGES_EN: &[&str] = &[
    "juice",
    "smoothie",
    "tea",
    "coffee",
    "water",
    "milk",
    "milkshake",
    "shake",
    "lemonade",
    "latte",
    "infusion",
    "drink",
    "soda",
    "kefir",
    "lassi",
    "tonic",
    "brew",
];

const BEVERAGES_AR: &[&str] = &[
    "عصير",
    "سموذي",
    "شاي",
    "قهوة",
    "ماء",
    "مياه",
    "حليب",
    "لبن",
    "مشروب",
    "ليموناضة",
    "كركديه",
    "ميلك شيك",
    "منقوع",
    "شراب",
];

/// Keywords that reject a batch of the given kind for the given locale.
pub fn forbidden_keywords(kind: SuggestionKind, locale: Locale) -> Vec<&'static str> {
    match kind {
        SuggestionKind::Meal => {
            let mut terms = LUXURY_TERMS.to_vec();
            if locale.is_arabic() {
                terms.extend_from_slice(HALAL_RESTRICTED_TERMS);
            }
            terms
        }
        SuggestionKind::Drink => ALCOHOLIC_TERMS.to_vec(),
    }
}

/// Whole-word, case-insensitive match over the English beverage set, with
/// an optional plural `s`. Keeps "tea" from matching "steak".
static ENGLISH_BEVERAGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternatives = BEVERAGES_EN
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})s?\b", alternatives)).ok()
});

/// Whether `text` names a beverage. Arabic names often keep English loan
/// words, so Arabic mode accepts both sets.
pub fn is_beverage(text: &str, locale: Locale) -> bool {
    let english = ENGLISH_BEVERAGE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text));
    match locale {
        Locale::English => english,
        Locale::Arabic => english || find_keyword(text, BEVERAGES_AR).is_some(),
    }
}

/// First keyword found in `text`, compared case-insensitively.
pub fn find_keyword<'a>(text: &str, keywords: &[&'a str]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    keywords.iter().copied().find(|k| haystack.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_add_halal_terms_for_arabic_meals_only() {
        let english = forbidden_keywords(SuggestionKind::Meal, Locale::English);
        let arabic = forbidden_keywords(SuggestionKind::Meal, Locale::Arabic);

        assert!(!english.contains(&"pork"));
        assert!(arabic.contains(&"pork"));
        assert!(arabic.contains(&"truffle"));
    }

    #[test]
    fn should_forbid_alcohol_in_drinks_for_every_locale() {
        assert!(forbidden_keywords(SuggestionKind::Drink, Locale::English).contains(&"vodka"));
        assert!(forbidden_keywords(SuggestionKind::Drink, Locale::Arabic).contains(&"vodka"));
    }

    #[test]
    fn should_match_keywords_case_insensitively() {
        assert_eq!(
            find_keyword("Black TRUFFLE pasta", LUXURY_TERMS),
            Some("truffle")
        );
        assert_eq!(find_keyword("Lentil soup", LUXURY_TERMS), None);
    }

    #[test]
    fn should_accept_arabic_and_english_beverages_in_arabic_mode() {
        assert!(is_beverage("عصير برتقال", Locale::Arabic));
        assert!(is_beverage("Smoothie", Locale::Arabic));
        assert!(!is_beverage("عصير", Locale::English));
    }

    #[test]
    fn should_match_english_beverages_as_whole_words_only() {
        assert!(is_beverage("Iced TEA with lemon", Locale::English));
        assert!(is_beverage("Two herbal teas", Locale::English));
        assert!(!is_beverage("Grilled steak, sear the steak in a pan", Locale::English));
        assert!(!is_beverage("Steamed broccoli instead of rice", Locale::English));
        assert!(!is_beverage("Watermelon salad with feta", Locale::English));
    }
}
