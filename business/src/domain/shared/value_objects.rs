use serde::{Deserialize, Serialize};

/// Identifier of the account whose suggestions are being generated.
/// Every persisted key is scoped by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Interface language. Decides the script human-readable fields must use
/// and which keyword sets apply during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

impl Locale {
    /// Parses a BCP 47-ish language tag (`ar`, `ar-SA`, `en_GB`).
    /// Anything that is not Arabic falls back to English.
    pub fn from_language_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        match primary.as_str() {
            "ar" => Locale::Arabic,
            _ => Locale::English,
        }
    }

    pub fn is_arabic(&self) -> bool {
        matches!(self, Locale::Arabic)
    }

    pub fn language_tag(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_user_id_as_str() {
        let user_id = UserId::new("uid-123");
        assert_eq!(user_id.as_str(), "uid-123");
        assert_eq!(format!("{}", user_id), "uid-123");
    }

    #[test]
    fn should_parse_arabic_regional_tags() {
        assert_eq!(Locale::from_language_tag("ar"), Locale::Arabic);
        assert_eq!(Locale::from_language_tag("ar-SA"), Locale::Arabic);
        assert_eq!(Locale::from_language_tag("AR_eg"), Locale::Arabic);
    }

    #[test]
    fn should_fall_back_to_english_when_tag_is_unknown() {
        assert_eq!(Locale::from_language_tag("fr"), Locale::English);
        assert_eq!(Locale::from_language_tag(""), Locale::English);
        assert_eq!(Locale::from_language_tag("en-US"), Locale::English);
    }
}
