use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::model::SuggestionKind;

/// Time-of-day slot a batch is generated for.
///
/// Meals and drinks use disjoint families of slots; a category is always
/// derived from the hour of the generation time and never edited by users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Category {
    /// Step function from hour-of-day (0-23) to category.
    ///
    /// Meals: 05-10 breakfast, 11-15 lunch, 16-17 snack, 18-21 dinner, otherwise snack.
    /// Drinks: 05-11 morning, 12-16 afternoon, 17-20 evening, otherwise night.
    pub fn for_hour(kind: SuggestionKind, hour: u32) -> Self {
        match kind {
            SuggestionKind::Meal => match hour {
                5..=10 => Category::Breakfast,
                11..=15 => Category::Lunch,
                16..=17 => Category::Snack,
                18..=21 => Category::Dinner,
                _ => Category::Snack,
            },
            SuggestionKind::Drink => match hour {
                5..=11 => Category::Morning,
                12..=16 => Category::Afternoon,
                17..=20 => Category::Evening,
                _ => Category::Night,
            },
        }
    }

    /// Category for a timestamp, using the hour in the timestamp's own zone.
    ///
    /// Both the cadence check and batch tagging go through here so they can
    /// never disagree on the slot.
    pub fn at<Tz: TimeZone>(kind: SuggestionKind, time: &DateTime<Tz>) -> Self {
        Self::for_hour(kind, time.hour())
    }

    pub fn kind(&self) -> SuggestionKind {
        match self {
            Category::Breakfast | Category::Lunch | Category::Snack | Category::Dinner => {
                SuggestionKind::Meal
            }
            Category::Morning | Category::Afternoon | Category::Evening | Category::Night => {
                SuggestionKind::Drink
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Breakfast => write!(f, "breakfast"),
            Category::Lunch => write!(f, "lunch"),
            Category::Snack => write!(f, "snack"),
            Category::Dinner => write!(f, "dinner"),
            Category::Morning => write!(f, "morning"),
            Category::Afternoon => write!(f, "afternoon"),
            Category::Evening => write!(f, "evening"),
            Category::Night => write!(f, "night"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Category::Breakfast),
            "lunch" => Ok(Category::Lunch),
            "snack" => Ok(Category::Snack),
            "dinner" => Ok(Category::Dinner),
            "morning" => Ok(Category::Morning),
            "afternoon" => Ok(Category::Afternoon),
            "evening" => Ok(Category::Evening),
            "night" => Ok(Category::Night),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}
