//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic. The meal and
//! duration catalogs live here as closed enums so every layer (form pickers,
//! persistence, rendering) reads from the same source of truth instead of
//! translating raw indices by hand.

use std::fmt;
use std::str::FromStr;

/// Which meal of the day a food belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    /// Every category in the order the form's segmented picker shows them.
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Canonical label, used both for display and as the stored column value.
    pub fn label(self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Meal {
    type Err = UnknownLabel;

    /// Parse a stored label back into the enum. Only the canonical labels are
    /// accepted; anything else means the row was written by something other
    /// than this application.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Meal::ALL
            .into_iter()
            .find(|meal| meal.label() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// One of the fifteen human-readable duration ranges used for prep and cook
/// time. Stored as its label rather than raw minutes because the range is
/// what the user picked and what the UI shows back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Under5Mins,
    Mins5To10,
    Mins10To15,
    Mins15To20,
    Mins20To25,
    Mins25To30,
    Mins30To35,
    Mins35To40,
    Mins40To45,
    Mins45To50,
    Mins50To55,
    Mins55To60,
    Hours1To1Half,
    Hours1HalfTo2,
    Over2Hours,
}

impl TimeBucket {
    /// The full catalog in wheel-picker order, shortest first.
    pub const ALL: [TimeBucket; 15] = [
        TimeBucket::Under5Mins,
        TimeBucket::Mins5To10,
        TimeBucket::Mins10To15,
        TimeBucket::Mins15To20,
        TimeBucket::Mins20To25,
        TimeBucket::Mins25To30,
        TimeBucket::Mins30To35,
        TimeBucket::Mins35To40,
        TimeBucket::Mins40To45,
        TimeBucket::Mins45To50,
        TimeBucket::Mins50To55,
        TimeBucket::Mins55To60,
        TimeBucket::Hours1To1Half,
        TimeBucket::Hours1HalfTo2,
        TimeBucket::Over2Hours,
    ];

    /// Canonical label, used both for display and as the stored column value.
    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::Under5Mins => "Less than 5 mins",
            TimeBucket::Mins5To10 => "5-10 mins",
            TimeBucket::Mins10To15 => "10-15 mins",
            TimeBucket::Mins15To20 => "15-20 mins",
            TimeBucket::Mins20To25 => "20-25 mins",
            TimeBucket::Mins25To30 => "25-30 mins",
            TimeBucket::Mins30To35 => "30-35 mins",
            TimeBucket::Mins35To40 => "35-40 mins",
            TimeBucket::Mins40To45 => "40-45 mins",
            TimeBucket::Mins45To50 => "45-50 mins",
            TimeBucket::Mins50To55 => "50-55 mins",
            TimeBucket::Mins55To60 => "55-60 mins",
            TimeBucket::Hours1To1Half => "1-1.5 hours",
            TimeBucket::Hours1HalfTo2 => "1.5-2 hours",
            TimeBucket::Over2Hours => "More than 2 hours",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeBucket {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeBucket::ALL
            .into_iter()
            .find(|bucket| bucket.label() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Raised when a stored label matches no catalog entry. The store surfaces
/// this as a corrupt-row persistence failure instead of mapping it to a
/// sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("label {0:?} is not part of the catalog")]
pub struct UnknownLabel(pub String);

#[derive(Debug, Clone)]
/// In-memory representation of one recorded food. Mirrors a row in the
/// `foods` table.
pub struct Food {
    /// Primary key from the database. We keep this around even when the UI
    /// only needs display information because the delete flow bubbles the id
    /// back to the persistence layer.
    pub id: i64,
    /// User-facing display name.
    pub name: String,
    /// Breakfast, lunch, or dinner.
    pub meal: Meal,
    /// How long the dish takes to prepare.
    pub prep_time: TimeBucket,
    /// How long the dish takes to cook.
    pub cook_time: TimeBucket,
    /// Optional photo bytes stored inline with the row.
    pub photo: Option<Vec<u8>>,
}

impl Food {
    /// Compose the "5-10 mins to prepare." caption shown under the random
    /// pick.
    pub fn prep_caption(&self) -> String {
        format!("{} to prepare.", self.prep_time)
    }

    /// Matching caption for the cook time.
    pub fn cook_caption(&self) -> String {
        format!("{} to cook.", self.cook_time)
    }
}

/// Everything needed to create a food; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub meal: Meal,
    pub prep_time: TimeBucket,
    pub cook_time: TimeBucket,
    pub photo: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_catalog_has_fifteen_entries() {
        assert_eq!(TimeBucket::ALL.len(), 15);
        assert_eq!(TimeBucket::ALL[0].label(), "Less than 5 mins");
        assert_eq!(TimeBucket::ALL[14].label(), "More than 2 hours");
    }

    #[test]
    fn bucket_labels_round_trip() {
        for bucket in TimeBucket::ALL {
            assert_eq!(bucket.label().parse::<TimeBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn meal_labels_round_trip() {
        for meal in Meal::ALL {
            assert_eq!(meal.label().parse::<Meal>().unwrap(), meal);
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!("?".parse::<Meal>().is_err());
        assert!("Brunch".parse::<Meal>().is_err());
        assert!("about an hour".parse::<TimeBucket>().is_err());
    }

    #[test]
    fn captions_use_the_bucket_label() {
        let food = Food {
            id: 1,
            name: "Pancakes".to_string(),
            meal: Meal::Breakfast,
            prep_time: TimeBucket::Mins5To10,
            cook_time: TimeBucket::Mins10To15,
            photo: None,
        };
        assert_eq!(food.prep_caption(), "5-10 mins to prepare.");
        assert_eq!(food.cook_caption(), "10-15 mins to cook.");
    }
}
