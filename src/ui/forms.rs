use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Food, Meal, TimeBucket};

/// Form state for adding a food. The meal and duration fields hold enum
/// values directly, so there is no raw picker index to fall out of range of
/// the catalog.
#[derive(Clone)]
pub(crate) struct FoodForm {
    pub(crate) name: String,
    pub(crate) meal: Meal,
    pub(crate) prep_time: TimeBucket,
    pub(crate) cook_time: TimeBucket,
    pub(crate) photo_path: String,
    pub(crate) active: FoodField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the food form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum FoodField {
    Name,
    Meal,
    PrepTime,
    CookTime,
    Photo,
}

impl Default for FoodForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            meal: Meal::Breakfast,
            prep_time: TimeBucket::Under5Mins,
            cook_time: TimeBucket::Under5Mins,
            photo_path: String::new(),
            active: FoodField::Name,
            error: None,
        }
    }
}

impl FoodForm {
    /// Cycle focus across the five fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            FoodField::Name => FoodField::Meal,
            FoodField::Meal => FoodField::PrepTime,
            FoodField::PrepTime => FoodField::CookTime,
            FoodField::CookTime => FoodField::Photo,
            FoodField::Photo => FoodField::Name,
        };
    }

    /// Whether the active field takes typed characters (as opposed to the
    /// arrow-cycled pickers).
    pub(crate) fn active_is_text(&self) -> bool {
        matches!(self.active, FoodField::Name | FoodField::Photo)
    }

    /// Insert a character into the active text field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            FoodField::Name => self.name.push(ch),
            FoodField::Photo => self.photo_path.push(ch),
            _ => return false,
        }
        true
    }

    /// Remove a character from the active text field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            FoodField::Name => {
                self.name.pop();
            }
            FoodField::Photo => {
                self.photo_path.pop();
            }
            _ => {}
        }
    }

    /// Step the active picker field forward or backward through its catalog,
    /// wrapping at either end.
    pub(crate) fn cycle_option(&mut self, delta: isize) {
        match self.active {
            FoodField::Meal => self.meal = cycled(&Meal::ALL, self.meal, delta),
            FoodField::PrepTime => self.prep_time = cycled(&TimeBucket::ALL, self.prep_time, delta),
            FoodField::CookTime => self.cook_time = cycled(&TimeBucket::ALL, self.cook_time, delta),
            _ => {}
        }
    }

    /// Validate and normalize the text inputs before anything is written to
    /// the database. The picker fields are always valid by construction.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Food name is required."));
        }
        Ok((name.to_string(), self.photo_path.trim().to_string()))
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: FoodField) -> Line<'static> {
        let is_active = self.active == field;

        let (display, is_empty) = match field {
            FoodField::Name => (self.name.clone(), self.name.is_empty()),
            FoodField::Photo => (self.photo_path.clone(), self.photo_path.is_empty()),
            FoodField::Meal => (format!("< {} >", self.meal), false),
            FoodField::PrepTime => (format!("< {} >", self.prep_time), false),
            FoodField::CookTime => (format!("< {} >", self.cook_time), false),
        };

        let placeholder = match field {
            FoodField::Name => "<required>",
            FoodField::Photo => "<optional file path>",
            _ => "",
        };

        let display = if is_empty {
            placeholder.to_string()
        } else {
            display
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested text field, used to place the cursor.
    pub(crate) fn value_len(&self, field: FoodField) -> usize {
        match field {
            FoodField::Name => self.name.chars().count(),
            FoodField::Photo => self.photo_path.chars().count(),
            _ => 0,
        }
    }
}

/// Step `current` through `all` by `delta`, wrapping around.
fn cycled<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let position = all
        .iter()
        .position(|candidate| *candidate == current)
        .unwrap_or(0) as isize;
    let next = (position + delta).rem_euclid(len);
    all[next as usize]
}

/// State for confirming permanent food deletion.
#[derive(Clone)]
pub(crate) struct ConfirmFoodDelete {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl ConfirmFoodDelete {
    /// Build the confirmation state from the food being considered.
    pub(crate) fn from(food: &Food) -> Self {
        Self {
            id: food.id,
            name: food.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_an_empty_name() {
        let form = FoodForm::default();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn parse_trims_whitespace() {
        let form = FoodForm {
            name: "  Pancakes  ".to_string(),
            photo_path: " /tmp/p.png ".to_string(),
            ..FoodForm::default()
        };
        let (name, photo) = form.parse_inputs().unwrap();
        assert_eq!(name, "Pancakes");
        assert_eq!(photo, "/tmp/p.png");
    }

    #[test]
    fn meal_picker_wraps_both_ways() {
        let mut form = FoodForm {
            active: FoodField::Meal,
            ..FoodForm::default()
        };
        form.cycle_option(-1);
        assert_eq!(form.meal, Meal::Dinner);
        form.cycle_option(1);
        assert_eq!(form.meal, Meal::Breakfast);
    }

    #[test]
    fn bucket_picker_walks_the_catalog_in_order() {
        let mut form = FoodForm {
            active: FoodField::PrepTime,
            ..FoodForm::default()
        };
        form.cycle_option(1);
        assert_eq!(form.prep_time, TimeBucket::Mins5To10);
        form.cycle_option(-2);
        assert_eq!(form.prep_time, TimeBucket::Over2Hours);
    }

    #[test]
    fn typed_characters_only_reach_text_fields() {
        let mut form = FoodForm {
            active: FoodField::Meal,
            ..FoodForm::default()
        };
        assert!(!form.push_char('x'));
        form.active = FoodField::Name;
        assert!(form.push_char('x'));
        assert_eq!(form.name, "x");
    }
}
