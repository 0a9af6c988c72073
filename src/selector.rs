//! Random meal selection. Deliberately tiny: one uniform draw over the
//! current list plus the single piece of state the display layer needs, the
//! last-picked index.

use rand::Rng;

use crate::models::Food;

/// Picks a food uniformly at random and remembers which index it chose. The
/// stored index only changes on an explicit pick, never when the list
/// mutates, so after a delete it can point past the end of the list. Callers
/// must check it against the current length before indexing (see
/// `App::picked_food`).
#[derive(Debug, Default)]
pub struct Selector {
    selected: usize,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a fresh index uniformly from `[0, foods.len())`. An empty list
    /// yields `0`, which is a "no selection" sentinel rather than a valid
    /// index.
    pub fn pick(&mut self, foods: &[Food]) -> usize {
        self.selected = if foods.is_empty() {
            0
        } else {
            rand::thread_rng().gen_range(0..foods.len())
        };
        self.selected
    }

    /// Index chosen by the most recent pick.
    pub fn selected(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, TimeBucket};

    fn foods(count: usize) -> Vec<Food> {
        (0..count)
            .map(|i| Food {
                id: i as i64 + 1,
                name: format!("Food {i}"),
                meal: Meal::Lunch,
                prep_time: TimeBucket::Under5Mins,
                cook_time: TimeBucket::Under5Mins,
                photo: None,
            })
            .collect()
    }

    #[test]
    fn empty_list_yields_the_zero_sentinel() {
        let mut selector = Selector::new();
        assert_eq!(selector.pick(&[]), 0);
        assert_eq!(selector.selected(), 0);
    }

    #[test]
    fn picks_stay_in_bounds() {
        let mut selector = Selector::new();
        for len in 1..=8 {
            let foods = foods(len);
            for _ in 0..100 {
                assert!(selector.pick(&foods) < len);
            }
        }
    }

    #[test]
    fn pick_updates_the_stored_index() {
        let mut selector = Selector::new();
        let foods = foods(5);
        let picked = selector.pick(&foods);
        assert_eq!(selector.selected(), picked);
    }

    #[test]
    fn every_index_is_reachable() {
        // Probabilistic sanity check for uniformity: 1000 draws over four
        // entries miss an index with probability well under 1e-100.
        let mut selector = Selector::new();
        let foods = foods(4);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[selector.pick(&foods)] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
