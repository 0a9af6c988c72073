use std::sync::mpsc::{self, Receiver};

use rusqlite::types::Type;
use rusqlite::{params, Row};

use crate::models::{Food, Meal, NewFood, TimeBucket};

use super::{FoodStore, StoreError, StoreEvent};

impl FoodStore {
    /// Append a new record, returning the hydrated struct so the caller can
    /// push it straight into the in-memory list. The INSERT is a single
    /// statement, so a failed write leaves nothing behind for `list` to see.
    pub fn add(&mut self, new: NewFood) -> Result<Food, StoreError> {
        self.conn.execute(
            "INSERT INTO foods (name, meal, prep_time, cook_time, photo)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.name,
                new.meal.label(),
                new.prep_time.label(),
                new.cook_time.label(),
                new.photo,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.notify(StoreEvent::Added(id));

        Ok(Food {
            id,
            name: new.name,
            meal: new.meal,
            prep_time: new.prep_time,
            cook_time: new.cook_time,
            photo: new.photo,
        })
    }

    /// Retrieve every food in insertion order. The query doubles as the
    /// single source of truth for how the list screen orders its rows.
    pub fn list(&self) -> Result<Vec<Food>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, meal, prep_time, cook_time, photo
             FROM foods ORDER BY id",
        )?;

        let foods = stmt
            .query_map([], food_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// Number of live records. Exposed so the display layer can tell whether
    /// a previously picked index still points inside the list.
    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Permanently delete a record. We surface an explicit error when zero
    /// rows are touched so the UI can show a friendly message instead of
    /// silently continuing.
    pub fn remove(&mut self, id: i64) -> Result<(), StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM foods WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(StoreError::NotFound { id });
        }

        self.notify(StoreEvent::Removed(id));
        Ok(())
    }

    /// Hand out a change-notification channel. The receiver sees one event
    /// per successful mutation, in operation order.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, dropping the ones whose
    /// receiver has gone away.
    fn notify(&mut self, event: StoreEvent) {
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }
}

/// Map a `foods` row back into the domain struct. Stored labels that no
/// longer match the catalog are reported as conversion failures so they
/// bubble up as persistence errors rather than turning into sentinel values.
fn food_from_row(row: &Row<'_>) -> rusqlite::Result<Food> {
    let meal: String = row.get(2)?;
    let prep_time: String = row.get(3)?;
    let cook_time: String = row.get(4)?;

    Ok(Food {
        id: row.get(0)?,
        name: row.get(1)?,
        meal: parse_label::<Meal>(&meal, 2)?,
        prep_time: parse_label::<TimeBucket>(&prep_time, 3)?,
        cook_time: parse_label::<TimeBucket>(&cook_time, 4)?,
        photo: row.get(5)?,
    })
}

fn parse_label<T>(label: &str, column: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = crate::models::UnknownLabel>,
{
    label
        .parse::<T>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> FoodStore {
        FoodStore::open_in_memory().expect("failed to create test store")
    }

    fn sample(name: &str) -> NewFood {
        NewFood {
            name: name.to_string(),
            meal: Meal::Dinner,
            prep_time: TimeBucket::Mins15To20,
            cook_time: TimeBucket::Mins25To30,
            photo: None,
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = test_store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn added_food_shows_up_in_list() {
        let mut store = test_store();
        store
            .add(NewFood {
                name: "Pancakes".to_string(),
                meal: Meal::Breakfast,
                prep_time: TimeBucket::Mins5To10,
                cook_time: TimeBucket::Mins10To15,
                photo: None,
            })
            .unwrap();

        let foods = store.list().unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Pancakes");
        assert_eq!(foods[0].meal, Meal::Breakfast);
        assert_eq!(foods[0].prep_time, TimeBucket::Mins5To10);
        assert_eq!(foods[0].cook_time, TimeBucket::Mins10To15);
    }

    #[test]
    fn ids_stay_unique_across_deletes() {
        let mut store = test_store();
        let first = store.add(sample("Curry")).unwrap();
        let second = store.add(sample("Stew")).unwrap();
        assert_ne!(first.id, second.id);

        // AUTOINCREMENT must not hand a deleted id back out.
        store.remove(second.id).unwrap();
        let third = store.add(sample("Soup")).unwrap();
        assert_ne!(third.id, second.id);
        assert_ne!(third.id, first.id);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = test_store();
        for name in ["Toast", "Salad", "Roast"] {
            store.add(sample(name)).unwrap();
        }

        let names: Vec<_> = store.list().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["Toast", "Salad", "Roast"]);

        // Repeated calls with no mutation return the same sequence.
        let again: Vec<_> = store.list().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, again);
    }

    #[test]
    fn removing_the_middle_record_keeps_relative_order() {
        let mut store = test_store();
        let _first = store.add(sample("Toast")).unwrap();
        let second = store.add(sample("Salad")).unwrap();
        let _third = store.add(sample("Roast")).unwrap();

        store.remove(second.id).unwrap();

        let foods = store.list().unwrap();
        assert_eq!(foods.len(), 2);
        assert!(foods.iter().all(|f| f.id != second.id));
        assert_eq!(foods[0].name, "Toast");
        assert_eq!(foods[1].name, "Roast");
    }

    #[test]
    fn removing_unknown_id_reports_not_found() {
        let mut store = test_store();
        store.add(sample("Curry")).unwrap();

        let err = store.remove(999).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 999 }));
        // The failed delete leaves the list untouched.
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn photo_blob_round_trips() {
        let mut store = test_store();
        let mut new = sample("Ramen");
        new.photo = Some(vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a]);
        store.add(new).unwrap();

        let foods = store.list().unwrap();
        assert_eq!(
            foods[0].photo.as_deref(),
            Some(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a][..])
        );
    }

    #[test]
    fn empty_name_is_accepted_as_a_degenerate_case() {
        // The form layer validates; the store itself does not reject.
        let mut store = test_store();
        store.add(sample("")).unwrap();
        assert_eq!(store.list().unwrap()[0].name, "");
    }

    #[test]
    fn subscribers_see_mutations_in_order() {
        let mut store = test_store();
        let events = store.subscribe();

        let food = store.add(sample("Curry")).unwrap();
        store.remove(food.id).unwrap();

        assert_eq!(events.try_recv().unwrap(), StoreEvent::Added(food.id));
        assert_eq!(events.try_recv().unwrap(), StoreEvent::Removed(food.id));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = test_store();
        drop(store.subscribe());
        let live = store.subscribe();

        let food = store.add(sample("Curry")).unwrap();
        assert_eq!(live.try_recv().unwrap(), StoreEvent::Added(food.id));
    }

    #[test]
    fn corrupt_labels_surface_as_persistence_errors() {
        let mut store = test_store();
        store.add(sample("Curry")).unwrap();
        store
            .conn
            .execute("UPDATE foods SET meal = '?'", [])
            .unwrap();

        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
    }
}
