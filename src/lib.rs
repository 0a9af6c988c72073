//! Core library surface for the What to Eat? TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the SQLite-backed food store, the domain catalogs, the random
//! selector, and the interactive front end.
pub mod db;
pub mod models;
pub mod photos;
pub mod selector;
pub mod ui;

/// The persistence layer: the durable store plus its error and event types.
pub use db::{FoodStore, StoreError, StoreEvent};

/// The domain types other layers manipulate.
pub use models::{Food, Meal, NewFood, TimeBucket};

/// The random-pick component.
pub use selector::Selector;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
