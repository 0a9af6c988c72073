//! Binary entry point that glues the SQLite-backed food store to the TUI: we
//! bring up the database, hydrate the initial app state, and drive the
//! Ratatui event loop until the user exits.
use what_to_eat::{run_app, App, FoodStore};

/// Initialize persistence, load cached data, and launch the Ratatui event
/// loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let store = FoodStore::open()?;
    let mut app = App::new(store)?;
    run_app(&mut app)
}
