//! Terminal front end split across logical submodules: `app` holds the state
//! machine and rendering, `forms` the add/confirm dialog state, `terminal`
//! the crossterm event loop, `helpers` the shared layout utilities.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
