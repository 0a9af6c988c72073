//! Persistence module split across logical submodules. `connection` owns
//! opening the SQLite file and creating the schema, `foods` carries the
//! record operations. The store type itself lives here so both halves can
//! share its internals.

use std::sync::mpsc::Sender;

use rusqlite::Connection;
use thiserror::Error;

mod connection;
mod foods;

/// Failures the store can surface. Callers either retry the operation or show
/// the message in the footer; nothing here is fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file path could not be resolved because no home directory
    /// exists for the current user.
    #[error("could not locate home directory")]
    MissingHomeDir,
    /// Creating the directory that holds the database file failed.
    #[error("failed to create data directory")]
    DataDir(#[source] std::io::Error),
    /// The underlying durable read or write failed. Also covers rows whose
    /// stored labels no longer match the catalog.
    #[error("persistence operation failed")]
    Persistence(#[from] rusqlite::Error),
    /// A delete referenced an id that is not in the store.
    #[error("no food with id {id}")]
    NotFound { id: i64 },
}

/// Change notification emitted after every successful mutation, carrying the
/// id of the affected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(i64),
    Removed(i64),
}

/// Durable collection of food records backed by an embedded SQLite database.
/// Owns the connection plus the list of live change subscribers.
pub struct FoodStore {
    conn: Connection,
    listeners: Vec<Sender<StoreEvent>>,
}
