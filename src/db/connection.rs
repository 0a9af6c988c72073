use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use super::{FoodStore, StoreError};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".what-to-eat";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "foods.sqlite";

impl FoodStore {
    /// Ensure the database file exists, run lazy migrations, and return a
    /// live store. SQLite's default journal settings already flush each
    /// statement before `execute` returns, which is the durability the store
    /// contract asks for.
    pub fn open() -> Result<Self, StoreError> {
        let db_path = db_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::DataDir)?;
        }

        let conn = Connection::open(&db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn,
            listeners: Vec::new(),
        })
    }

    /// In-memory store used by the test suite; same schema, no file.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn,
            listeners: Vec::new(),
        })
    }
}

/// Create the `foods` table if this is a fresh database. AUTOINCREMENT keeps
/// deleted ids from ever being handed out again, which the rest of the app
/// relies on when treating ids as stable keys.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            meal TEXT NOT NULL,
            prep_time TEXT NOT NULL,
            cook_time TEXT NOT NULL,
            photo BLOB
        )",
        [],
    )?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::MissingHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
