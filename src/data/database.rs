//! The state database file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;

use super::app_state::AppStateStore;
use super::migrations;
use crate::util::database_path;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state database: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// An opened state database with its schema brought up to date.
pub struct Database {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open `path`, creating the file and its directory when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| DatabaseError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut conn = Connection::open(&path)?;
        migrations::run_migrations(&mut conn)?;
        tracing::debug!(path = %path.display(), "Opened state database");

        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data dir>/worldtimez.db`
    pub fn open_in_data_dir() -> Result<Self, DatabaseError> {
        Self::open(database_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key/value store over this database's connection.
    pub fn store(&self) -> AppStateStore {
        AppStateStore::new(Arc::clone(&self.conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StorageBackend;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.db");
        let db = Database::open(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
    }

    #[test]
    fn test_open_runs_migrations() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("state.db")).unwrap();

        let conn = db.conn.lock().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tables, vec!["app_state", "schema_migrations"]);
    }

    #[test]
    fn test_stores_share_one_connection() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("state.db")).unwrap();

        db.store().set("theme", "light").unwrap();
        assert_eq!(db.store().get("theme").unwrap().as_deref(), Some("light"));
    }
}
