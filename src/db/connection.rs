//! Database connection management.

use crate::db::schema::Schema;
use crate::error::{Error, Result};
use log::{debug, info};
use rusqlite::{Connection as SqliteConnection, OpenFlags, MAIN_DB};
use std::path::{Path, PathBuf};

/// Path to the contact book database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    path: PathBuf,
}

impl DbPath {
    /// Default database file name, relative to the working directory.
    pub const DEFAULT_FILE: &'static str = "contacts.sqlite";

    /// Create a new DbPath with the default filename.
    pub fn default_path() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_FILE),
        }
    }

    /// Create a DbPath from a path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path as a reference.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// Open database handle with the contacts table in place.
///
/// The underlying SQLite connection is closed when the handle is dropped.
pub struct Connection {
    conn: SqliteConnection,
}

impl Connection {
    /// Open or create the database at `path` and make sure the contacts
    /// table exists.
    ///
    /// Failing to open the file for writing yields [`Error::Connection`]
    /// with the driver's diagnostic; the schema is not touched in that case.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Self::connect(path)?;
        info!("opened contact database {}", path.display());

        let mut handle = Self { conn };
        Schema::init(&mut handle).map_err(|e| Error::Connection(e.to_string()))?;
        Ok(handle)
    }

    /// Open the database at the given [`DbPath`].
    pub fn open_path(path: &DbPath) -> Result<Self> {
        Self::open(path.as_path())
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            SqliteConnection::open_in_memory().map_err(|e| Error::Connection(e.to_string()))?;
        let mut handle = Self { conn };
        Schema::init(&mut handle)?;
        Ok(handle)
    }

    fn connect(path: &Path) -> Result<SqliteConnection> {
        let connection_error = |e: rusqlite::Error| Error::Connection(e.to_string());
        let conn = SqliteConnection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connection_error)?;
        // SQLite defers reading the file until the first statement; force it
        // here so an unusable path fails as part of opening.
        let version: i64 = conn
            .query_row("PRAGMA schema_version", [], |r| r.get(0))
            .map_err(connection_error)?;
        debug!("schema_version {version} at {}", path.display());

        // A write-protected file is silently opened read-only.
        if conn.is_readonly(MAIN_DB).map_err(connection_error)? {
            return Err(Error::Connection(format!(
                "attempt to write a readonly database: {}",
                path.display()
            )));
        }
        Ok(conn)
    }

    /// Execute a statement and return the number of rows affected.
    pub fn execute(&mut self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<usize> {
        self.conn.execute(sql, params).map_err(Error::from)
    }

    /// Query a single row.
    pub fn query_row<T, F>(&mut self, sql: &str, params: &[&dyn rusqlite::ToSql], f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Row) -> rusqlite::Result<T>,
    {
        self.conn.query_row(sql, params, f).map_err(Error::from)
    }

    /// Query multiple rows.
    pub fn query<T, F>(
        &mut self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
        f: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&rusqlite::Row) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, f)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Check if a table exists.
    pub fn table_exists(&mut self, table_name: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?")?;
        Ok(stmt.exists([table_name])?)
    }

    /// Get the last inserted row id.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
