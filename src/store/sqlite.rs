use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, ffi, params};

use super::Store;
use super::schema::{SCHEMA, SEED_GROUP, SEED_USER};
use crate::config::IdmConfig;
use crate::error::{Error, Result, StoreError};
use crate::types::*;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;

        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory store. Its contents vanish on close.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self::from_connection(conn))
    }

    pub fn open(config: &IdmConfig) -> Result<Self> {
        if config.is_in_memory() {
            return Self::in_memory();
        }

        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::from)?;
            }
        }

        let store = Self::new(&config.db_path)?;
        store.with_conn(|conn| Ok(conn.busy_timeout(config.busy_timeout())?))?;
        Ok(store)
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(|e| {
            tracing::warn!("Recovering poisoned identity store lock");
            e.into_inner()
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        f(conn)
    }

    /// Returns a guard to the underlying database connection, `None` once closed.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn()
    }

    pub fn is_closed(&self) -> bool {
        self.conn().is_none()
    }
}

fn extended_code(err: &rusqlite::Error) -> Option<std::ffi::c_int> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => Some(e.extended_code),
        _ => None,
    }
}

/// Tags constraint failures so callers can tell them from any other store error.
fn map_insert_error(err: rusqlite::Error) -> Error {
    match extended_code(&err) {
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => StoreError::UniqueViolation(err).into(),
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
            StoreError::ForeignKeyViolation(err).into()
        }
        _ => Error::from(err),
    }
}

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<Group> {
    Ok(Group::new(row.get::<_, String>(1)?, row.get(0)?))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User::new(row.get::<_, String>(1)?, row.get(0)?, row.get(2)?))
}

impl Store for SqliteStore {
    fn initialize(&self, admin_group: &str, admin_user: &str) -> Result<()> {
        let mut guard = self.conn();
        let conn = guard.as_mut().ok_or(StoreError::Closed)?;

        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        tx.execute(SEED_GROUP, params![INVALID_GID, INVALID_GROUP_NAME])?;
        tx.execute(SEED_GROUP, params![ADMIN_GID, admin_group])?;
        tx.execute(SEED_USER, params![ADMIN_UID, admin_user, ADMIN_GID])?;
        tx.commit()?;

        Ok(())
    }

    // Group operations

    fn create_group(&self, name: &str) -> Result<Gid> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("INSERT INTO groups (name) VALUES (?1)")?;
            stmt.insert(params![name]).map_err(map_insert_error)
        })
    }

    fn delete_group(&self, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("DELETE FROM groups WHERE name = ?1")?;
            let rows = stmt.execute(params![name])?;
            Ok(rows > 0)
        })
    }

    fn get_group(&self, gid: Gid) -> Result<Option<Group>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT gid, name FROM groups WHERE gid = ?1")?;
            stmt.query_row(params![gid], group_from_row)
                .optional()
                .map_err(Error::from)
        })
    }

    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT gid, name FROM groups WHERE name = ?1")?;
            stmt.query_row(params![name], group_from_row)
                .optional()
                .map_err(Error::from)
        })
    }

    fn list_groups(&self) -> Result<Vec<Group>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT gid, name FROM groups ORDER BY gid")?;
            let rows = stmt.query_map([], group_from_row)?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Error::from)
        })
    }

    // User operations

    fn create_user(&self, name: &str, gid: Gid) -> Result<Uid> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("INSERT INTO users (name, gid) VALUES (?1, ?2)")?;
            stmt.insert(params![name, gid]).map_err(map_insert_error)
        })
    }

    fn delete_user(&self, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("DELETE FROM users WHERE name = ?1")?;
            let rows = stmt.execute(params![name])?;
            Ok(rows > 0)
        })
    }

    fn get_user(&self, uid: Uid) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT uid, name, gid FROM users WHERE uid = ?1")?;
            stmt.query_row(params![uid], user_from_row)
                .optional()
                .map_err(Error::from)
        })
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare_cached("SELECT uid, name, gid FROM users WHERE name = ?1")?;
            stmt.query_row(params![name], user_from_row)
                .optional()
                .map_err(Error::from)
        })
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT uid, name, gid FROM users ORDER BY uid")?;
            let rows = stmt.query_map([], user_from_row)?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Error::from)
        })
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.conn();
        let conn = guard.take().ok_or(StoreError::Closed)?;

        if let Err((conn, e)) = conn.close() {
            *guard = Some(conn);
            return Err(Error::from(e));
        }
        Ok(())
    }
}
