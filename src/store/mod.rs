mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the data access layer behind the identity manager.
///
/// Inserts report a duplicate name as `StoreError::UniqueViolation`;
/// deletes report whether a row was removed. Existence is never pre-checked.
pub trait Store: Send + Sync {
    /// Creates the schema and seeds the sentinel and administrator rows.
    /// Safe to run against an already initialized store.
    fn initialize(&self, admin_group: &str, admin_user: &str) -> Result<()>;

    // Group operations
    fn create_group(&self, name: &str) -> Result<Gid>;
    fn delete_group(&self, name: &str) -> Result<bool>;
    fn get_group(&self, gid: Gid) -> Result<Option<Group>>;
    fn get_group_by_name(&self, name: &str) -> Result<Option<Group>>;
    fn list_groups(&self) -> Result<Vec<Group>>;

    // User operations
    fn create_user(&self, name: &str, gid: Gid) -> Result<Uid>;
    fn delete_user(&self, name: &str) -> Result<bool>;
    fn get_user(&self, uid: Uid) -> Result<Option<User>>;
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;
    fn list_users(&self) -> Result<Vec<User>>;

    fn close(&self) -> Result<()>;
}
