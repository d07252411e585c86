use thiserror::Error;

use crate::types::{Gid, Uid};

#[derive(Debug, Error)]
pub enum Error {
    #[error("group: {0}: already exists")]
    GroupAlreadyExists(String),

    #[error("user: {0}: already exists")]
    UserAlreadyExists(String),

    #[error("group: unknown group {0}")]
    UnknownGroup(String),

    #[error("group: unknown groupid {0}")]
    UnknownGroupId(Gid),

    #[error("user: unknown user {0}")]
    UnknownUser(String),

    #[error("user: unknown userid {0}")]
    UnknownUserId(Uid),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for the duplicate-name outcomes of `group_add` and `user_add`.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::GroupAlreadyExists(_) | Self::UserAlreadyExists(_))
    }

    /// True for any failed lookup or delete of a missing identity.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(
            self,
            Self::UnknownGroup(_)
                | Self::UnknownGroupId(_)
                | Self::UnknownUser(_)
                | Self::UnknownUserId(_)
        )
    }
}

/// Failures raised by the underlying SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A `UNIQUE` constraint rejected an insert. The facade turns this into
    /// one of the `*AlreadyExists` errors.
    #[error("unique constraint violation: {0}")]
    UniqueViolation(rusqlite::Error),

    /// A `FOREIGN KEY` constraint rejected an insert: the referenced group is gone.
    #[error("foreign key constraint violation: {0}")]
    ForeignKeyViolation(rusqlite::Error),

    #[error("identity store is closed")]
    Closed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(StoreError::Database(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
