//! # sqlidm
//!
//! An identity manager for virtual file systems: users and groups persisted in SQLite,
//! so that ownership survives restarts and can be shared between processes.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! sqlidm = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use sqlidm::config::IdmConfig;
//! use sqlidm::idm::{IdentityMgr, SqliteIdm};
//!
//! let idm = SqliteIdm::open(&IdmConfig::default())?;
//! let staff = idm.group_add("staff")?;
//! let alice = idm.user_add("alice", "staff")?;
//! assert_eq!(alice.gid(), staff.gid());
//! assert!(idm.admin_user().is_admin());
//! idm.close()?;
//! ```
//!
//! ## Bootstrap
//!
//! Opening a store creates the `groups` and `users` tables when missing and seeds
//! the administrator group and user (id 0) together with the placeholder
//! "invalid group" (gid -1). Users whose group is deleted fall back to gid -1.
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `sqlidm` admin binary. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod idm;
pub mod store;
pub mod types;

pub use error::{Error, Result, StoreError};
pub use idm::{IdentityMgr, SqliteIdm};
pub use types::{Features, Gid, Group, Uid, User};
