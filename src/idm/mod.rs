//! The identity manager contract consumed by file-system hosts, and its SQLite implementation.

mod sqlite;
mod validation;

pub use sqlite::SqliteIdm;
pub use validation::validate_name;

use crate::error::Result;
use crate::types::*;

/// IdentityMgr is the capability set a file-system host uses to resolve users and groups.
pub trait IdentityMgr: Send + Sync {
    /// The administrator group, as bootstrapped when the manager was opened.
    fn admin_group(&self) -> &Group;

    /// The administrator user, as bootstrapped when the manager was opened.
    fn admin_user(&self) -> &User;

    fn group_add(&self, name: &str) -> Result<Group>;
    fn group_del(&self, name: &str) -> Result<()>;
    fn lookup_group(&self, name: &str) -> Result<Group>;
    fn lookup_group_id(&self, gid: Gid) -> Result<Group>;

    /// Adds a user whose primary group is the existing group named `group_name`.
    fn user_add(&self, name: &str, group_name: &str) -> Result<User>;
    fn user_del(&self, name: &str) -> Result<()>;
    fn lookup_user(&self, name: &str) -> Result<User>;
    fn lookup_user_id(&self, uid: Uid) -> Result<User>;

    /// Short name of the implementation, for diagnostics.
    fn type_name(&self) -> &'static str;

    fn features(&self) -> Features;

    fn has_feature(&self, feature: Features) -> bool {
        self.features().contains(feature)
    }
}
