use tracing::{debug, info, warn};

use super::{IdentityMgr, validate_name};
use crate::config::IdmConfig;
use crate::error::{Error, Result, StoreError};
use crate::store::{SqliteStore, Store};
use crate::types::*;

pub const TYPE_NAME: &str = "SQLiteIdm";

/// Identity manager backed by a relational store.
///
/// Every lookup goes to the store; nothing is cached apart from the
/// administrator identities, which are read once when the manager opens.
pub struct SqliteIdm<S: Store = SqliteStore> {
    store: S,
    admin_group: Group,
    admin_user: User,
}

impl SqliteIdm<SqliteStore> {
    /// Opens (creating if needed) the database named by `config` and bootstraps it.
    pub fn open(config: &IdmConfig) -> Result<Self> {
        config.validate()?;
        let store = SqliteStore::open(config)?;
        info!("Opened identity store at {}", config.db_path.display());
        Self::with_store(store, &config.admin_group, &config.admin_user)
    }

    /// A throwaway manager over a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::open(&IdmConfig::in_memory())
    }
}

impl<S: Store> SqliteIdm<S> {
    /// Bootstraps `store` and loads the administrator identities from it.
    /// When the store was bootstrapped earlier the persisted administrator names win.
    pub fn with_store(store: S, admin_group: &str, admin_user: &str) -> Result<Self> {
        validate_name(admin_group, "Group")?;
        validate_name(admin_user, "User")?;

        store.initialize(admin_group, admin_user)?;

        let group = store
            .get_group(ADMIN_GID)?
            .ok_or(Error::UnknownGroupId(ADMIN_GID))?;
        let user = store
            .get_user(ADMIN_UID)?
            .ok_or(Error::UnknownUserId(ADMIN_UID))?;

        if group.name() != admin_group || user.name() != admin_user {
            warn!(
                "Identity store already bootstrapped with administrator {}:{}, ignoring {}:{}",
                user.name(),
                group.name(),
                admin_user,
                admin_group
            );
        }

        Ok(Self {
            store,
            admin_group: group,
            admin_user: user,
        })
    }

    /// Returns true if `user` holds administrator privileges.
    #[must_use]
    pub fn is_admin(&self, user: &User) -> bool {
        user.is_admin()
    }

    /// All groups, sentinel rows included, ordered by gid.
    pub fn groups(&self) -> Result<Vec<Group>> {
        self.store.list_groups()
    }

    /// All users ordered by uid.
    pub fn users(&self) -> Result<Vec<User>> {
        self.store.list_users()
    }

    /// Releases the store. Every later call, including another `close`, fails with a store error.
    pub fn close(&self) -> Result<()> {
        self.store.close()?;
        info!("Closed identity store");
        Ok(())
    }
}

impl<S: Store> IdentityMgr for SqliteIdm<S> {
    fn admin_group(&self) -> &Group {
        &self.admin_group
    }

    fn admin_user(&self) -> &User {
        &self.admin_user
    }

    fn group_add(&self, name: &str) -> Result<Group> {
        validate_name(name, "Group")?;

        let gid = match self.store.create_group(name) {
            Ok(gid) => gid,
            Err(Error::Store(StoreError::UniqueViolation(_))) => {
                return Err(Error::GroupAlreadyExists(name.to_string()));
            }
            Err(e) => return Err(e),
        };

        debug!(group = name, gid, "Added group");
        Ok(Group::new(name, gid))
    }

    fn group_del(&self, name: &str) -> Result<()> {
        if !self.store.delete_group(name)? {
            return Err(Error::UnknownGroup(name.to_string()));
        }

        debug!(group = name, "Deleted group");
        Ok(())
    }

    fn lookup_group(&self, name: &str) -> Result<Group> {
        self.store
            .get_group_by_name(name)?
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    fn lookup_group_id(&self, gid: Gid) -> Result<Group> {
        self.store
            .get_group(gid)?
            .ok_or(Error::UnknownGroupId(gid))
    }

    // Resolving the group and inserting the user are two separate statements.
    // A group deleted in between makes the insert fail its foreign key, which
    // is reported like any other unknown group. No user row is written.
    fn user_add(&self, name: &str, group_name: &str) -> Result<User> {
        validate_name(name, "User")?;

        let group = self.lookup_group(group_name)?;

        let uid = match self.store.create_user(name, group.gid()) {
            Ok(uid) => uid,
            Err(Error::Store(StoreError::UniqueViolation(_))) => {
                return Err(Error::UserAlreadyExists(name.to_string()));
            }
            Err(Error::Store(StoreError::ForeignKeyViolation(_))) => {
                return Err(Error::UnknownGroup(group_name.to_string()));
            }
            Err(e) => return Err(e),
        };

        debug!(user = name, uid, gid = group.gid(), "Added user");
        Ok(User::new(name, uid, group.gid()))
    }

    fn user_del(&self, name: &str) -> Result<()> {
        if !self.store.delete_user(name)? {
            return Err(Error::UnknownUser(name.to_string()));
        }

        debug!(user = name, "Deleted user");
        Ok(())
    }

    fn lookup_user(&self, name: &str) -> Result<User> {
        self.store
            .get_user_by_name(name)?
            .ok_or_else(|| Error::UnknownUser(name.to_string()))
    }

    fn lookup_user_id(&self, uid: Uid) -> Result<User> {
        self.store.get_user(uid)?.ok_or(Error::UnknownUserId(uid))
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn features(&self) -> Features {
        Features::IDENTITY_MGR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idm() -> SqliteIdm {
        SqliteIdm::in_memory().unwrap()
    }

    /// Deletes `group` right before inserting any user, as a concurrent
    /// `group_del` landing between the group lookup and the insert would.
    struct GroupVanishes {
        inner: SqliteStore,
        group: &'static str,
    }

    impl Store for GroupVanishes {
        fn initialize(&self, admin_group: &str, admin_user: &str) -> Result<()> {
            self.inner.initialize(admin_group, admin_user)
        }
        fn create_group(&self, name: &str) -> Result<Gid> {
            self.inner.create_group(name)
        }
        fn delete_group(&self, name: &str) -> Result<bool> {
            self.inner.delete_group(name)
        }
        fn get_group(&self, gid: Gid) -> Result<Option<Group>> {
            self.inner.get_group(gid)
        }
        fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
            self.inner.get_group_by_name(name)
        }
        fn list_groups(&self) -> Result<Vec<Group>> {
            self.inner.list_groups()
        }
        fn create_user(&self, name: &str, gid: Gid) -> Result<Uid> {
            self.inner.delete_group(self.group)?;
            self.inner.create_user(name, gid)
        }
        fn delete_user(&self, name: &str) -> Result<bool> {
            self.inner.delete_user(name)
        }
        fn get_user(&self, uid: Uid) -> Result<Option<User>> {
            self.inner.get_user(uid)
        }
        fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
            self.inner.get_user_by_name(name)
        }
        fn list_users(&self) -> Result<Vec<User>> {
            self.inner.list_users()
        }
        fn close(&self) -> Result<()> {
            self.inner.close()
        }
    }

    #[test]
    fn test_user_add_when_group_deleted_mid_add() {
        let store = GroupVanishes {
            inner: SqliteStore::in_memory().unwrap(),
            group: "staff",
        };
        let idm = SqliteIdm::with_store(store, "root", "root").unwrap();
        idm.group_add("staff").unwrap();

        let err = idm.user_add("alice", "staff").unwrap_err();
        assert!(matches!(err, Error::UnknownGroup(ref n) if n == "staff"));
        assert!(matches!(idm.lookup_user("alice"), Err(Error::UnknownUser(_))));
        assert!(matches!(idm.lookup_group("staff"), Err(Error::UnknownGroup(_))));
        assert_eq!(idm.users().unwrap().len(), 1);
    }

    #[test]
    fn test_admin_identities() {
        let idm = idm();
        assert_eq!(idm.admin_group(), &Group::new("root", ADMIN_GID));
        assert_eq!(idm.admin_user(), &User::new("root", ADMIN_UID, ADMIN_GID));
        assert!(idm.is_admin(idm.admin_user()));
    }

    #[test]
    fn test_group_add_twice() {
        let idm = idm();
        let staff = idm.group_add("staff").unwrap();
        assert_ne!(staff.gid(), ADMIN_GID);
        assert_ne!(staff.gid(), INVALID_GID);

        let err = idm.group_add("staff").unwrap_err();
        assert!(matches!(err, Error::GroupAlreadyExists(ref n) if n == "staff"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_group_add_rejects_empty_name() {
        let idm = idm();
        assert!(matches!(idm.group_add(""), Err(Error::InvalidName(_))));
        assert!(matches!(idm.user_add("", "root"), Err(Error::InvalidName(_))));
    }

    #[test]
    fn test_group_del_unknown() {
        let idm = idm();
        let err = idm.group_del("nobody").unwrap_err();
        assert!(matches!(err, Error::UnknownGroup(ref n) if n == "nobody"));
        assert!(err.is_unknown());
    }

    #[test]
    fn test_user_add_unknown_group_creates_nothing() {
        let idm = idm();
        let err = idm.user_add("alice", "staff").unwrap_err();
        assert!(matches!(err, Error::UnknownGroup(ref n) if n == "staff"));
        assert!(matches!(idm.lookup_user("alice"), Err(Error::UnknownUser(_))));
    }

    #[test]
    fn test_user_add_twice() {
        let idm = idm();
        idm.group_add("staff").unwrap();
        idm.user_add("alice", "staff").unwrap();

        let err = idm.user_add("alice", "root").unwrap_err();
        assert!(matches!(err, Error::UserAlreadyExists(ref n) if n == "alice"));
    }

    #[test]
    fn test_user_in_admin_group_is_admin() {
        let idm = idm();
        let op = idm.user_add("operator", "root").unwrap();
        assert_ne!(op.uid(), ADMIN_UID);
        assert!(idm.is_admin(&op));
    }

    #[test]
    fn test_lookup_by_id_unknown() {
        let idm = idm();
        assert!(matches!(
            idm.lookup_group_id(99),
            Err(Error::UnknownGroupId(99))
        ));
        assert!(matches!(idm.lookup_user_id(99), Err(Error::UnknownUserId(99))));
    }

    #[test]
    fn test_descriptor() {
        let idm = idm();
        assert_eq!(idm.type_name(), "SQLiteIdm");
        assert_eq!(idm.features(), Features::IDENTITY_MGR);
        assert!(idm.has_feature(Features::IDENTITY_MGR));
        assert!(!idm.has_feature(Features::from_bits(1 << 7)));
    }

    #[test]
    fn test_operations_after_close() {
        let idm = idm();
        let admin = idm.admin_user().clone();
        idm.close().unwrap();

        assert!(matches!(
            idm.lookup_user("root"),
            Err(Error::Store(StoreError::Closed))
        ));
        assert!(matches!(
            idm.group_add("staff"),
            Err(Error::Store(StoreError::Closed))
        ));
        assert!(matches!(idm.close(), Err(Error::Store(StoreError::Closed))));

        // Snapshots outlive the store.
        assert_eq!(admin.name(), "root");
        assert_eq!(idm.admin_group().name(), "root");
    }
}
