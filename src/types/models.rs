use serde::{Deserialize, Serialize};

pub type Uid = i64;
pub type Gid = i64;

/// Gid of the placeholder group that users fall back to when their own group is removed.
pub const INVALID_GID: Gid = -1;
pub const INVALID_GROUP_NAME: &str = "invalid group";

pub const ADMIN_GID: Gid = 0;
pub const ADMIN_UID: Uid = 0;

/// A snapshot of a group row. Detached from the store it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    name: String,
    gid: Gid,
}

impl Group {
    pub fn new(name: impl Into<String>, gid: Gid) -> Self {
        Self {
            name: name.into(),
            gid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gid(&self) -> Gid {
        self.gid
    }
}

/// A snapshot of a user row. Detached from the store it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    uid: Uid,
    gid: Gid,
}

impl User {
    pub fn new(name: impl Into<String>, uid: Uid, gid: Gid) -> Self {
        Self {
            name: name.into(),
            uid,
            gid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Primary group of the user.
    pub fn gid(&self) -> Gid {
        self.gid
    }

    /// Returns true if the user has administrator privileges.
    /// Either an administrator uid or membership of the administrator group is enough.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.uid == ADMIN_UID || self.gid == ADMIN_GID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_is_uid_or_gid() {
        assert!(User::new("root", 0, 0).is_admin());
        assert!(User::new("operator", 42, 0).is_admin());
        assert!(User::new("toor", 0, 7).is_admin());
        assert!(!User::new("alice", 1000, 1000).is_admin());
        assert!(!User::new("orphan", 12, INVALID_GID).is_admin());
    }

    #[test]
    fn test_user_serializes_with_ids() {
        let user = User::new("alice", 3, 1);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["name"], "alice");
        assert_eq!(json["uid"], 3);
        assert_eq!(json["gid"], 1);
    }
}
