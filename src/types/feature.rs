use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature represents a bitmask of capabilities a host can discover on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Features(u64);

impl Features {
    pub const NONE: Features = Features(0);
    pub const IDENTITY_MGR: Features = Features(1 << 0); // 1

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if every feature in `required` is present.
    #[must_use]
    pub const fn contains(self, required: Features) -> bool {
        self.0 & required.0 == required.0
    }

    #[must_use]
    pub const fn union(self, other: Features) -> Features {
        Features(self.0 | other.0)
    }

    #[must_use]
    pub fn to_strings(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::IDENTITY_MGR) {
            names.push("identity-mgr");
        }
        names
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join(", "))
    }
}
