use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier.
///
/// The catalog defines a closed set of roles, but values arriving from user
/// records or the wire are kept as opaque strings so that a role this build
/// does not know about is still representable. Such a role has no defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Universal bypass role; never enumerated in the defaults table.
    pub const ADMIN: Role = Role::from_static("admin");
    pub const STAFF: Role = Role::from_static("staff");
    pub const CUSTOMER: Role = Role::from_static("customer");

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str() == "admin"
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_detected_by_name() {
        assert!(Role::ADMIN.is_admin());
        assert!(Role::new("admin".to_string()).is_admin());
        assert!(!Role::new("Admin").is_admin());
        assert!(!Role::STAFF.is_admin());
    }
}
