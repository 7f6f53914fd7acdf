//! Client-side copy of the permission resolution rules.
//!
//! Kept separate from the server engine on purpose: the client ships without
//! the auth crate and only shares the static catalog with it. The parity tests
//! in `tests/parity.rs` hold the two implementations together.
//!
//! Rules, first match wins:
//! 1. `admin` allows everything, whatever the active flag says.
//! 2. an inactive account allows nothing.
//! 3. a non-empty custom list is the whole grant set.
//! 4. otherwise the role's catalog defaults apply.

use std::collections::HashSet;

use retailgate_catalog::{self as catalog, Permission, Role};

use crate::types::CurrentUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMirror {
    role: Role,
    active: bool,
    /// `Some` only for a non-empty custom list.
    custom: Option<HashSet<String>>,
}

impl PermissionMirror {
    pub fn new(role: Role, active: bool, permissions: Option<&[Permission]>) -> Self {
        let custom = permissions
            .filter(|list| !list.is_empty())
            .map(|list| list.iter().map(|p| p.as_str().to_string()).collect());
        Self {
            role,
            active,
            custom,
        }
    }

    pub fn from_user(user: &CurrentUser) -> Self {
        Self::new(user.role.clone(), user.active, user.permissions.as_deref())
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn allows(&self, permission: &str) -> bool {
        if self.role == Role::ADMIN {
            return true;
        }
        if !self.active {
            return false;
        }
        match &self.custom {
            Some(granted) => granted.contains(permission),
            None => catalog::defaults_for(&self.role)
                .iter()
                .any(|p| p.as_str() == permission),
        }
    }

    /// False for an empty input.
    pub fn allows_any<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for permission in permissions {
            if self.allows(permission.as_ref()) {
                return true;
            }
        }
        false
    }

    /// True for an empty input.
    pub fn allows_all<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for permission in permissions {
            if !self.allows(permission.as_ref()) {
                return false;
            }
        }
        true
    }
}
