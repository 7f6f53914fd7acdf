use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use retailgate_catalog::{Permission, Role};

/// The authorization snapshot of one user.
///
/// Derived fresh from the user record for every server request; never cached
/// across requests since role, status and override can change in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthContext {
    pub role: Role,
    pub active: bool,

    /// Per-user permission list. When present and non-empty it replaces the
    /// role defaults entirely; an empty list behaves like `None`.
    #[serde(default)]
    pub permission_override: Option<BTreeSet<Permission>>,
}

impl UserAuthContext {
    /// Active user relying on role defaults.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            active: true,
            permission_override: None,
        }
    }

    pub fn with_override<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        self.permission_override = Some(permissions.into_iter().collect());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The override list when it is in effect (present and non-empty).
    pub fn effective_override(&self) -> Option<&BTreeSet<Permission>> {
        self.permission_override
            .as_ref()
            .filter(|permissions| !permissions.is_empty())
    }

    pub fn allows(&self, permission: &str) -> bool {
        crate::resolve::allows(self, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_not_in_effect() {
        let ctx = UserAuthContext::new(Role::STAFF).with_override([]);
        assert_eq!(ctx.permission_override, Some(BTreeSet::new()));
        assert!(ctx.effective_override().is_none());
    }

    #[test]
    fn missing_override_field_deserializes_as_none() {
        let ctx: UserAuthContext =
            serde_json::from_str(r#"{ "role": "customer", "active": true }"#).unwrap();
        assert_eq!(ctx, UserAuthContext::new(Role::CUSTOMER));
    }

    #[test]
    fn override_deserializes_as_set() {
        let ctx: UserAuthContext = serde_json::from_str(
            r#"{ "role": "staff", "active": true, "permission_override": ["sales.delete", "sales.delete"] }"#,
        )
        .unwrap();
        assert_eq!(ctx.effective_override().map(|o| o.len()), Some(1));
    }
}
