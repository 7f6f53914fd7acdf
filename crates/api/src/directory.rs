//! User records as seen by the authorization layer.
//!
//! The persistence layer is an external collaborator; records here are only
//! what the identity provider needs to derive a [`UserAuthContext`].

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use retailgate_auth::UserAuthContext;
use retailgate_catalog::{self as catalog, Permission, Role};
use retailgate_core::{DomainError, DomainResult, Entity, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Custom permission list; replaces the role defaults when non-empty.
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

fn default_active() -> bool {
    true
}

impl Entity for UserRecord {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

impl UserRecord {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            display_name: display_name.into(),
            role,
            active: true,
            permissions: None,
        }
    }

    /// Snapshot for one authorization decision. Never cache the result.
    pub fn auth_context(&self) -> UserAuthContext {
        UserAuthContext {
            role: self.role.clone(),
            active: self.active,
            permission_override: self
                .permissions
                .as_ref()
                .map(|permissions| permissions.iter().cloned().collect()),
        }
    }

    /// Write-side checks: catalog role, catalog permissions, plausible email.
    ///
    /// Resolution itself tolerates anything; this keeps garbage out of records.
    pub fn validate(&self) -> DomainResult<()> {
        if self.display_name.trim().is_empty() {
            return Err(DomainError::validation("display_name must not be empty"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::validation(format!("invalid email '{}'", self.email)));
        }
        validate_access(&self.role, self.permissions.as_deref())
    }
}

pub fn validate_access(role: &Role, permissions: Option<&[Permission]>) -> DomainResult<()> {
    if !catalog::is_known_role(role) {
        return Err(DomainError::validation(format!("unknown role '{role}'")));
    }
    let unknown: Vec<&str> = permissions
        .unwrap_or_default()
        .iter()
        .map(Permission::as_str)
        .filter(|name| !catalog::is_known_permission(name))
        .collect();
    if !unknown.is_empty() {
        return Err(DomainError::validation(format!(
            "unknown permissions: {}",
            unknown.join(", ")
        )));
    }
    Ok(())
}

/// Load seed users from a JSON array file.
pub fn load_users(path: &Path) -> anyhow::Result<Vec<UserRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading users file {}", path.display()))?;
    let users: Vec<UserRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing users file {}", path.display()))?;
    for user in &users {
        user.validate()
            .with_context(|| format!("invalid user record '{}'", user.email))?;
    }
    Ok(users)
}
