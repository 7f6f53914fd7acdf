//! Permission resolution.
//!
//! Four rules, evaluated in order; the first one that applies decides:
//!
//! 1. the admin role is granted everything (the `active` flag is not consulted);
//! 2. an inactive account is denied everything;
//! 3. a non-empty override list is the complete grant set;
//! 4. otherwise the role's catalog defaults are the grant set.
//!
//! - No IO
//! - No panics
//! - Total over all strings: unknown permissions resolve to `false`

use serde::Serialize;

use retailgate_catalog::{self as catalog, Permission, Role};

use crate::UserAuthContext;

/// Which rule decided a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    AdminBypass,
    InactiveAccount,
    OverrideGranted,
    OverrideDenied,
    RoleDefaultGranted,
    RoleDefaultDenied,
}

impl Decision {
    pub fn granted(self) -> bool {
        matches!(
            self,
            Decision::AdminBypass | Decision::OverrideGranted | Decision::RoleDefaultGranted
        )
    }
}

pub fn decide(ctx: &UserAuthContext, permission: &str) -> Decision {
    if ctx.role.is_admin() {
        return Decision::AdminBypass;
    }

    if !ctx.active {
        return Decision::InactiveAccount;
    }

    if let Some(granted) = ctx.effective_override() {
        return if granted.contains(permission) {
            Decision::OverrideGranted
        } else {
            Decision::OverrideDenied
        };
    }

    if catalog::defaults_for(&ctx.role).iter().any(|p| p == permission) {
        Decision::RoleDefaultGranted
    } else {
        Decision::RoleDefaultDenied
    }
}

pub fn allows(ctx: &UserAuthContext, permission: &str) -> bool {
    decide(ctx, permission).granted()
}

/// True iff at least one permission resolves true. Empty input is `false`.
pub fn allows_any<I>(ctx: &UserAuthContext, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    permissions
        .into_iter()
        .any(|permission| allows(ctx, permission.as_ref()))
}

/// True iff every permission resolves true. Empty input is `true`.
pub fn allows_all<I>(ctx: &UserAuthContext, permissions: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    permissions
        .into_iter()
        .all(|permission| allows(ctx, permission.as_ref()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why was this allowed/denied?" for the user the context belongs to.
/// It names the rule and the role but does not echo the override list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    pub required_permission: String,
    pub granted: bool,
    pub decision: Decision,
    pub reason: String,
    pub role: Role,
    pub active: bool,
    pub override_in_effect: bool,
    pub known_permission: bool,
    pub suggestions: Vec<String>,
}

pub fn explain(ctx: &UserAuthContext, permission: &str) -> AuthorizationExplanation {
    let decision = decide(ctx, permission);
    let known_permission = catalog::is_known_permission(permission);
    let role_default_grants = catalog::defaults_for(&ctx.role)
        .iter()
        .any(|p| p == permission);

    let reason = match decision {
        Decision::AdminBypass => format!("Role '{}' bypasses permission checks", ctx.role),
        Decision::InactiveAccount => "Account is inactive; every permission is denied".to_string(),
        Decision::OverrideGranted => format!("Custom permission list grants '{permission}'"),
        Decision::OverrideDenied => format!(
            "Custom permission list replaces the role defaults and does not include '{permission}'"
        ),
        Decision::RoleDefaultGranted => {
            format!("Role '{}' grants '{permission}' by default", ctx.role)
        }
        Decision::RoleDefaultDenied => {
            format!("Role '{}' does not grant '{permission}' by default", ctx.role)
        }
    };

    let mut suggestions = Vec::new();
    if !decision.granted() {
        if !known_permission {
            suggestions.push(format!("'{permission}' is not a catalog permission"));
        } else if decision == Decision::InactiveAccount {
            suggestions.push("Reactivate the account".to_string());
        } else {
            suggestions.push(format!("Add '{permission}' to the user's custom permission list"));
            if decision == Decision::OverrideDenied && role_default_grants {
                suggestions.push(format!(
                    "Clear the custom permission list to fall back to role '{}', which grants it",
                    ctx.role
                ));
            }
            let granting: Vec<&str> = roles_granting(permission);
            if !granting.is_empty() {
                suggestions.push(format!(
                    "Roles granting it by default: {}",
                    granting.join(", ")
                ));
            }
        }
    }

    AuthorizationExplanation {
        required_permission: permission.to_string(),
        granted: decision.granted(),
        decision,
        reason,
        role: ctx.role.clone(),
        active: ctx.active,
        override_in_effect: ctx.effective_override().is_some(),
        known_permission,
        suggestions,
    }
}

fn roles_granting(permission: &str) -> Vec<&'static str> {
    catalog::roles()
        .iter()
        .filter(|entry| entry.bypass || entry.defaults.iter().any(|p| p == permission))
        .map(|entry| entry.role.as_str())
        .collect()
}

/// Effective grant set for display: `None` means "everything" (admin bypass).
pub fn effective_permissions(ctx: &UserAuthContext) -> Option<Vec<Permission>> {
    if ctx.role.is_admin() {
        return None;
    }
    if !ctx.active {
        return Some(Vec::new());
    }
    match ctx.effective_override() {
        Some(granted) => Some(granted.iter().cloned().collect()),
        None => Some(catalog::defaults_for(&ctx.role).to_vec()),
    }
}
