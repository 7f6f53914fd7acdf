//! The permission catalog: every permission the system knows, with a label,
//! and the default permission set of each role.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::permissions::{self as p, Permission};
use crate::Role;

/// Bumped whenever a permission or a role default changes.
///
/// Clients compare it with the server's value to detect a stale mirror.
pub const CATALOG_VERSION: u32 = 1;

/// A catalog permission with its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    pub permission: Permission,
    pub label: &'static str,
}

/// A catalog role with its default permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleEntry {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    /// True for the admin bypass; `defaults` is then empty by construction.
    pub bypass: bool,
    pub defaults: &'static [Permission],
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("role '{role}' references unknown permission '{permission}'")]
    UnknownPermission { role: Role, permission: Permission },

    #[error("permission '{0}' is listed more than once")]
    DuplicatePermission(Permission),

    #[error("the admin role must not enumerate permissions")]
    AdminEnumerated,
}

macro_rules! entry {
    ($perm:expr, $label:literal) => {
        PermissionEntry {
            permission: $perm,
            label: $label,
        }
    };
}

static PERMISSIONS: &[PermissionEntry] = &[
    entry!(p::PRODUCTS_VIEW, "View products"),
    entry!(p::PRODUCTS_CREATE, "Create products"),
    entry!(p::PRODUCTS_UPDATE, "Edit products"),
    entry!(p::PRODUCTS_DELETE, "Delete products"),
    entry!(p::INVENTORY_VIEW, "View inventory"),
    entry!(p::INVENTORY_CREATE, "Add inventory items"),
    entry!(p::INVENTORY_UPDATE, "Adjust inventory items"),
    entry!(p::INVENTORY_DELETE, "Remove inventory items"),
    entry!(p::SALES_VIEW, "View sales"),
    entry!(p::SALES_CREATE, "Register sales"),
    entry!(p::SALES_DELETE, "Void sales"),
    entry!(p::ORDERS_VIEW, "View orders"),
    entry!(p::ORDERS_CREATE, "Place orders"),
    entry!(p::ORDERS_UPDATE, "Update order status"),
    entry!(p::ORDERS_CANCEL, "Cancel orders"),
    entry!(p::SHIPPING_VIEW, "View shipments"),
    entry!(p::SHIPPING_UPDATE, "Update shipments"),
    entry!(p::USERS_VIEW, "View users"),
    entry!(p::USERS_CREATE, "Create users"),
    entry!(p::USERS_UPDATE, "Edit user roles and permissions"),
    entry!(p::USERS_DELETE, "Delete users"),
    entry!(p::REPORTS_VIEW, "View reports"),
    entry!(p::CHAT_MANAGE, "Manage chat widget script"),
];

const STAFF_DEFAULTS: &[Permission] = &[
    p::PRODUCTS_VIEW,
    p::INVENTORY_VIEW,
    p::INVENTORY_CREATE,
    p::INVENTORY_UPDATE,
    p::SALES_VIEW,
    p::SALES_CREATE,
    p::ORDERS_VIEW,
    p::ORDERS_UPDATE,
    p::SHIPPING_VIEW,
    p::SHIPPING_UPDATE,
    p::REPORTS_VIEW,
];

const CUSTOMER_DEFAULTS: &[Permission] = &[
    p::PRODUCTS_VIEW,
    p::ORDERS_VIEW,
    p::ORDERS_CREATE,
    p::ORDERS_CANCEL,
    p::SHIPPING_VIEW,
];

static ROLES: &[RoleEntry] = &[
    RoleEntry {
        role: Role::ADMIN,
        label: "Administrator",
        description: "Full access; bypasses permission checks",
        bypass: true,
        defaults: &[],
    },
    RoleEntry {
        role: Role::STAFF,
        label: "Staff",
        description: "Store staff handling inventory, sales, orders and shipping",
        bypass: false,
        defaults: STAFF_DEFAULTS,
    },
    RoleEntry {
        role: Role::CUSTOMER,
        label: "Customer",
        description: "Shop customer placing and tracking orders",
        bypass: false,
        defaults: CUSTOMER_DEFAULTS,
    },
];

/// All catalog permissions, in display order.
pub fn list_all() -> &'static [PermissionEntry] {
    PERMISSIONS
}

/// All catalog roles, in display order.
pub fn roles() -> &'static [RoleEntry] {
    ROLES
}

/// Default permission set of `role` (membership only; order is irrelevant).
///
/// Unknown roles and the admin role yield the empty set. Admin access comes
/// from the bypass rule, not from this table.
pub fn defaults_for(role: &Role) -> &'static [Permission] {
    ROLES
        .iter()
        .find(|entry| entry.role == *role)
        .map(|entry| entry.defaults)
        .unwrap_or(&[])
}

pub fn lookup(name: &str) -> Option<&'static PermissionEntry> {
    PERMISSIONS.iter().find(|entry| entry.permission == name)
}

pub fn is_known_permission(name: &str) -> bool {
    lookup(name).is_some()
}

pub fn is_known_role(role: &Role) -> bool {
    ROLES.iter().any(|entry| entry.role == *role)
}

/// Check the static tables for internal consistency.
pub fn validate() -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for entry in PERMISSIONS {
        if !seen.insert(entry.permission.as_str()) {
            return Err(CatalogError::DuplicatePermission(entry.permission.clone()));
        }
    }

    for entry in ROLES {
        if entry.bypass && !entry.defaults.is_empty() {
            return Err(CatalogError::AdminEnumerated);
        }
        for permission in entry.defaults {
            if !seen.contains(permission.as_str()) {
                return Err(CatalogError::UnknownPermission {
                    role: entry.role.clone(),
                    permission: permission.clone(),
                });
            }
        }
    }

    Ok(())
}
