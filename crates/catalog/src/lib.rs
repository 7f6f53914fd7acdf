//! `retailgate-catalog`: the permission catalog and role defaults.
//!
//! Leaf crate shared by the server engine and the client mirror. Everything
//! here is `'static` data compiled into the binary; changing a role's defaults
//! means shipping a new release, never a database write.

pub mod catalog;
pub mod permissions;
pub mod roles;

pub use catalog::{
    CATALOG_VERSION, CatalogError, PermissionEntry, RoleEntry, defaults_for, is_known_permission,
    is_known_role, list_all, lookup, roles, validate,
};
pub use permissions::Permission;
pub use roles::Role;
