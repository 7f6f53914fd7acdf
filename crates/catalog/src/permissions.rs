use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "inventory.create"). The dotted
/// `resource.action` shape is a naming convention only; resolution compares
/// whole strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading segment of the dotted name (`"sales"` for `"sales.view"`).
    pub fn namespace(&self) -> &str {
        self.as_str().split('.').next().unwrap_or_default()
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const PRODUCTS_VIEW: Permission = Permission::from_static("products.view");
pub const PRODUCTS_CREATE: Permission = Permission::from_static("products.create");
pub const PRODUCTS_UPDATE: Permission = Permission::from_static("products.update");
pub const PRODUCTS_DELETE: Permission = Permission::from_static("products.delete");

pub const INVENTORY_VIEW: Permission = Permission::from_static("inventory.view");
pub const INVENTORY_CREATE: Permission = Permission::from_static("inventory.create");
pub const INVENTORY_UPDATE: Permission = Permission::from_static("inventory.update");
pub const INVENTORY_DELETE: Permission = Permission::from_static("inventory.delete");

pub const SALES_VIEW: Permission = Permission::from_static("sales.view");
pub const SALES_CREATE: Permission = Permission::from_static("sales.create");
pub const SALES_DELETE: Permission = Permission::from_static("sales.delete");

pub const ORDERS_VIEW: Permission = Permission::from_static("orders.view");
pub const ORDERS_CREATE: Permission = Permission::from_static("orders.create");
pub const ORDERS_UPDATE: Permission = Permission::from_static("orders.update");
pub const ORDERS_CANCEL: Permission = Permission::from_static("orders.cancel");

pub const SHIPPING_VIEW: Permission = Permission::from_static("shipping.view");
pub const SHIPPING_UPDATE: Permission = Permission::from_static("shipping.update");

pub const USERS_VIEW: Permission = Permission::from_static("usuarios.view");
pub const USERS_CREATE: Permission = Permission::from_static("usuarios.create");
pub const USERS_UPDATE: Permission = Permission::from_static("usuarios.update");
pub const USERS_DELETE: Permission = Permission::from_static("usuarios.delete");

pub const REPORTS_VIEW: Permission = Permission::from_static("reports.view");
pub const CHAT_MANAGE: Permission = Permission::from_static("chat.manage");
