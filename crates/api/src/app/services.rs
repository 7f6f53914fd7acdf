//! Service wiring: record stores shared by the handlers.

use std::sync::Arc;

use retailgate_core::DomainError;

use crate::directory::{UserRecord, load_users};
use crate::inventory::InventoryItem;
use crate::store::{EntityStore, InMemoryStore, InsertConflict};

pub struct AppServices {
    pub users: Arc<dyn EntityStore<UserRecord>>,
    pub inventory: Arc<dyn EntityStore<InventoryItem>>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::<UserRecord>::new()),
            inventory: Arc::new(InMemoryStore::<InventoryItem>::new()),
        }
    }

    /// In-memory wiring seeded with users from `USERS_FILE` (if configured).
    pub fn from_config(config: &crate::config::ApiConfig) -> anyhow::Result<Self> {
        let services = Self::in_memory();
        if let Some(path) = &config.users_file {
            let users = load_users(path)?;
            tracing::info!(count = users.len(), path = %path.display(), "seeded user directory");
            for user in users {
                services.add_user(user)?;
            }
        }
        Ok(services)
    }

    /// Insert a new user. Ids and emails (case-insensitive) are unique; an
    /// existing record is never replaced.
    pub fn add_user(&self, user: UserRecord) -> Result<(), DomainError> {
        user.validate()?;
        let id = user.id;
        let email = user.email.clone();
        self.users
            .insert_new(user, &|existing| existing.email.eq_ignore_ascii_case(&email))
            .map_err(|conflict| match conflict {
                InsertConflict::Id => DomainError::conflict(format!("user id '{id}' already exists")),
                InsertConflict::Unique => {
                    DomainError::conflict(format!("email '{email}' already registered"))
                }
            })
    }

    /// Insert a new inventory item. Ids and SKUs are unique.
    pub fn add_item(&self, item: InventoryItem) -> Result<(), DomainError> {
        item.validate()?;
        let id = item.id;
        let sku = item.sku.clone();
        self.inventory
            .insert_new(item, &|existing| existing.sku == sku)
            .map_err(|conflict| match conflict {
                InsertConflict::Id => DomainError::conflict(format!("item id '{id}' already exists")),
                InsertConflict::Unique => DomainError::conflict(format!("sku '{sku}' already exists")),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use retailgate_catalog::Role;
    use retailgate_core::ItemId;

    use super::*;

    #[test]
    fn duplicate_email_is_a_conflict() {
        let services = AppServices::in_memory();
        services
            .add_user(UserRecord::new("ana@shop.test", "Ana", Role::STAFF))
            .unwrap();
        let err = services
            .add_user(UserRecord::new("ANA@shop.test", "Ana 2", Role::CUSTOMER))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn reused_id_does_not_replace_existing_user() {
        let services = AppServices::in_memory();
        let admin = UserRecord::new("admin@shop.test", "Admin", Role::ADMIN);
        services.add_user(admin.clone()).unwrap();

        let mut copy = UserRecord::new("customer@shop.test", "Customer", Role::CUSTOMER);
        copy.id = admin.id;
        let err = services.add_user(copy).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(services.users.get(&admin.id), Some(admin));
        assert_eq!(services.users.list().len(), 1);
    }

    #[test]
    fn concurrent_signups_with_same_email_store_one_user() {
        let services = AppServices::in_memory();
        let barrier = Barrier::new(8);

        let successes = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let (services, barrier) = (&services, &barrier);
                    scope.spawn(move || {
                        let user = UserRecord::new("dup@shop.test", format!("Dup {n}"), Role::CUSTOMER);
                        barrier.wait();
                        services.add_user(user).is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(successes, 1);
        assert_eq!(services.users.list().len(), 1);
    }

    #[test]
    fn reused_item_id_is_a_conflict() {
        let services = AppServices::in_memory();
        let first = InventoryItem {
            id: ItemId::new(),
            sku: "MUG-1".to_string(),
            name: "Mug".to_string(),
            quantity: 1,
            price_cents: 500,
        };
        services.add_item(first.clone()).unwrap();

        let mut second = first.clone();
        second.sku = "MUG-2".to_string();
        assert!(matches!(services.add_item(second), Err(DomainError::Conflict(_))));
        assert_eq!(services.inventory.get(&first.id), Some(first));
    }

    #[test]
    fn duplicate_sku_is_a_conflict() {
        let services = AppServices::in_memory();
        let item = |sku: &str| InventoryItem {
            id: ItemId::new(),
            sku: sku.to_string(),
            name: "Mug".to_string(),
            quantity: 1,
            price_cents: 500,
        };
        services.add_item(item("MUG-1")).unwrap();
        assert!(matches!(services.add_item(item("MUG-1")), Err(DomainError::Conflict(_))));
        services.add_item(item("MUG-2")).unwrap();
        assert_eq!(services.inventory.list().len(), 2);
    }
}
