//! Minimal inventory records used by the protected inventory endpoints.

use serde::{Deserialize, Serialize};

use retailgate_core::{DomainError, DomainResult, Entity, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub price_cents: u64,
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl InventoryItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("sku must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity must not be negative"));
        }
        Ok(())
    }
}
