use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use retailgate_core::Entity;

/// Keyed record store abstraction (persistence is an external collaborator).
pub trait EntityStore<E: Entity>: Send + Sync {
    fn get(&self, id: &E::Id) -> Option<E>;
    fn upsert(&self, entity: E);
    /// Insert a record that must not exist yet.
    ///
    /// The id check, the `clashes` check against every stored record and the
    /// insert happen atomically.
    fn insert_new(&self, entity: E, clashes: &dyn Fn(&E) -> bool) -> Result<(), InsertConflict>;
    fn remove(&self, id: &E::Id) -> Option<E>;
    /// All records, ordered by id.
    fn list(&self) -> Vec<E>;
}

/// Why [`EntityStore::insert_new`] refused a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertConflict {
    /// A record with the same id is already stored.
    Id,
    /// A stored record matched the `clashes` predicate.
    Unique,
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EntityStore<E> for InMemoryStore<E>
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Ord + Send + Sync + 'static,
{
    fn get(&self, id: &E::Id) -> Option<E> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn upsert(&self, entity: E) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(entity.id().clone(), entity);
        }
    }

    fn insert_new(&self, entity: E, clashes: &dyn Fn(&E) -> bool) -> Result<(), InsertConflict> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(entity.id()) {
            return Err(InsertConflict::Id);
        }
        if map.values().any(clashes) {
            return Err(InsertConflict::Unique);
        }
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn remove(&self, id: &E::Id) -> Option<E> {
        let mut map = self.inner.write().ok()?;
        map.remove(id)
    }

    fn list(&self) -> Vec<E> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut out: Vec<E> = map.values().cloned().collect();
        out.sort_by(|a, b| a.id().cmp(b.id()));
        out
    }
}
