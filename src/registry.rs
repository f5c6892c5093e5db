//! In-memory id → entity registry.
//!
//! Every entity id is handed out or accepted through [`Registry::insert`], so
//! the creation path and the load path share one counter.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::Entity;

/// How [`Registry::insert`] decides the entity's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Give the entity the next id from the counter.
    Assign,
    /// Keep the id already on the entity (used when loading from storage).
    PreserveGiven,
}

#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and return its id.
    ///
    /// With `PreserveGiven`, id `0` and ids already present are rejected and
    /// the counter moves past the given id. `u64::MAX` is never handed out or
    /// accepted, since the counter could not move past it.
    pub fn insert(&mut self, mut entity: T, policy: IdPolicy) -> Result<u64> {
        let id = match policy {
            IdPolicy::Assign => self.next_id,
            IdPolicy::PreserveGiven => entity.id(),
        };

        if id == 0 || self.entries.contains_key(&id) {
            return Err(Error::DuplicateId {
                entity: T::KIND,
                id,
            });
        }
        let Some(following) = id.checked_add(1) else {
            return Err(Error::IdExhausted {
                entity: T::KIND,
                id,
            });
        };

        entity.set_id(id);
        self.entries.insert(id, entity);
        self.next_id = self.next_id.max(following);
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id the next `Assign` insert will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}
