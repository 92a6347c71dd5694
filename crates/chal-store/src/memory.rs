use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chal_types::{Entity, EntityId};

use crate::codec::{Codec, JsonLinesCodec};
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// In-memory, HashMap-based entity store.
///
/// Intended for tests and embedding. Records are held as codec-encoded bytes,
/// so entities go through the same encode/decode path as on disk, and IDs
/// follow the same rules: strictly increasing, never reused.
pub struct InMemoryEntityStore<C = JsonLinesCodec> {
    state: RwLock<MemoryState>,
    codec: C,
}

#[derive(Default)]
struct MemoryState {
    last_issued: u64,
    records: HashMap<EntityId, Vec<u8>>,
}

impl InMemoryEntityStore<JsonLinesCodec> {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::with_codec(JsonLinesCodec)
    }
}

impl<C> InMemoryEntityStore<C> {
    /// Create a new empty store encoding records with `codec`.
    pub fn with_codec(codec: C) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            codec,
        }
    }

    // Every mutation leaves the state consistent, so a poisoned lock is safe
    // to keep using.
    fn read_state(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.read_state().records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.read_state().records.is_empty()
    }

    /// The last ID issued, or `None` if nothing has been created yet.
    pub fn last_issued(&self) -> Option<EntityId> {
        let last = self.read_state().last_issued;
        (last > 0).then(|| EntityId::new(last))
    }

    /// Return a sorted list of all live IDs.
    pub fn all_ids(&self) -> Vec<EntityId> {
        let state = self.read_state();
        let mut ids: Vec<EntityId> = state.records.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryEntityStore<JsonLinesCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> EntityStore<E> for InMemoryEntityStore<C>
where
    E: Entity,
    C: Codec<E>,
{
    fn create(&self, entity: &mut E) -> StoreResult<EntityId> {
        let mut state = self.write_state();
        let id = EntityId::new(state.last_issued)
            .next()
            .ok_or(StoreError::IdSpaceExhausted)?;
        state.last_issued = id.get();

        entity.set_id(id);
        let bytes = self.codec.encode(entity)?;
        state.records.insert(id, bytes);
        Ok(id)
    }

    fn load(&self, id: EntityId) -> StoreResult<E> {
        let state = self.read_state();
        let bytes = state.records.get(&id).ok_or(StoreError::NotFound(id))?;
        self.codec.decode(bytes)
    }

    fn update(&self, entity: &E) -> StoreResult<()> {
        let id = entity.id().ok_or(StoreError::MissingId)?;
        let mut state = self.write_state();
        if id.get() > state.last_issued {
            return Err(StoreError::NotIssued(id));
        }
        if !state.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        let bytes = self.codec.encode(entity)?;
        state.records.insert(id, bytes);
        Ok(())
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let mut state = self.write_state();
        state
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn exists(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.read_state().records.contains_key(&id))
    }
}

impl<C> std::fmt::Debug for InMemoryEntityStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("InMemoryEntityStore")
            .field("record_count", &state.records.len())
            .field("last_issued", &state.last_issued)
            .finish()
    }
}
