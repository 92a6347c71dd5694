use chal_types::{Entity, EntityId};

use crate::error::StoreResult;

/// Durable per-ID CRUD for entities of type `E`.
///
/// All implementations must satisfy these invariants:
/// - IDs are issued by the store, strictly increasing, and never reused.
/// - `create` always writes a new record; `update` only rewrites an existing
///   one; neither ever touches another entity's record.
/// - Precondition failures (`MissingId`, `NotIssued`, `NotFound`) are
///   reported as invalid-argument errors, never retried or swallowed.
/// - All I/O errors are propagated as storage errors.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Persist a new entity.
    ///
    /// Allocates the next ID, assigns it to `entity`, and writes the record.
    /// Returns the assigned ID. The entity is expected to be unpersisted; an
    /// existing ID is overwritten by the new one.
    fn create(&self, entity: &mut E) -> StoreResult<EntityId>;

    /// Load the entity stored under `id`.
    ///
    /// Returns `Err(NotFound)` if no record exists.
    fn load(&self, id: EntityId) -> StoreResult<E>;

    /// Overwrite the record of an already persisted entity.
    ///
    /// Fails with `MissingId` if the entity has no ID, `NotIssued` if its ID
    /// was never issued by this store, and `NotFound` if the record is gone.
    fn update(&self, entity: &E) -> StoreResult<()>;

    /// Delete the record stored under `id`. The ID is not recycled.
    fn delete(&self, id: EntityId) -> StoreResult<()>;

    /// Check whether a record exists for `id`.
    fn exists(&self, id: EntityId) -> StoreResult<bool>;
}
