//! Entity persistence for the challenge store.
//!
//! This crate implements a flat, single-directory key-value store keyed by
//! integer [`EntityId`](chal_types::EntityId). Each entity lives in its own
//! record file named after its ID; a single counter file holds the last ID
//! ever issued.
//!
//! # Storage Backends
//!
//! All backends implement the [`EntityStore`] trait:
//!
//! - [`FileEntityStore`] -- one record file per entity in a directory
//! - [`InMemoryEntityStore`] -- `HashMap`-based store for tests and embedding
//!
//! # On-disk Layout
//!
//! ```text
//! <dir>/iep.lock     last issued ID, one decimal line
//! <dir>/1.rec        {"format":1,"kind":"challenge","entity":{...}}\n
//! <dir>/2.rec
//! ```
//!
//! # Design Rules
//!
//! 1. IDs are allocated under an exclusive lock on the counter file and are
//!    never reused, even after deletion.
//! 2. A record exists if and only if its file exists; there is no index.
//! 3. `update` never creates a record and `create` never overwrites one.
//! 4. Precondition failures and storage failures are distinct error classes.
//! 5. No retries and no rollback. A crash mid-write may leave a truncated
//!    record, which `load` reports as a storage error.
//! 6. Concurrent `update`/`delete` of the same ID is not coordinated.

pub mod allocator;
pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use allocator::IdAllocator;
pub use codec::{Codec, JsonLinesCodec, RECORD_FORMAT};
pub use config::{open_store, StoreConfig, SyncMode};
pub use error::{ErrorClass, StoreError, StoreResult};
pub use file::FileEntityStore;
pub use memory::InMemoryEntityStore;
pub use traits::EntityStore;
