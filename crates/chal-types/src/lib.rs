//! Foundation types for the challenge store.
//!
//! This crate defines the minimal shape every storable object must have.
//! Every other crate in the workspace depends on `chal-types`; it depends only
//! on `serde` and `thiserror`.
//!
//! # Key Types
//!
//! - [`EntityId`] -- Store-assigned integer identifier
//! - [`Entity`] -- Contract between a domain object and the entity store

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::TypeError;
pub use id::EntityId;
