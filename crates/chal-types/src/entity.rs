use crate::id::EntityId;

/// A domain object eligible for persistence.
///
/// The store only needs three things from an entity: a stable kind tag for its
/// records, an optional identifier it can read and assign, and a name for
/// display. Everything else is payload, meaningful only to the codec.
///
/// An entity whose `id()` is `None` has never been persisted. Once the store
/// assigns an ID it does not change for the life of the record.
pub trait Entity {
    /// Record kind tag. Written into every record so that a record can only be
    /// decoded back into the concrete type that produced it.
    const KIND: &'static str;

    /// The store-assigned identifier, if any.
    fn id(&self) -> Option<EntityId>;

    /// Assign the identifier. Called by the store on `create`.
    fn set_id(&mut self, id: EntityId);

    /// Human-readable name, used only for display.
    fn name(&self) -> &str;

    /// Returns `true` if the store has assigned this entity an ID.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        id: Option<EntityId>,
        title: String,
    }

    impl Entity for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn set_id(&mut self, id: EntityId) {
            self.id = Some(id);
        }

        fn name(&self) -> &str {
            &self.title
        }
    }

    #[test]
    fn fresh_entity_is_not_persisted() {
        let note = Note { id: None, title: "draft".into() };
        assert!(!note.is_persisted());
        assert_eq!(note.name(), "draft");
    }

    #[test]
    fn assigned_id_marks_persisted() {
        let mut note = Note { id: None, title: "draft".into() };
        note.set_id(EntityId::new(3));
        assert!(note.is_persisted());
        assert_eq!(note.id(), Some(EntityId::new(3)));
    }
}
