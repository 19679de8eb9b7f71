//! The minimal contract every manageable entity must satisfy.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier assigned by the persistence collaborator on first save.
pub type EntityId = i64;

/// A business record the generic engines can manage.
///
/// The identifier is absent before first persistence and immutable
/// afterwards. `field_names` enumerates the editable/renderable property
/// names of the entity's serialized shape; configuration builders check
/// every descriptor key against it so a typo fails at construction time
/// rather than producing an orphan control.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The identifier, if the entity has been persisted.
    fn id(&self) -> Option<EntityId>;

    /// The valid property names of this entity's serialized shape.
    fn field_names() -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        id: Option<EntityId>,
        name: String,
    }

    impl Entity for Widget {
        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn field_names() -> &'static [&'static str] {
            &["id", "name"]
        }
    }

    #[test]
    fn id_absent_before_persistence() {
        let w = Widget {
            id: None,
            name: "bolt".into(),
        };
        assert_eq!(w.id(), None);
    }

    #[test]
    fn field_names_enumerate_shape() {
        assert!(Widget::field_names().contains(&"name"));
        assert!(!Widget::field_names().contains(&"colour"));
    }
}
