use std::any::{Any, TypeId};

/// Registry key: the exact source and destination types of a conversion.
///
/// Only the [`TypeId`]s take part in equality and hashing, the names are kept
/// for error messages.
#[derive(Debug, Clone, Copy)]
pub struct TypePair {
    source: TypeId,
    source_name: &'static str,
    destination: TypeId,
    destination_name: &'static str,
}

impl TypePair {
    #[must_use]
    pub fn of<S, D>() -> Self
    where
        S: Any,
        D: Any,
    {
        Self {
            source: TypeId::of::<S>(),
            source_name: std::any::type_name::<S>(),
            destination: TypeId::of::<D>(),
            destination_name: std::any::type_name::<D>(),
        }
    }

    #[must_use]
    pub fn new(
        source: TypeId,
        source_name: &'static str,
        destination: TypeId,
        destination_name: &'static str,
    ) -> Self {
        Self {
            source,
            source_name,
            destination,
            destination_name,
        }
    }

    #[must_use]
    pub fn source(&self) -> TypeId {
        self.source
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    #[must_use]
    pub fn destination(&self) -> TypeId {
        self.destination
    }

    #[must_use]
    pub fn destination_name(&self) -> &'static str {
        self.destination_name
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.source == self.destination
    }
}

impl PartialEq for TypePair {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.destination == other.destination
    }
}

impl Eq for TypePair {}

impl std::hash::Hash for TypePair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
    }
}

impl std::fmt::Display for TypePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.source_name, self.destination_name)
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::TypePair;

    #[test]
    fn equality_ignores_names() {
        // arrange
        let pair = TypePair::of::<String, u8>();
        let renamed = TypePair::new(TypeId::of::<String>(), "a", TypeId::of::<u8>(), "b");

        // assert
        assert_eq!(pair, renamed);
    }

    #[test]
    fn direction_matters() {
        assert_ne!(TypePair::of::<String, u8>(), TypePair::of::<u8, String>());
    }

    #[test]
    fn wrapper_types_are_distinct() {
        assert_ne!(
            TypePair::of::<Vec<String>, String>(),
            TypePair::of::<Option<Vec<String>>, String>()
        );
        assert!(TypePair::of::<String, String>().is_identity());
    }
}
