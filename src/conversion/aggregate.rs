use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
};

/*
 * ============================================================================
 * Fields
 * ============================================================================
 */
/// A named, read-only view of one field of a [`FieldSource`].
pub struct FieldRef<'a> {
    name: &'a str,
    type_id: TypeId,
    type_name: &'static str,
    value: &'a dyn Any,
}

impl<'a> FieldRef<'a> {
    #[must_use]
    pub fn new<T: Any>(name: &'a str, value: &'a T) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn value(&self) -> &'a dyn Any {
        self.value
    }
}

/// A named, writable view of one field of an [`Aggregate`].
///
/// Carries a typed `assign` so that fields of identical source and
/// destination type can be copied without knowing the type statically.
pub struct FieldMut<'a> {
    assign: fn(&dyn Any, &mut dyn Any) -> bool,
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    value: &'a mut dyn Any,
}

impl<'a> FieldMut<'a> {
    #[must_use]
    pub fn new<T: Any + Clone>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            assign: assign::<T>,
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn value_mut(&mut self) -> &mut dyn Any {
        &mut *self.value
    }

    /// Clones `source` into the field. Returns `false` when `source` is not of
    /// the field's type.
    pub fn assign(&mut self, source: &dyn Any) -> bool {
        (self.assign)(source, &mut *self.value)
    }
}

/// Clones `source` into `destination` when both are a `T`.
pub(super) fn assign<T: Any + Clone>(source: &dyn Any, destination: &mut dyn Any) -> bool {
    match (source.downcast_ref::<T>(), destination.downcast_mut::<T>()) {
        (Some(source), Some(destination)) => {
            destination.clone_from(source);
            true
        }
        _ => false,
    }
}

/*
 * ============================================================================
 * Traits
 * ============================================================================
 */
/// Anything whose values can be looked up by field name or key.
pub trait FieldSource: Any {
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;
}

/// A struct-like value that enumerates its fields for the structural fallback.
///
/// Field names are the wire names (the names a query parameter or a map key
/// would use), not the Rust identifiers.
pub trait Aggregate: FieldSource {
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// Url-values shape: every key is a field holding the list of its values.
impl FieldSource for BTreeMap<String, Vec<String>> {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.get_key_value(name)
            .map(|(key, values)| FieldRef::new(key.as_str(), values))
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        self.get_key_value(name)
            .map(|(key, value)| FieldRef::new(key.as_str(), value))
    }
}
