use std::{
    any::{Any, TypeId},
    collections::{HashMap, HashSet},
};

use crate::{Error, Result};

use super::{Aggregate, FieldSource, Scope, TypePair};

/// Type-erased conversion rule bound to one [`TypePair`].
pub type ConversionFunc =
    Box<dyn Fn(&dyn Any, &mut dyn Any, &Scope<'_>) -> Result<()> + Send + Sync>;

type AsAggregate = fn(&mut dyn Any) -> Option<&mut dyn Aggregate>;

type AsFieldSource = fn(&dyn Any) -> Option<&dyn FieldSource>;

/*
 * ============================================================================
 * Aggregate Descriptor
 * ============================================================================
 */
/// How to view a type-erased value as a [`FieldSource`] or an [`Aggregate`].
#[derive(Clone, Copy)]
pub struct AggregateDescriptor {
    destination: Option<AsAggregate>,
    source: AsFieldSource,
    type_name: &'static str,
}

impl AggregateDescriptor {
    #[must_use]
    pub fn as_source<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn FieldSource> {
        (self.source)(value)
    }

    #[must_use]
    pub fn as_destination<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Aggregate> {
        self.destination.and_then(|destination| destination(value))
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for AggregateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateDescriptor")
            .field("type_name", &self.type_name)
            .field("destination", &self.destination.is_some())
            .finish_non_exhaustive()
    }
}

fn as_field_source<T: FieldSource>(value: &dyn Any) -> Option<&dyn FieldSource> {
    value
        .downcast_ref::<T>()
        .map(|value| value as &dyn FieldSource)
}

fn as_aggregate<T: Aggregate>(value: &mut dyn Any) -> Option<&mut dyn Aggregate> {
    value
        .downcast_mut::<T>()
        .map(|value| value as &mut dyn Aggregate)
}

/*
 * ============================================================================
 * Registry
 * ============================================================================
 */
/// Conversion rules keyed by exact [`TypePair`].
///
/// Populate it once, then hand it to a [`super::Converter`]. Registering a
/// pair that already has a rule replaces it.
#[derive(Default)]
pub struct Registry {
    aggregates: HashMap<TypeId, AggregateDescriptor>,
    funcs: HashMap<TypePair, ConversionFunc>,
    ignored: HashSet<TypePair>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S, D, F>(&mut self, func: F) -> &mut Self
    where
        S: Any,
        D: Any,
        F: Fn(&S, &mut D, &Scope<'_>) -> Result<()> + Send + Sync + 'static,
    {
        let pair = TypePair::of::<S, D>();

        let func: ConversionFunc = Box::new(
            move |source: &dyn Any, destination: &mut dyn Any, scope: &Scope<'_>| {
                let source = source.downcast_ref::<S>();
                let destination = destination.downcast_mut::<D>();
                match (source, destination) {
                    (Some(source), Some(destination)) => func(source, destination, scope),
                    _ => Err(Error::NoConversionPath {
                        source: std::any::type_name::<S>(),
                        destination: std::any::type_name::<D>(),
                        field: None,
                    }),
                }
            },
        );

        if self.funcs.insert(pair, func).is_some() {
            tracing::debug!(pair =% pair, "replaced conversion func");
        } else {
            tracing::trace!(pair =% pair, "registered conversion func");
        }

        self
    }

    /// Registers the element-wise `Vec<S>` to `Vec<D>` conversion.
    ///
    /// Each element goes through the converter on its own, so `S` and `D` must
    /// be identical or have a rule or aggregate at conversion time. The
    /// destination vector is replaced only when every element converted.
    pub fn register_slice<S, D>(&mut self) -> &mut Self
    where
        S: Any + Clone,
        D: Any + Default,
    {
        self.register(
            |source: &Vec<S>, destination: &mut Vec<D>, scope: &Scope<'_>| {
                let converted = source
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let mut element = D::default();
                        scope
                            .convert(item, &mut element)
                            .map(|()| element)
                            .map_err(|error| error.within(&index.to_string()))
                    })
                    .collect::<Result<Vec<D>>>()?;
                *destination = converted;
                Ok(())
            },
        )
    }

    /// Marks `(S, D)` as a conversion that succeeds without doing anything.
    ///
    /// Ignored pairs win over registered funcs.
    pub fn register_ignored<S, D>(&mut self) -> &mut Self
    where
        S: Any,
        D: Any,
    {
        let pair = TypePair::of::<S, D>();
        tracing::trace!(pair =% pair, "registered ignored conversion");
        self.ignored.insert(pair);
        self
    }

    /// Makes `T` available to the structural fallback as source and destination.
    pub fn add_aggregate<T: Aggregate>(&mut self) -> &mut Self {
        self.aggregates.insert(
            TypeId::of::<T>(),
            AggregateDescriptor {
                destination: Some(as_aggregate::<T>),
                source: as_field_source::<T>,
                type_name: std::any::type_name::<T>(),
            },
        );
        self
    }

    /// Makes `T` available to the structural fallback as a source only.
    pub fn add_field_source<T: FieldSource>(&mut self) -> &mut Self {
        self.aggregates
            .entry(TypeId::of::<T>())
            .or_insert(AggregateDescriptor {
                destination: None,
                source: as_field_source::<T>,
                type_name: std::any::type_name::<T>(),
            });
        self
    }

    #[must_use]
    pub fn lookup(&self, pair: &TypePair) -> Option<&ConversionFunc> {
        self.funcs.get(pair)
    }

    #[must_use]
    pub fn is_ignored(&self, pair: &TypePair) -> bool {
        self.ignored.contains(pair)
    }

    #[must_use]
    pub fn aggregate(&self, type_id: TypeId) -> Option<&AggregateDescriptor> {
        self.aggregates.get(&type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("aggregates", &self.aggregates.len())
            .field("funcs", &self.funcs.keys().collect::<Vec<_>>())
            .field("ignored", &self.ignored)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use crate::conversion::{Converter, TypePair};

    use super::Registry;

    #[test]
    fn lookup_finds_exact_pair_only() {
        // arrange
        let mut registry = Registry::new();
        registry.register(|source: &String, destination: &mut i64, _| {
            *destination = i64::try_from(source.len()).unwrap_or_default();
            Ok(())
        });

        // assert
        assert!(registry.lookup(&TypePair::of::<String, i64>()).is_some());
        assert!(registry.lookup(&TypePair::of::<i64, String>()).is_none());
        assert!(registry.lookup(&TypePair::of::<String, i32>()).is_none());
        assert_eq!(1, registry.len());
    }

    #[test]
    fn last_registration_wins() {
        // arrange
        let mut registry = Registry::new();
        registry.register(|_: &String, destination: &mut i64, _| {
            *destination = 1;
            Ok(())
        });
        registry.register(|_: &String, destination: &mut i64, _| {
            *destination = 2;
            Ok(())
        });
        let converter = Converter::new(registry);
        let mut destination = 0_i64;

        // act
        converter
            .convert(&String::new(), &mut destination, None)
            .unwrap();

        // assert
        assert_eq!(2, destination);
        assert_eq!(1, converter.registry().len());
    }

    #[test]
    fn field_source_keeps_existing_aggregate() {
        // arrange
        let mut registry = Registry::new();
        registry
            .add_aggregate::<crate::meta::DeleteOptions>()
            .add_field_source::<crate::meta::DeleteOptions>();
        let mut value = crate::meta::DeleteOptions::default();

        // act
        let descriptor = registry
            .aggregate(TypeId::of::<crate::meta::DeleteOptions>())
            .unwrap();

        // assert
        assert!(descriptor.as_destination(&mut value).is_some());
    }

    #[test]
    fn ignored_pairs_are_tracked() {
        // arrange
        let mut registry = Registry::new();

        // act
        registry.register_ignored::<String, i64>();

        // assert
        assert!(registry.is_ignored(&TypePair::of::<String, i64>()));
        assert!(!registry.is_ignored(&TypePair::of::<i64, String>()));
        assert!(registry.is_empty());
    }

    #[test]
    fn field_source_is_source_only() {
        // arrange
        let mut registry = Registry::new();
        registry.add_field_source::<std::collections::BTreeMap<String, String>>();

        // act
        let descriptor = registry
            .aggregate(TypeId::of::<std::collections::BTreeMap<String, String>>())
            .unwrap();

        // assert
        let mut value = std::collections::BTreeMap::<String, String>::new();
        assert!(descriptor.as_destination(&mut value).is_none());
        assert!(descriptor.as_source(&value).is_some());
    }
}
