use std::{any::Any, sync::Arc};

use crate::{Error, Result};

use super::{FieldMut, FieldSource, Registry, TypePair, aggregate::assign};

/*
 * ============================================================================
 * Meta
 * ============================================================================
 */
/// Optional, conversion-scoped data handed to every rule.
#[derive(Clone, Default)]
pub struct Meta {
    /// Opaque context; rules downcast it with [`Meta::context`].
    pub context: Option<Arc<dyn Any + Send + Sync>>,

    /// Maps a destination field name to the source key it is read from.
    pub key_name_mapping: Option<fn(&str) -> String>,
}

impl Meta {
    #[must_use]
    pub fn with_context<C: Any + Send + Sync>(context: C) -> Self {
        Self {
            context: Some(Arc::new(context)),
            key_name_mapping: None,
        }
    }

    #[must_use]
    pub fn context<C: Any>(&self) -> Option<&C> {
        self.context
            .as_deref()
            .and_then(|context| context.downcast_ref::<C>())
    }

    fn source_key(&self, name: &str) -> Option<String> {
        self.key_name_mapping.map(|mapping| mapping(name))
    }
}

impl std::fmt::Debug for Meta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Meta")
            .field("context", &self.context.is_some())
            .field("key_name_mapping", &self.key_name_mapping.is_some())
            .finish()
    }
}

/*
 * ============================================================================
 * Scope
 * ============================================================================
 */
/// What a running rule can see: the converter (for nested conversions) and
/// the caller's [`Meta`].
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    converter: &'a Converter,
    meta: Option<&'a Meta>,
}

impl<'a> Scope<'a> {
    /// Converts through the same converter and [`Meta`] as the running rule.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `source` could not be converted into `destination`.
    pub fn convert<S, D>(&self, source: &S, destination: &mut D) -> Result<()>
    where
        S: Any + Clone,
        D: Any,
    {
        self.converter.convert(source, destination, self.meta)
    }

    #[must_use]
    pub fn converter(&self) -> &'a Converter {
        self.converter
    }

    #[must_use]
    pub fn meta(&self) -> Option<&'a Meta> {
        self.meta
    }
}

/*
 * ============================================================================
 * Converter
 * ============================================================================
 */
/// Read-only conversion driver over a finished [`Registry`].
///
/// Resolution order for a pair: ignored, registered func, identical types,
/// structural fallback, then [`Error::NoConversionPath`].
#[derive(Debug, Default)]
pub struct Converter {
    registry: Registry,
}

impl Converter {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Converts `source` into the caller supplied `destination` in place.
    ///
    /// # Errors
    ///
    /// Will return `Err` if no rule bridges the two types, or if the rule
    /// reached fails. Fields converted before a failure keep their new values.
    pub fn convert<S: Any + Clone, D: Any>(
        &self,
        source: &S,
        destination: &mut D,
        meta: Option<&Meta>,
    ) -> Result<()> {
        self.convert_value(
            &TypePair::of::<S, D>(),
            source,
            Destination::Value {
                assign: assign::<S>,
                value: destination,
            },
            meta,
        )
    }

    fn convert_value(
        &self,
        pair: &TypePair,
        source: &dyn Any,
        mut destination: Destination<'_, '_>,
        meta: Option<&Meta>,
    ) -> Result<()> {
        if self.registry.is_ignored(pair) {
            tracing::trace!(pair =% pair, "ignored conversion");
            return Ok(());
        }

        if let Some(func) = self.registry.lookup(pair) {
            tracing::trace!(pair =% pair, "registered conversion");
            return func(
                source,
                destination.as_any(),
                &Scope {
                    converter: self,
                    meta,
                },
            );
        }

        if pair.is_identity() && destination.assign(source) {
            tracing::trace!(pair =% pair, "identity conversion");
            return Ok(());
        }

        let source_aggregate = self
            .registry
            .aggregate(pair.source())
            .and_then(|descriptor| descriptor.as_source(source));
        let destination_aggregate = self
            .registry
            .aggregate(pair.destination())
            .and_then(|descriptor| descriptor.as_destination(destination.as_any()));

        if let (Some(source), Some(destination)) = (source_aggregate, destination_aggregate) {
            tracing::trace!(pair =% pair, "structural conversion");
            return self.convert_fields(source, destination.fields_mut(), meta);
        }

        Err(Error::NoConversionPath {
            source: pair.source_name(),
            destination: pair.destination_name(),
            field: None,
        })
    }

    fn convert_fields(
        &self,
        source: &dyn FieldSource,
        fields: Vec<FieldMut<'_>>,
        meta: Option<&Meta>,
    ) -> Result<()> {
        for mut field in fields {
            let name = field.name();
            let key = meta
                .and_then(|meta| meta.source_key(name))
                .unwrap_or_else(|| name.to_string());

            let Some(source_field) = source.field(&key) else {
                continue;
            };

            let pair = TypePair::new(
                source_field.type_id(),
                source_field.type_name(),
                field.type_id(),
                field.type_name(),
            );

            self.convert_value(
                &pair,
                source_field.value(),
                Destination::Field(&mut field),
                meta,
            )
            .map_err(|error| error.within(name))?;
        }

        Ok(())
    }
}

/// Where a conversion writes, together with a clone of the source type for
/// identical pairs.
enum Destination<'a, 'f> {
    Field(&'a mut FieldMut<'f>),
    Value {
        assign: fn(&dyn Any, &mut dyn Any) -> bool,
        value: &'a mut dyn Any,
    },
}

impl Destination<'_, '_> {
    fn as_any(&mut self) -> &mut dyn Any {
        match self {
            Destination::Field(field) => field.value_mut(),
            Destination::Value { value, .. } => &mut **value,
        }
    }

    fn assign(&mut self, source: &dyn Any) -> bool {
        match self {
            Destination::Field(field) => field.assign(source),
            Destination::Value { assign, value } => (*assign)(source, &mut **value),
        }
    }
}
