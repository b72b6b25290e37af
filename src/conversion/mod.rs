mod aggregate;
mod converter;
mod registry;
mod type_pair;

pub use aggregate::{Aggregate, FieldMut, FieldRef, FieldSource};
pub use converter::{Converter, Meta, Scope};
pub use registry::{AggregateDescriptor, ConversionFunc, Registry};
pub use type_pair::TypePair;
