mod caster;
mod catalog;
mod descriptor;
mod error;
mod texpr;
mod types;
mod value;

/// Recursive caster entry points.
pub use caster::Caster;
/// Schema catalog, declarations, and namespace configuration.
pub use catalog::{Catalog, CatalogBuilder, CatalogFile, Namespaces, Property, PropertyDecl, Schema, SchemaDecl, SchemaId};
/// Per-property type descriptors.
pub use descriptor::{PrimitiveSet, TypeDescriptor, TypeKind};
/// Error and result aliases.
pub use error::{CastError, Result};
/// Type expression parser types.
pub use texpr::{Alternative, Primitive, TypeExpr, parse_type_expr};
/// Built-in One API catalog.
pub use types::one_catalog;
/// Cast output value types.
pub use value::{FieldValue, Instance, Value};
