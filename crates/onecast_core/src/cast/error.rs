use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CastError>;

/// Errors produced while building catalogs and materializing typed values.
///
/// Casting itself never fails; see [`crate::cast::Caster`].
#[derive(Debug, Error)]
pub enum CastError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Catalog document or payload was not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Schema or property declaration used an empty name.
	#[error("empty {kind} name")]
	EmptyName {
		/// Logical kind of the unnamed declaration.
		kind: &'static str,
	},
	/// Two schema declarations qualified to the same name.
	#[error("duplicate schema: {name}")]
	DuplicateSchema {
		/// Qualified schema name.
		name: String,
	},
	/// One declaration listed the same property twice.
	#[error("duplicate property {property} on {schema}")]
	DuplicateProperty {
		/// Qualified schema name.
		schema: String,
		/// Repeated property name.
		property: String,
	},
	/// `extends` named a schema that is not declared.
	#[error("schema {schema} extends unknown parent {parent}")]
	UnknownParent {
		/// Qualified schema name.
		schema: String,
		/// Parent name as declared.
		parent: String,
	},
	/// Inheritance chain loops back onto itself.
	#[error("inheritance cycle at {schema}")]
	InheritanceCycle {
		/// Schema where the cycle was detected.
		schema: String,
	},
	/// Alias points at a schema that is not declared.
	#[error("alias {alias} targets unknown schema {target}")]
	UnknownAliasTarget {
		/// Qualified alias name.
		alias: String,
		/// Target name as declared.
		target: String,
	},
	/// Aliases target each other without reaching a schema.
	#[error("alias cycle at {alias}")]
	AliasCycle {
		/// Qualified alias name inside the cycle.
		alias: String,
	},
	/// Record-typed property declared a mapping or sequence default.
	#[error("property {property} on {schema} has a record-shaped default")]
	RecordDefault {
		/// Qualified schema name.
		schema: String,
		/// Property carrying the default.
		property: String,
	},
	/// Alias name collides with a schema or another alias.
	#[error("alias {alias} collides with an existing name")]
	AliasCollision {
		/// Qualified alias name.
		alias: String,
	},
	/// Requested schema name did not resolve in the catalog.
	#[error("schema not found: {name}")]
	SchemaNotFound {
		/// Requested schema name.
		name: String,
	},
	/// Cast output could not be materialized into the requested Rust type.
	#[error("materialize {schema}: {source}")]
	Materialize {
		/// Qualified schema name of the cast instance.
		schema: String,
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},
}
