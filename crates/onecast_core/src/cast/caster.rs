use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use tracing::{debug, trace, warn};

use crate::cast::value::{Instance, Value};
use crate::cast::{CastError, Catalog, Result, SchemaId, TypeKind};

/// Schema-directed recursive caster over one immutable [`Catalog`].
///
/// Casting is fail-soft: undeclared keys and nulls are skipped, shape mismatches leave the slot
/// at its default, and unresolvable or ambiguous types pass the raw value through. Nothing is
/// cached between calls and input values are never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Caster<'c> {
	catalog: &'c Catalog,
}

impl<'c> Caster<'c> {
	/// Create a caster borrowing `catalog`.
	pub fn new(catalog: &'c Catalog) -> Self {
		Self { catalog }
	}

	/// Catalog this caster reads schemas from.
	pub fn catalog(&self) -> &'c Catalog {
		self.catalog
	}

	/// Cast a decoded JSON value into an instance of `schema`.
	///
	/// Non-mapping input yields an instance holding only defaults. An unknown `schema` yields an
	/// empty instance carrying the requested name.
	pub fn cast(&self, raw: &Json, schema: &str) -> Instance {
		match self.catalog.resolve(schema) {
			Some(id) => self.cast_id(raw, id),
			None => {
				warn!(schema, "cast target schema not found");
				Instance::empty(schema)
			}
		}
	}

	/// Re-encode any serializable value to JSON, then cast it.
	pub fn cast_serialize<T: Serialize + ?Sized>(&self, data: &T, schema: &str) -> Instance {
		match serde_json::to_value(data) {
			Ok(raw) => self.cast(&raw, schema),
			Err(err) => {
				debug!(schema, %err, "re-encode failed, returning defaults");
				self.cast(&Json::Null, schema)
			}
		}
	}

	/// Cast every element of a top-level sequence; anything else yields no instances.
	pub fn cast_each(&self, raw: &Json, schema: &str) -> Vec<Instance> {
		let Json::Array(items) = raw else {
			debug!(schema, shape = shape_name(raw), "cast_each expects a sequence");
			return Vec::new();
		};
		items.iter().map(|item| self.cast(item, schema)).collect()
	}

	/// Cast, then materialize the instance into a typed Rust value in one step.
	pub fn cast_into<T: DeserializeOwned>(&self, raw: &Json, schema: &str) -> Result<T> {
		let id = self.catalog.resolve(schema).ok_or_else(|| CastError::SchemaNotFound { name: schema.to_owned() })?;
		let instance = self.cast_id(raw, id);
		serde_json::from_value(instance.to_json()).map_err(|source| CastError::Materialize {
			schema: instance.schema.to_string(),
			source,
		})
	}

	fn cast_id(&self, raw: &Json, id: SchemaId) -> Instance {
		let Some(schema) = self.catalog.schema(id) else {
			return Instance::empty("");
		};
		let mut out = Instance::with_defaults(schema);

		let Json::Object(map) = raw else {
			debug!(schema = %schema.name, shape = shape_name(raw), "non-mapping input, returning defaults");
			return out;
		};

		for (key, value) in map {
			if value.is_null() {
				continue;
			}
			let Some(slot) = schema.property_index(key) else {
				trace!(schema = %schema.name, key = %key, "undeclared key skipped");
				continue;
			};

			let descriptor = &schema.properties[slot].descriptor;
			let target = match (descriptor.kind, descriptor.target) {
				(TypeKind::Custom, Some(target)) => target,
				_ => {
					out.set_slot(slot, Value::Raw(value.clone()));
					continue;
				}
			};

			match value {
				Json::Array(items) => {
					let list = items.iter().map(|item| self.cast_element(item, target)).collect();
					out.set_slot(slot, Value::List(list));
				}
				Json::Object(_) => out.set_slot(slot, Value::Instance(self.cast_id(value, target))),
				_ if descriptor.accepts.accepts_json(value) => out.set_slot(slot, Value::Raw(value.clone())),
				_ => {
					debug!(
						schema = %schema.name,
						key = %key,
						shape = shape_name(value),
						"primitive where custom type declared, leaving default"
					);
				}
			}
		}

		out
	}

	fn cast_element(&self, item: &Json, target: SchemaId) -> Value {
		match item {
			Json::Object(_) | Json::Array(_) => Value::Instance(self.cast_id(item, target)),
			_ => Value::Raw(item.clone()),
		}
	}
}

fn shape_name(value: &Json) -> &'static str {
	match value {
		Json::Null => "null",
		Json::Bool(_) => "bool",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "sequence",
		Json::Object(_) => "mapping",
	}
}
