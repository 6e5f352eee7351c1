use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value as Json};

use crate::cast::Schema;

/// Slot content of a cast instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Nothing assigned and no default declared.
	#[default]
	Unset,
	/// Opaque copy of the payload value (or a declared default).
	Raw(Json),
	/// Recursively cast nested record.
	Instance(Instance),
	/// Element-wise cast sequence; elements are `Instance` or `Raw`.
	List(Vec<Value>),
}

impl Value {
	/// Whether the slot holds nothing.
	pub fn is_unset(&self) -> bool {
		matches!(self, Self::Unset)
	}

	/// Borrow an opaque payload value.
	pub fn as_raw(&self) -> Option<&Json> {
		match self {
			Self::Raw(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow a raw string.
	pub fn as_str(&self) -> Option<&str> {
		self.as_raw().and_then(Json::as_str)
	}

	/// Borrow a nested instance.
	pub fn as_instance(&self) -> Option<&Instance> {
		match self {
			Self::Instance(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow a cast sequence.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Encode back to generic JSON; `Unset` becomes `null`.
	pub fn to_json(&self) -> Json {
		match self {
			Self::Unset => Json::Null,
			Self::Raw(value) => value.clone(),
			Self::Instance(item) => item.to_json(),
			Self::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
		}
	}
}

/// One named instance slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Property key.
	pub name: Box<str>,
	/// Slot content.
	pub value: Value,
}

/// Cast output: one slot per declared property, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
	/// Qualified schema name.
	pub schema: Box<str>,
	/// Slots in declaration order.
	pub fields: Vec<FieldValue>,
}

impl Instance {
	/// Instance with no slots, used when the schema is unknown.
	pub fn empty(schema: &str) -> Self {
		Self {
			schema: schema.into(),
			fields: Vec::new(),
		}
	}

	/// Fresh instance with every slot at its declared default.
	pub fn with_defaults(schema: &Schema) -> Self {
		let fields = schema
			.properties
			.iter()
			.map(|property| FieldValue {
				name: property.name.clone(),
				value: property.default.clone().map_or(Value::Unset, Value::Raw),
			})
			.collect();
		Self {
			schema: schema.name.clone(),
			fields,
		}
	}

	/// Borrow a slot by property key.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Whether a slot exists and holds something.
	pub fn is_set(&self, name: &str) -> bool {
		self.get(name).is_some_and(|value| !value.is_unset())
	}

	/// Number of slots holding something.
	pub fn set_count(&self) -> usize {
		self.fields.iter().filter(|field| !field.value.is_unset()).count()
	}

	pub(crate) fn set_slot(&mut self, slot: usize, value: Value) {
		if let Some(field) = self.fields.get_mut(slot) {
			field.value = value;
		}
	}

	/// Encode to a JSON object; unset slots are omitted.
	pub fn to_json(&self) -> Json {
		let mut map = Map::new();
		for field in &self.fields {
			if !field.value.is_unset() {
				map.insert(field.name.to_string(), field.value.to_json());
			}
		}
		Json::Object(map)
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Unset => serializer.serialize_unit(),
			Self::Raw(value) => value.serialize(serializer),
			Self::Instance(item) => item.serialize(serializer),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
		}
	}
}

impl Serialize for Instance {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.set_count()))?;
		for field in self.fields.iter().filter(|field| !field.value.is_unset()) {
			map.serialize_entry(&*field.name, &field.value)?;
		}
		map.end()
	}
}
