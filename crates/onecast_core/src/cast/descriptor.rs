use serde_json::Value as Json;
use tracing::debug;

use crate::cast::SchemaId;
use crate::cast::texpr::{Alternative, Primitive, parse_type_expr};

/// Classification of a declared property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	/// Only primitive keywords or literals were declared.
	Primitive,
	/// Exactly one custom name that resolves in the catalog.
	Custom,
	/// More than one custom candidate; treated as `mixed`.
	Union,
	/// No usable declaration, or a single custom name that does not resolve.
	Unknown,
}

impl TypeKind {
	/// Lowercase label used in diagnostics.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Primitive => "primitive",
			Self::Custom => "custom",
			Self::Union => "union",
			Self::Unknown => "unknown",
		}
	}
}

/// Small bit set of [`Primitive`] kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimitiveSet(u16);

impl PrimitiveSet {
	/// Set with no members.
	pub const EMPTY: Self = Self(0);

	/// Add one kind.
	pub fn insert(&mut self, kind: Primitive) {
		self.0 |= Self::bit(kind);
	}

	/// Test membership.
	pub fn contains(self, kind: Primitive) -> bool {
		self.0 & Self::bit(kind) != 0
	}

	/// Whether no kind is present.
	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Iterate members in declaration order.
	pub fn iter(self) -> impl Iterator<Item = Primitive> {
		Primitive::ALL.into_iter().filter(move |kind| self.contains(*kind))
	}

	/// Whether a non-record JSON value matches one of the member kinds.
	///
	/// Integral numbers satisfy both `int` and `float`.
	pub fn accepts_json(self, value: &Json) -> bool {
		match value {
			Json::Null => self.contains(Primitive::Null),
			Json::Bool(_) => self.contains(Primitive::Bool),
			Json::String(_) => self.contains(Primitive::String),
			Json::Number(num) if num.is_i64() || num.is_u64() => self.contains(Primitive::Int) || self.contains(Primitive::Float),
			Json::Number(_) => self.contains(Primitive::Float),
			Json::Array(_) => self.contains(Primitive::Array),
			Json::Object(_) => self.contains(Primitive::Object),
		}
	}

	fn bit(kind: Primitive) -> u16 {
		1 << (kind as u16)
	}
}

/// Per-property type metadata derived from a declared type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
	/// Classification driving cast dispatch.
	pub kind: TypeKind,
	/// The single custom name, when exactly one was declared.
	pub custom_type_name: Option<Box<str>>,
	/// Catalog entry the custom name resolved to.
	pub target: Option<SchemaId>,
	/// Whether the expression carried an array-of marker.
	pub is_collection: bool,
	/// Primitive kinds listed among the alternatives (literals count as `string`).
	pub accepts: PrimitiveSet,
}

impl TypeDescriptor {
	/// Descriptor for a property without a type expression.
	pub fn unknown() -> Self {
		Self {
			kind: TypeKind::Unknown,
			custom_type_name: None,
			target: None,
			is_collection: false,
			accepts: PrimitiveSet::EMPTY,
		}
	}

	/// Derive a descriptor; `resolve` maps a custom name to its catalog entry.
	pub(crate) fn derive(expr: Option<&str>, resolve: impl Fn(&str) -> Option<SchemaId>) -> Self {
		let Some(raw) = expr.map(str::trim).filter(|raw| !raw.is_empty()) else {
			return Self::unknown();
		};

		let parsed = parse_type_expr(raw);
		let mut accepts = PrimitiveSet::EMPTY;
		for alt in &parsed.alternatives {
			match alt {
				Alternative::Primitive(kind) => accepts.insert(*kind),
				Alternative::Literal(_) => accepts.insert(Primitive::String),
				Alternative::Named(_) => {}
			}
		}

		let names: Vec<&str> = parsed.custom_names().collect();
		let mut out = Self {
			kind: TypeKind::Primitive,
			custom_type_name: None,
			target: None,
			is_collection: parsed.is_collection,
			accepts,
		};

		match names.as_slice() {
			[] => {
				if parsed.alternatives.is_empty() {
					out.kind = TypeKind::Unknown;
				}
			}
			[name] => {
				out.custom_type_name = Some((*name).into());
				out.target = resolve(name);
				if out.target.is_some() {
					out.kind = TypeKind::Custom;
				} else {
					debug!(type_name = %name, expr = %raw, "custom type does not resolve, passing through");
					out.kind = TypeKind::Unknown;
				}
			}
			_ => {
				debug!(candidates = names.len(), expr = %raw, "ambiguous custom union, passing through");
				out.kind = TypeKind::Union;
			}
		}

		out
	}

	/// Whether the cast recurses into nested records for this property.
	pub fn is_custom(&self) -> bool {
		self.kind == TypeKind::Custom
	}
}
