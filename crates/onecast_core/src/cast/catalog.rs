use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as Json;
use tracing::debug;

use crate::cast::{CastError, Result, TypeDescriptor};

const NAMESPACE_SEP: char = '.';

/// Stable index of a schema inside one [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub u32);

impl SchemaId {
	/// Position in the catalog schema table.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Namespace layout used to qualify and resolve schema names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Namespaces {
	/// Root namespace owned by this catalog; names under it are never re-prefixed.
	pub reserved: String,
	/// Namespace prepended to bare names.
	pub types: String,
}

impl Default for Namespaces {
	fn default() -> Self {
		Self {
			reserved: "One".to_owned(),
			types: "One.Types".to_owned(),
		}
	}
}

impl Namespaces {
	/// Build a namespace layout.
	pub fn new(reserved: impl Into<String>, types: impl Into<String>) -> Self {
		Self {
			reserved: reserved.into(),
			types: types.into(),
		}
	}

	/// Whether `name` already lives under the reserved namespace.
	pub fn is_reserved(&self, name: &str) -> bool {
		name.strip_prefix(self.reserved.as_str())
			.is_some_and(|rest| rest.starts_with(NAMESPACE_SEP))
	}

	/// Qualify a declared schema name: bare names join the type namespace, dotted names are kept.
	pub fn qualify(&self, name: &str) -> String {
		let name = trim_name(name);
		if name.contains(NAMESPACE_SEP) {
			name.to_owned()
		} else {
			self.prefixed(name)
		}
	}

	/// Prefix the type namespace onto `name` unconditionally.
	pub fn prefixed(&self, name: &str) -> String {
		format!("{}{NAMESPACE_SEP}{}", self.types, trim_name(name))
	}
}

/// One property declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyDecl {
	/// Property key as it appears in payloads.
	pub name: String,
	/// Type expression, e.g. `Message[]|null`.
	#[serde(default, rename = "type")]
	pub type_expr: Option<String>,
	/// Value the instance slot starts with; `null` means unset.
	#[serde(default)]
	pub default: Option<Json>,
}

impl PropertyDecl {
	/// Declare a typed property.
	pub fn new(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_expr: Some(type_expr.into()),
			default: None,
		}
	}

	/// Declare a property without type metadata.
	pub fn untyped(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_expr: None,
			default: None,
		}
	}

	/// Set the default slot value.
	pub fn with_default(mut self, value: Json) -> Self {
		self.default = Some(value);
		self
	}
}

/// One schema declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaDecl {
	/// Bare or qualified schema name.
	pub name: String,
	/// Parent schema whose properties are inherited first.
	#[serde(default)]
	pub extends: Option<String>,
	/// Own properties in declaration order.
	#[serde(default)]
	pub properties: Vec<PropertyDecl>,
}

impl SchemaDecl {
	/// Start an empty declaration.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			extends: None,
			properties: Vec::new(),
		}
	}

	/// Inherit from `parent`.
	pub fn extends(mut self, parent: impl Into<String>) -> Self {
		self.extends = Some(parent.into());
		self
	}

	/// Append a typed property.
	pub fn property(self, name: impl Into<String>, type_expr: impl Into<String>) -> Self {
		self.with(PropertyDecl::new(name, type_expr))
	}

	/// Append a property without type metadata.
	pub fn untyped(self, name: impl Into<String>) -> Self {
		self.with(PropertyDecl::untyped(name))
	}

	/// Append a prepared property declaration.
	pub fn with(mut self, decl: PropertyDecl) -> Self {
		self.properties.push(decl);
		self
	}
}

/// Serialized catalog document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
	/// Namespace layout; defaults to `One` / `One.Types`.
	pub namespaces: Namespaces,
	/// Schema declarations.
	pub schemas: Vec<SchemaDecl>,
	/// Interface-like names mapped to the schema they stand for.
	pub aliases: BTreeMap<String, String>,
}

/// Resolved property with its derived descriptor.
#[derive(Debug, Clone)]
pub struct Property {
	/// Property key.
	pub name: Box<str>,
	/// Declared type expression, if any.
	pub type_expr: Option<Box<str>>,
	/// Non-null default slot value.
	pub default: Option<Json>,
	/// Descriptor derived once at catalog build.
	pub descriptor: TypeDescriptor,
}

/// Resolved schema: inherited and own properties, flattened.
#[derive(Debug, Clone)]
pub struct Schema {
	/// Qualified schema name.
	pub name: Box<str>,
	/// Parent schema, when declared with `extends`.
	pub parent: Option<SchemaId>,
	/// Properties in slot order (ancestors first).
	pub properties: Vec<Property>,
}

impl Schema {
	/// Slot index of a property by key.
	pub fn property_index(&self, name: &str) -> Option<usize> {
		self.properties.iter().position(|item| &*item.name == name)
	}

	/// Look up a property by key.
	pub fn property(&self, name: &str) -> Option<&Property> {
		self.properties.iter().find(|item| &*item.name == name)
	}
}

/// Immutable schema registry keyed by qualified names and aliases.
#[derive(Debug, Clone)]
pub struct Catalog {
	namespaces: Namespaces,
	schemas: Vec<Schema>,
	aliases: Vec<(Box<str>, SchemaId)>,
	by_name: HashMap<Box<str>, SchemaId>,
}

impl Catalog {
	/// Start a builder using `namespaces`.
	pub fn builder(namespaces: Namespaces) -> CatalogBuilder {
		CatalogBuilder::new(namespaces)
	}

	/// Build from a parsed catalog document.
	pub fn from_file(file: CatalogFile) -> Result<Self> {
		let mut builder = CatalogBuilder::new(file.namespaces);
		for decl in file.schemas {
			builder.add(decl);
		}
		for (alias, target) in file.aliases {
			builder.add_alias(alias, target);
		}
		builder.build()
	}

	/// Parse and build a catalog document.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let file: CatalogFile = serde_json::from_str(text)?;
		Self::from_file(file)
	}

	/// Read, parse, and build a catalog document from disk.
	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		debug!(path = %path.display(), "reading catalog file");
		let text = std::fs::read_to_string(path)?;
		Self::from_json_str(&text)
	}

	/// Namespace layout in effect.
	pub fn namespaces(&self) -> &Namespaces {
		&self.namespaces
	}

	/// Resolve a bare, qualified, or alias name.
	///
	/// Reserved-namespace names are looked up as given; others are tried verbatim and then with
	/// the type namespace prefixed. Never fails loudly.
	pub fn resolve(&self, name: &str) -> Option<SchemaId> {
		resolve_in(&self.by_name, &self.namespaces, name)
	}

	/// Look up a schema by id.
	pub fn schema(&self, id: SchemaId) -> Option<&Schema> {
		self.schemas.get(id.index())
	}

	/// Resolve then look up a schema.
	pub fn schema_by_name(&self, name: &str) -> Option<&Schema> {
		self.resolve(name).and_then(|id| self.schema(id))
	}

	/// Qualified name of a resolvable schema.
	pub fn qualified_name(&self, name: &str) -> Option<&str> {
		self.schema_by_name(name).map(|item| &*item.name)
	}

	/// Iterate schemas in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (SchemaId, &Schema)> {
		self.schemas.iter().enumerate().map(|(idx, item)| (SchemaId(idx as u32), item))
	}

	/// Iterate aliases with their targets.
	pub fn aliases(&self) -> impl Iterator<Item = (&str, SchemaId)> {
		self.aliases.iter().map(|(name, id)| (&**name, *id))
	}

	/// Number of schemas.
	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	/// Whether no schema is declared.
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}
}

/// Collects declarations and validates them into a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
	namespaces: Namespaces,
	decls: Vec<SchemaDecl>,
	aliases: Vec<(String, String)>,
}

impl CatalogBuilder {
	/// Start an empty builder.
	pub fn new(namespaces: Namespaces) -> Self {
		Self {
			namespaces,
			decls: Vec::new(),
			aliases: Vec::new(),
		}
	}

	/// Add a schema declaration.
	pub fn schema(mut self, decl: SchemaDecl) -> Self {
		self.add(decl);
		self
	}

	/// Add an alias for an existing schema.
	pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
		self.add_alias(alias, target);
		self
	}

	/// Add a schema declaration in place.
	pub fn add(&mut self, decl: SchemaDecl) {
		self.decls.push(decl);
	}

	/// Add an alias in place.
	pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
		self.aliases.push((alias.into(), target.into()));
	}

	/// Validate declarations, flatten inheritance, and derive every descriptor.
	pub fn build(self) -> Result<Catalog> {
		let Self { namespaces, decls, aliases } = self;

		let mut by_name: HashMap<Box<str>, SchemaId> = HashMap::with_capacity(decls.len() + aliases.len());
		let mut names = Vec::with_capacity(decls.len());
		for (idx, decl) in decls.iter().enumerate() {
			if trim_name(&decl.name).is_empty() {
				return Err(CastError::EmptyName { kind: "schema" });
			}
			let qualified = namespaces.qualify(&decl.name);
			check_properties(&qualified, &decl.properties)?;
			if by_name.contains_key(qualified.as_str()) {
				return Err(CastError::DuplicateSchema { name: qualified });
			}
			by_name.insert(qualified.clone().into_boxed_str(), SchemaId(idx as u32));
			names.push(qualified);
		}

		let alias_table = resolve_aliases(&mut by_name, &namespaces, aliases)?;

		let mut parents = Vec::with_capacity(decls.len());
		for (decl, name) in decls.iter().zip(&names) {
			let parent = match &decl.extends {
				Some(parent) => Some(resolve_in(&by_name, &namespaces, parent).ok_or_else(|| CastError::UnknownParent {
					schema: name.clone(),
					parent: parent.clone(),
				})?),
				None => None,
			};
			parents.push(parent);
		}

		let mut schemas = Vec::with_capacity(decls.len());
		for (idx, name) in names.iter().enumerate() {
			let chain = ancestor_chain(idx, &parents, name)?;
			let mut properties: Vec<Property> = Vec::new();
			for ancestor in chain.iter().rev().chain(std::iter::once(&idx)) {
				for decl in &decls[*ancestor].properties {
					let property = Property {
						name: decl.name.clone().into_boxed_str(),
						type_expr: decl.type_expr.clone().map(String::into_boxed_str),
						default: decl.default.clone().filter(|value| !value.is_null()),
						descriptor: TypeDescriptor::unknown(),
					};
					match properties.iter_mut().find(|item| item.name == property.name) {
						Some(slot) => *slot = property,
						None => properties.push(property),
					}
				}
			}
			schemas.push(Schema {
				name: name.clone().into_boxed_str(),
				parent: parents[idx],
				properties,
			});
		}

		for schema in &mut schemas {
			for property in &mut schema.properties {
				property.descriptor = TypeDescriptor::derive(property.type_expr.as_deref(), |item| resolve_in(&by_name, &namespaces, item));
				if property.descriptor.is_custom() && property.default.as_ref().is_some_and(|value| value.is_object() || value.is_array()) {
					return Err(CastError::RecordDefault {
						schema: schema.name.to_string(),
						property: property.name.to_string(),
					});
				}
			}
		}

		debug!(schemas = schemas.len(), aliases = alias_table.len(), "catalog built");
		Ok(Catalog {
			namespaces,
			schemas,
			aliases: alias_table,
			by_name,
		})
	}
}

fn resolve_in(by_name: &HashMap<Box<str>, SchemaId>, namespaces: &Namespaces, name: &str) -> Option<SchemaId> {
	let name = trim_name(name);
	if name.is_empty() {
		return None;
	}
	if namespaces.is_reserved(name) {
		return by_name.get(name).copied();
	}
	by_name
		.get(name)
		.or_else(|| by_name.get(namespaces.prefixed(name).as_str()))
		.copied()
}

/// Register aliases; chains resolve regardless of declaration order.
fn resolve_aliases(
	by_name: &mut HashMap<Box<str>, SchemaId>,
	namespaces: &Namespaces,
	aliases: Vec<(String, String)>,
) -> Result<Vec<(Box<str>, SchemaId)>> {
	let mut pending: Vec<(Box<str>, String)> = Vec::with_capacity(aliases.len());
	let mut pending_names: HashMap<Box<str>, SchemaId> = HashMap::with_capacity(aliases.len());
	for (alias, target) in aliases {
		if trim_name(&alias).is_empty() {
			return Err(CastError::EmptyName { kind: "alias" });
		}
		let qualified = namespaces.qualify(&alias).into_boxed_str();
		if by_name.contains_key(&*qualified) || pending_names.contains_key(&*qualified) {
			return Err(CastError::AliasCollision { alias: qualified.into() });
		}
		pending_names.insert(qualified.clone(), SchemaId(pending.len() as u32));
		pending.push((qualified, target));
	}

	let mut resolved = Vec::with_capacity(pending.len());
	while !pending.is_empty() {
		let before = pending.len();
		let mut idx = 0;
		while idx < pending.len() {
			match resolve_in(by_name, namespaces, &pending[idx].1) {
				Some(id) => {
					let (alias, _) = pending.remove(idx);
					by_name.insert(alias.clone(), id);
					resolved.push((alias, id));
				}
				None => idx += 1,
			}
		}
		if pending.len() == before {
			let dangling = pending.iter().position(|(_, target)| resolve_in(&pending_names, namespaces, target).is_none());
			return Err(match dangling {
				Some(idx) => {
					let (alias, target) = pending.swap_remove(idx);
					CastError::UnknownAliasTarget { alias: alias.into(), target }
				}
				None => {
					let (alias, _) = pending.swap_remove(0);
					CastError::AliasCycle { alias: alias.into() }
				}
			});
		}
	}
	Ok(resolved)
}

fn trim_name(name: &str) -> &str {
	name.trim().trim_start_matches(NAMESPACE_SEP)
}

fn check_properties(schema: &str, properties: &[PropertyDecl]) -> Result<()> {
	for (idx, decl) in properties.iter().enumerate() {
		if decl.name.trim().is_empty() {
			return Err(CastError::EmptyName { kind: "property" });
		}
		if properties[..idx].iter().any(|item| item.name == decl.name) {
			return Err(CastError::DuplicateProperty {
				schema: schema.to_owned(),
				property: decl.name.clone(),
			});
		}
	}
	Ok(())
}

/// Ancestors of `idx`, nearest first.
fn ancestor_chain(idx: usize, parents: &[Option<SchemaId>], name: &str) -> Result<Vec<usize>> {
	let mut chain = Vec::new();
	let mut cursor = parents[idx];
	while let Some(parent) = cursor {
		let parent = parent.index();
		if parent == idx || chain.contains(&parent) {
			return Err(CastError::InheritanceCycle { schema: name.to_owned() });
		}
		chain.push(parent);
		cursor = parents[parent];
	}
	Ok(chain)
}
