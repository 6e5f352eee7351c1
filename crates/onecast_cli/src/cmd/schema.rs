use std::path::PathBuf;

use onecast::cast::{CastError, Catalog, Property, Result, Schema};
use serde_json::{Value as Json, json};

use crate::cmd::util::{load_catalog, print_json};

/// List schemas, or describe one schema's properties.
pub fn run(catalog: Option<PathBuf>, schema: Option<String>, json: bool) -> Result<()> {
	let catalog = load_catalog(catalog.as_deref())?;

	let Some(name) = schema else {
		if json {
			return print_json(&catalog_json(&catalog), false);
		}
		print_catalog(&catalog);
		return Ok(());
	};

	let item = catalog.schema_by_name(&name).ok_or(CastError::SchemaNotFound { name: name.clone() })?;
	if json {
		return print_json(&schema_json(&catalog, item), false);
	}
	print_schema(&catalog, item);
	Ok(())
}

fn print_catalog(catalog: &Catalog) {
	println!("reserved: {}", catalog.namespaces().reserved);
	println!("types: {}", catalog.namespaces().types);
	println!("schemas: {}", catalog.len());
	for (_, item) in catalog.iter() {
		println!("  {} ({} properties)", item.name, item.properties.len());
	}
	for (alias, target) in catalog.aliases() {
		println!("  {alias} -> {}", schema_name(catalog, target));
	}
}

fn print_schema(catalog: &Catalog, item: &Schema) {
	println!("schema: {}", item.name);
	if let Some(parent) = item.parent {
		println!("extends: {}", schema_name(catalog, parent));
	}
	println!("property_count: {}", item.properties.len());
	for property in &item.properties {
		let desc = &property.descriptor;
		let mut line = format!("  {}: {} [{}", property.name, property.type_expr.as_deref().unwrap_or("-"), desc.kind.as_str());
		if let Some(target) = desc.target {
			line.push_str(&format!(" -> {}", schema_name(catalog, target)));
		} else if let Some(custom) = &desc.custom_type_name {
			line.push_str(&format!(" ({custom} unresolved)"));
		}
		if desc.is_collection {
			line.push_str(", collection");
		}
		line.push(']');
		println!("{line}");
	}
}

fn catalog_json(catalog: &Catalog) -> Json {
	let schemas: Vec<Json> = catalog
		.iter()
		.map(|(_, item)| json!({ "name": &*item.name, "properties": item.properties.len() }))
		.collect();
	let aliases: Vec<Json> = catalog
		.aliases()
		.map(|(alias, target)| json!({ "alias": alias, "target": schema_name(catalog, target) }))
		.collect();
	json!({
		"reserved": catalog.namespaces().reserved,
		"types": catalog.namespaces().types,
		"schemas": schemas,
		"aliases": aliases,
	})
}

fn schema_json(catalog: &Catalog, item: &Schema) -> Json {
	let properties: Vec<Json> = item.properties.iter().map(|property| property_json(catalog, property)).collect();
	json!({
		"name": &*item.name,
		"extends": item.parent.map(|parent| schema_name(catalog, parent)),
		"properties": properties,
	})
}

fn property_json(catalog: &Catalog, property: &Property) -> Json {
	let desc = &property.descriptor;
	let accepts: Vec<&str> = desc.accepts.iter().map(|kind| kind.as_str()).collect();
	json!({
		"name": &*property.name,
		"type": property.type_expr.as_deref(),
		"kind": desc.kind.as_str(),
		"custom_type_name": desc.custom_type_name.as_deref(),
		"target": desc.target.map(|target| schema_name(catalog, target)),
		"is_collection": desc.is_collection,
		"accepts": accepts,
		"default": property.default,
	})
}

fn schema_name(catalog: &Catalog, id: onecast::cast::SchemaId) -> String {
	catalog.schema(id).map(|item| item.name.to_string()).unwrap_or_else(|| "<unknown>".to_owned())
}
