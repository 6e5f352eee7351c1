use std::path::PathBuf;

use onecast::cast::{CastError, Result};

use crate::cmd::util::load_catalog;

/// Print the qualified schema name for `name`.
pub fn run(name: String, catalog: Option<PathBuf>) -> Result<()> {
	let catalog = load_catalog(catalog.as_deref())?;
	let qualified = catalog.qualified_name(&name).ok_or(CastError::SchemaNotFound { name: name.clone() })?;
	println!("{qualified}");
	Ok(())
}
