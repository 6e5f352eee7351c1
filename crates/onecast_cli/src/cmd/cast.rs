use std::path::PathBuf;

use onecast::cast::{CastError, Caster, Result};
use tracing::info;

use crate::cmd::util::{load_catalog, print_json, read_json};

/// Output switches for the cast command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastArgs {
	/// Cast each element of a top-level array.
	pub each: bool,
	/// Print single-line JSON.
	pub compact: bool,
}

/// Cast `input` against `schema` and print the instance JSON.
pub fn run(input: PathBuf, schema: String, catalog: Option<PathBuf>, args: CastArgs) -> Result<()> {
	let catalog = load_catalog(catalog.as_deref())?;
	let qualified = catalog.qualified_name(&schema).ok_or_else(|| CastError::SchemaNotFound { name: schema.clone() })?;
	let raw = read_json(&input)?;
	let caster = Caster::new(&catalog);

	info!(input = %input.display(), schema = qualified, each = args.each, "casting");
	if args.each {
		let items = caster.cast_each(&raw, qualified);
		print_json(&items, args.compact)
	} else {
		let instance = caster.cast(&raw, qualified);
		print_json(&instance, args.compact)
	}
}
