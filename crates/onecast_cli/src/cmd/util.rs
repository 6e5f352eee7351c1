use std::io::Read;
use std::path::Path;

use onecast::cast::{Catalog, Result, one_catalog};
use serde_json::Value as Json;
use tracing::debug;

/// Load the catalog at `path`, or the built-in One catalog.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
	match path {
		Some(path) => Catalog::from_json_file(path),
		None => {
			debug!("using built-in One catalog");
			one_catalog()
		}
	}
}

/// Read a JSON document from a file, or stdin when `path` is `-`.
pub(crate) fn read_json(path: &Path) -> Result<Json> {
	let text = if path.as_os_str() == "-" {
		let mut text = String::new();
		std::io::stdin().read_to_string(&mut text)?;
		text
	} else {
		std::fs::read_to_string(path)?
	};
	Ok(serde_json::from_str(&text)?)
}

/// Print a JSON value, pretty unless `compact`.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
	let text = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
	println!("{text}");
	Ok(())
}
