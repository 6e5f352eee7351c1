use crate::cast::{Catalog, Result};

const ONE_TYPES: &str = include_str!("one_types.json");

/// Build the catalog of One API record types (`One.Types.*`).
pub fn one_catalog() -> Result<Catalog> {
	Catalog::from_json_str(ONE_TYPES)
}

#[cfg(test)]
mod tests;
