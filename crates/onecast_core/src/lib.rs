//! Public library API for casting decoded JSON payloads into schema-typed instance trees.

/// Type expressions, schema catalog, and the recursive caster.
pub mod cast;
