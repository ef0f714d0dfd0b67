//! In-memory value tree for arbor.
//!
//! The tree is produced by an external JSON parser (see `arbor-json`) and is
//! never mutated once built. Readers walk it with [`lookup`], writers build a
//! new one.

/// Canonical-text JSON numbers.
pub mod number;

/// The tagged union of JSON node kinds.
pub mod value;

/// Relative paths and ordered path alternatives.
pub mod path;

/// Absolute positions used for error attribution.
pub mod location;

/// Walking a path through a value tree.
pub mod lookup;

pub use location::Location;
pub use lookup::{LookupResult, Undefined, lookup};
pub use number::{Number, NumberParseError};
pub use path::{Path, PathElement, Paths};
pub use value::{Array, Struct, Value, ValueKind};
