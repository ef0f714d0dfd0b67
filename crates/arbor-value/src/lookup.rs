//! Path resolution against a value tree.
//!
//! Lookup distinguishes *why* a path does not resolve:
//! - [`Undefined::PathMissing`]: a container of the right kind lacks the key or index.
//! - [`Undefined::InvalidType`]: a node along the way is not the container the
//!   next element needs (a key into an array, an index into a string, ...).
//!
//! Optional readers treat both as "absent"; required readers report them as
//! different errors.

use crate::location::Location;
use crate::path::{Path, PathElement};
use crate::value::{Value, ValueKind};

/// Result of resolving a path, borrowing the found node from the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<'v> {
    Defined { location: Location, value: &'v Value },
    Undefined(Undefined),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undefined {
    /// `location` ends with the element that was not found.
    PathMissing { location: Location },
    /// `location` is the node that could not be stepped into.
    InvalidType {
        location: Location,
        expected: ValueKind,
        actual: ValueKind,
    },
}

impl Undefined {
    pub fn location(&self) -> &Location {
        match self {
            Undefined::PathMissing { location } | Undefined::InvalidType { location, .. } => {
                location
            }
        }
    }
}

/// Resolve `path` against `value`, whose own position is `location`.
pub fn lookup<'v>(value: &'v Value, location: &Location, path: &Path) -> LookupResult<'v> {
    LookupResult::Defined {
        location: location.clone(),
        value,
    }
    .apply_path(path)
}

impl<'v> LookupResult<'v> {
    /// Step into a struct field. Undefined results are returned unchanged.
    pub fn apply_key(self, key: &str) -> Self {
        let (location, value) = match self {
            LookupResult::Defined { location, value } => (location, value),
            undefined => return undefined,
        };
        match value {
            Value::Struct(fields) => match fields.get(key) {
                Some(found) => LookupResult::Defined {
                    location: location.append(key),
                    value: found,
                },
                None => LookupResult::Undefined(Undefined::PathMissing {
                    location: location.append(key),
                }),
            },
            other => LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected: ValueKind::Struct,
                actual: other.kind(),
            }),
        }
    }

    /// Step into an array element. Undefined results are returned unchanged.
    pub fn apply_idx(self, index: usize) -> Self {
        let (location, value) = match self {
            LookupResult::Defined { location, value } => (location, value),
            undefined => return undefined,
        };
        match value {
            Value::Array(items) => match items.get(index) {
                Some(found) => LookupResult::Defined {
                    location: location.append(index),
                    value: found,
                },
                None => LookupResult::Undefined(Undefined::PathMissing {
                    location: location.append(index),
                }),
            },
            other => LookupResult::Undefined(Undefined::InvalidType {
                location,
                expected: ValueKind::Array,
                actual: other.kind(),
            }),
        }
    }

    pub fn apply(self, element: &PathElement) -> Self {
        match element {
            PathElement::Key(key) => self.apply_key(key),
            PathElement::Idx(index) => self.apply_idx(*index),
        }
    }

    pub fn apply_path(self, path: &Path) -> Self {
        let mut current = self;
        for element in path {
            if !current.is_defined() {
                break;
            }
            current = current.apply(element);
        }
        current
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, LookupResult::Defined { .. })
    }

    pub fn location(&self) -> &Location {
        match self {
            LookupResult::Defined { location, .. } => location,
            LookupResult::Undefined(undefined) => undefined.location(),
        }
    }

    pub fn value(&self) -> Option<&'v Value> {
        match self {
            LookupResult::Defined { value, .. } => Some(value),
            LookupResult::Undefined(_) => None,
        }
    }
}
