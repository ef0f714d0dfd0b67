use core::fmt::{self, Display};

use thisisplural::Plural;

/// One step through a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Field of a struct.
    Key(String),
    /// Element of an array.
    Idx(usize),
}

impl Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => write!(f, "{}", key),
            PathElement::Idx(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<String> for PathElement {
    fn from(key: String) -> Self {
        PathElement::Key(key)
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Idx(index)
    }
}

/// A relative path, resolved against some value by lookup.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, from_iter, new)]
pub struct Path(Vec<PathElement>);

impl Path {
    /// The empty path; lookup with it yields the value itself.
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Single-element path `name`.
    pub fn key(name: impl Into<String>) -> Self {
        Path(vec![PathElement::Key(name.into())])
    }

    /// Single-element path `[index]`.
    pub fn idx(index: usize) -> Self {
        Path(vec![PathElement::Idx(index)])
    }

    pub fn append(mut self, element: impl Into<PathElement>) -> Self {
        self.0.push(element.into());
        self
    }

    pub fn join(mut self, other: &Path) -> Self {
        self.0.extend(other.0.iter().cloned());
        self
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn first(&self) -> Option<&PathElement> {
        self.0.first()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, element) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Path::key(name)
    }
}

impl From<String> for Path {
    fn from(name: String) -> Self {
        Path::key(name)
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        Path::idx(index)
    }
}

impl From<PathElement> for Path {
    fn from(element: PathElement) -> Self {
        Path(vec![element])
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Path(elements)
    }
}

// ============================================================================
// Paths
// ============================================================================

/// Non-empty, ordered alternatives for where a property may live.
///
/// Earlier paths take precedence. Duplicates are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paths(Vec<Path>);

impl Paths {
    pub fn new(path: impl Into<Path>) -> Self {
        Paths(vec![path.into()])
    }

    /// Add a lower-precedence alternative.
    pub fn or(mut self, path: impl Into<Path>) -> Self {
        self.0.push(path.into());
        self
    }

    /// Append all alternatives of `other` after those of `self`.
    pub fn append(mut self, other: Paths) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Path> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Highest-precedence path.
    pub fn head(&self) -> &Path {
        &self.0[0]
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = &'a Path;
    type IntoIter = core::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

macro_rules! paths_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Paths {
                fn from(path: $ty) -> Self {
                    Paths::new(path)
                }
            }
        )*
    };
}

paths_from!(&str, String, usize, PathElement, Path);

impl Display for Paths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", path)?;
        }
        Ok(())
    }
}
