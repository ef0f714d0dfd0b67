use core::fmt::{self, Display};

use crate::path::{Path, PathElement};

/// Absolute position in a document, used to attribute errors.
///
/// Locations are only ever extended while descending; lookup itself works on
/// relative [`Path`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Location(Vec<PathElement>);

impl Location {
    pub fn root() -> Self {
        Location(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn append(&self, element: impl Into<PathElement>) -> Self {
        let mut elements = self.0.clone();
        elements.push(element.into());
        Location(elements)
    }

    pub fn join(&self, path: &Path) -> Self {
        let mut elements = self.0.clone();
        elements.extend(path.iter().cloned());
        Location(elements)
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Location {
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

impl From<Path> for Location {
    fn from(path: Path) -> Self {
        Location(path.into_iter().collect())
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location(path.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let root = Location::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "(root)");
    }

    #[test]
    fn test_append_does_not_mutate() {
        let user = Location::root().append("user");
        let phones = user.append("phones").append(0usize);
        assert_eq!(user.to_string(), "user");
        assert_eq!(phones.to_string(), "user/phones/0");
    }

    #[test]
    fn test_join_path() {
        let location = Location::root()
            .append("user")
            .join(&Path::key("phones").append(1usize));
        assert_eq!(location.to_string(), "user/phones/1");
    }

    #[test]
    fn test_structural_equality() {
        let a = Location::root().append("a").append(1usize);
        let b = Location::from(Path::key("a").append(1usize));
        assert_eq!(a, b);
    }
}
