//! Fully-qualified namespace names.

use smol_str::SmolStr;
use std::fmt;

/// A dot-qualified namespace name such as `a.b.c`.
///
/// The root namespace is the empty string. Equality and hashing are
/// structural over the text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FqName(SmolStr);

impl FqName {
    /// The root namespace.
    pub fn root() -> Self {
        Self(SmolStr::default())
    }

    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    /// Build a name from segments, skipping empty ones.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push('.');
            }
            text.push_str(segment);
        }
        Self(SmolStr::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments of the name; empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Last segment, or `""` for the root.
    pub fn short_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The enclosing namespace. `None` for the root.
    pub fn parent(&self) -> Option<FqName> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.rfind('.') {
            Some(idx) => Self(SmolStr::new(&self.0[..idx])),
            None => Self::root(),
        })
    }

    pub fn child(&self, name: &str) -> FqName {
        if self.is_root() {
            Self(SmolStr::new(name))
        } else {
            Self(SmolStr::new(format!("{}.{}", self.0, name)))
        }
    }

    /// Segment-wise prefix test; every name starts with the root.
    pub fn starts_with(&self, other: &FqName) -> bool {
        if other.is_root() {
            return true;
        }
        match self.0.strip_prefix(other.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FqName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for FqName {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for FqName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let root = FqName::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.segments().count(), 0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.short_name(), "");
    }

    #[test]
    fn test_parent_and_short_name() {
        let name = FqName::from("a.b.c");
        assert_eq!(name.short_name(), "c");
        assert_eq!(name.parent(), Some(FqName::from("a.b")));
        assert_eq!(FqName::from("a").parent(), Some(FqName::root()));
    }

    #[test]
    fn test_child() {
        assert_eq!(FqName::root().child("a"), FqName::from("a"));
        assert_eq!(FqName::from("a").child("b"), FqName::from("a.b"));
    }

    #[test]
    fn test_from_segments_skips_empty() {
        assert_eq!(FqName::from_segments(["a", "", "b"]), FqName::from("a.b"));
        assert_eq!(FqName::from_segments(Vec::<&str>::new()), FqName::root());
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let name = FqName::from("kotlin.collections");
        assert!(name.starts_with(&FqName::from("kotlin")));
        assert!(name.starts_with(&FqName::root()));
        assert!(!name.starts_with(&FqName::from("kot")));
    }
}
