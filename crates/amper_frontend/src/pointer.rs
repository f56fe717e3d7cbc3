//! Property paths.

use std::fmt;

/// Path from the root of a file to a property, one segment per nesting level.
///
/// Segments are property keys, or decimal indices for properties that share
/// their key with a sibling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    segments: Vec<String>,
}

impl Pointer {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root, which has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: impl Into<String>) -> Pointer {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Pointer { segments }
    }

    /// Path without its last segment, or `None` for the root.
    pub fn parent(&self) -> Option<Pointer> {
        let (_, rest) = self.segments.split_last()?;
        Some(Pointer {
            segments: rest.to_vec(),
        })
    }

    /// Returns true if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Pointer) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// The child of `prefix` on the way to this path.
    ///
    /// ```rust
    /// use amper_frontend::Pointer;
    ///
    /// let path: Pointer = ["settings", "jvm", "target"].into_iter().collect();
    /// let prefix: Pointer = ["settings"].into_iter().collect();
    /// assert_eq!(path.next_after(&prefix).unwrap().to_string(), "settings :: jvm");
    /// assert_eq!(path.next_after(&path), None);
    /// ```
    pub fn next_after(&self, prefix: &Pointer) -> Option<Pointer> {
        if self.len() <= prefix.len() || !self.starts_with(prefix) {
            return None;
        }
        Some(Pointer {
            segments: self.segments[..=prefix.len()].to_vec(),
        })
    }
}

impl<S: Into<String>> FromIterator<S> for Pointer {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Pointer {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(" :: "))
    }
}
