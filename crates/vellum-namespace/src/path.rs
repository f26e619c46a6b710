//! Hierarchical namespace paths.

use std::fmt;

use smallvec::SmallVec;

use crate::error::NamespaceError;

/// A namespace path: a non-empty sequence of non-empty segments.
///
/// Matching is case-sensitive and exact — no globbing, no
/// normalisation. Uses `SmallVec<[String; 4]>` so the common shallow
/// paths stay off the heap; deeper hierarchies spill transparently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamePath {
    segments: SmallVec<[String; 4]>,
}

impl NamePath {
    /// Parse a `/`-separated path string.
    ///
    /// Rejects the empty string and any empty segment (leading,
    /// trailing, or doubled separators).
    pub fn parse(path: &str) -> Result<Self, NamespaceError> {
        if path.is_empty() {
            return Err(NamespaceError::InvalidPath {
                path: path.to_string(),
            });
        }
        let mut segments = SmallVec::new();
        for segment in path.split('/') {
            if segment.is_empty() {
                return Err(NamespaceError::InvalidPath {
                    path: path.to_string(),
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// The path's segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl TryFrom<&str> for NamePath {
    type Error = NamespaceError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::parse(path)
    }
}
