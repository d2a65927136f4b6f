//! Type definitions for parsed paths.

use std::fmt;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key lookup. `name == "*"` iterates every key of the container.
    ///
    /// `nulls` is set by a trailing `?` and allows an explicit `null` to be
    /// written at this position.
    Name { name: String, nulls: bool },
    /// A sequence position. An empty `ix` addresses every element; otherwise it
    /// is a decimal integer, negative values counting from the end.
    ///
    /// `add` is set by a `+` directly after the closing bracket and appends a
    /// new element instead of addressing an existing one.
    Index { ix: String, add: bool },
}

/// A parsed path, outermost segment first.
pub type Path = Vec<PathSegment>;

/// The name that makes a [`PathSegment::Name`] iterate every key.
pub const WILDCARD_NAME: &str = "*";

impl PathSegment {
    pub fn name(name: impl Into<String>) -> Self {
        PathSegment::Name {
            name: name.into(),
            nulls: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        PathSegment::Name {
            name: name.into(),
            nulls: true,
        }
    }

    pub fn index(ix: impl Into<String>) -> Self {
        PathSegment::Index {
            ix: ix.into(),
            add: false,
        }
    }

    pub fn append(ix: impl Into<String>) -> Self {
        PathSegment::Index {
            ix: ix.into(),
            add: true,
        }
    }

    /// Every element (`[]`) or every key (`*`).
    pub fn is_wildcard(&self) -> bool {
        match self {
            PathSegment::Name { name, .. } => name == WILDCARD_NAME,
            PathSegment::Index { ix, .. } => ix.is_empty(),
        }
    }

    /// The numeric position of a concrete index segment.
    pub fn position(&self) -> Option<i64> {
        match self {
            PathSegment::Index { ix, .. } => parse_position(ix),
            PathSegment::Name { .. } => None,
        }
    }
}

/// Parses an index string the way the selector reads it: an optional sign
/// followed by digits. Anything else is not a position.
pub(crate) fn parse_position(ix: &str) -> Option<i64> {
    if ix.is_empty() {
        return None;
    }
    ix.parse().ok()
}

/// Resolves a possibly negative position against a length.
pub(crate) fn resolve_position(pos: i64, len: usize) -> Option<usize> {
    if pos < 0 {
        let from_end = (len as i64).checked_add(pos)?;
        usize::try_from(from_end).ok()
    } else {
        usize::try_from(pos).ok()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Name { name, nulls } => {
                write!(f, "{name}")?;
                if *nulls {
                    f.write_str("?")?;
                }
                Ok(())
            }
            PathSegment::Index { ix, add } => {
                write!(f, "[{ix}]")?;
                if *add {
                    f.write_str("+")?;
                }
                Ok(())
            }
        }
    }
}
