//! Dot-notation path parsing.
//!
//! A path such as `departments.*.users.0.email` is split on `.` into
//! segments. The parser is lexically permissive: doubled dots produce empty
//! keys and no token is ever rejected. There is no escape sequence for a
//! literal `.` or `*` inside a key.

use std::fmt;

/// The wildcard token.
pub const WILDCARD: &str = "*";

/// One `.`-separated token of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A literal map key or record field name.
    Key(String),
    /// A sequence position (a token made only of ASCII digits).
    Index(usize),
    /// `*`: every child of the current node.
    Wildcard,
}

impl PathSegment {
    /// Classify a single token.
    ///
    /// Only canonical decimal integers become indices: tokens with a leading
    /// zero (`07`) or too large for `usize` stay keys, so that rendering an
    /// index back always reproduces the original token.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == WILDCARD {
            return Self::Wildcard;
        }
        let canonical = token == "0" || !token.starts_with('0');
        if canonical && !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse::<usize>() {
                return Self::Index(index);
            }
        }
        Self::Key(token.to_owned())
    }

    /// Whether this segment is `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// The child key this segment addresses, or `None` for a wildcard.
    #[must_use]
    pub fn literal(&self) -> Option<String> {
        match self {
            Self::Key(key) => Some(key.clone()),
            Self::Index(index) => Some(index.to_string()),
            Self::Wildcard => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
            Self::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// Split a path string into segments.
///
/// The empty string yields a single empty [`PathSegment::Key`]; callers that
/// want "the whole tree" for an empty path handle that before parsing.
#[must_use]
pub fn parse(path: &str) -> Vec<PathSegment> {
    path.split('.').map(PathSegment::from_token).collect()
}

/// A parsed path together with its source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath {
    raw: String,
    segments: Vec<PathSegment>,
    wildcards: usize,
}

impl DotPath {
    /// Parse `path` into a [`DotPath`].
    #[must_use]
    pub fn parse(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = parse(&raw);
        let wildcards = segments.iter().filter(|s| s.is_wildcard()).count();
        Self {
            raw,
            segments,
            wildcards,
        }
    }

    /// The path string this was parsed from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether any segment is a wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.wildcards > 0
    }

    /// Number of wildcard segments.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.wildcards
    }

    /// Positions of the wildcard segments, in order.
    #[must_use]
    pub fn wildcard_positions(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_wildcard().then_some(i))
            .collect()
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Render segments back into a dotted string.
#[must_use]
pub fn render(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
