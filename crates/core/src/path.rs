//! Path expressions for sub-document addressing
//!
//! Every operation in a batch targets one location inside a document,
//! written in dotted/bracket syntax:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Object property | `owner` |
//! | `[n]` | Array index | `[0]` |
//! | `key1.key2` | Nested property | `owner.name` |
//! | `key[n]` | Property then index | `toys[2]` |
//! | (empty) | Root (whole document) | `` |
//!
//! Paths are parsed lazily at execution time. The builders accept any
//! string; a string that does not parse surfaces as a per-path status on
//! the result fragment, not as an append-time error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty key in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
}

/// A segment in a sub-document path
///
/// Paths are composed of key segments (object property access)
/// and index segments (array element access).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Object key: `.foo`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, ".{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A path into a document
///
/// Represents a location within a document using a sequence of key and
/// index segments.
///
/// # Examples
///
/// ```
/// use subdoc_core::path::Path;
///
/// // Create paths
/// let root = Path::root();
/// let owner_name = Path::root().key("owner").key("name");
/// let third_toy = Path::root().key("toys").index(2);
///
/// // Parse from string
/// let path: Path = "owner.name".parse().unwrap();
/// assert_eq!(path, owner_name);
/// assert_eq!(path.to_string(), "owner.name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path (empty)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(Segment::Index(idx));
        self
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Convert to a string representation
    pub fn to_path_string(&self) -> String {
        let mut result = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Key(k) => {
                    if !result.is_empty() {
                        result.push('.');
                    }
                    result.push_str(k);
                }
                Segment::Index(i) => {
                    result.push('[');
                    result.push_str(&i.to_string());
                    result.push(']');
                }
            }
        }
        result
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    /// Parse a path from a string
    ///
    /// Supported syntax:
    /// - `foo` or `.foo` - object key
    /// - `[0]` - array index
    /// - `foo.bar` - nested keys
    /// - `foo[0]` - key then index
    /// - `foo[0].bar` - mixed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Path::root());
        }

        let mut segments = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;

        // Skip leading dot if present
        if i < chars.len() && chars[i] == '.' {
            i += 1;
        }

        while i < chars.len() {
            let c = chars[i];

            if c == '.' {
                // Start of a key segment
                i += 1;
                if i >= chars.len() {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' {
                // Array index segment
                let start = i;
                i += 1;
                let idx_start = i;

                // Find closing bracket
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }

                if i >= chars.len() {
                    return Err(PathParseError::UnclosedBracket(start));
                }

                let idx_str: String = chars[idx_start..i].iter().collect();
                let idx = idx_str
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex(idx_start, idx_str))?;

                segments.push(Segment::Index(idx));
                i += 1; // Skip closing bracket
            } else if chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '-' {
                // Key segment
                let key_start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '-')
                {
                    i += 1;
                }
                let key: String = chars[key_start..i].iter().collect();
                segments.push(Segment::Key(key));
            } else {
                return Err(PathParseError::UnexpectedChar(chars[i], i));
            }
        }

        Ok(Path { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_string())
    }
}
