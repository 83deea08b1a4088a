//! Operation records accumulated by the builders
//!
//! An [`Operation`] is one path-addressed instruction inside a batch. The
//! builders only accumulate these records; every semantic decision (does the
//! path exist, is the index in range, is the target an array) is made by the
//! store when the batch executes.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a sub-document operation
///
/// Lookup kinds read without modifying; mutation kinds modify the document.
/// A batch is homogeneous: the lookup builder can only produce lookup kinds
/// and the mutation builder only mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// Read the value at a path
    Get,
    /// Check whether a path exists
    Exists,
    /// Add a new object member
    Insert,
    /// Replace an existing value
    Replace,
    /// Remove a key or array element
    Remove,
    /// Push to the back of an array
    ArrayAppend,
    /// Insert at the front of an array
    ArrayPrepend,
    /// Insert at an explicit array position
    ArrayInsert,
    /// Append only if the value is not already present
    ArrayAddUnique,
    /// Add a signed delta to an integer leaf
    Counter,
}

impl OpKind {
    /// Check if this is a read-only lookup kind
    pub fn is_lookup(&self) -> bool {
        matches!(self, OpKind::Get | OpKind::Exists)
    }

    /// Check if this is a mutation kind
    pub fn is_mutation(&self) -> bool {
        !self.is_lookup()
    }

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Get => "Get",
            OpKind::Exists => "Exists",
            OpKind::Insert => "Insert",
            OpKind::Replace => "Replace",
            OpKind::Remove => "Remove",
            OpKind::ArrayAppend => "ArrayAppend",
            OpKind::ArrayPrepend => "ArrayPrepend",
            OpKind::ArrayInsert => "ArrayInsert",
            OpKind::ArrayAddUnique => "ArrayAddUnique",
            OpKind::Counter => "Counter",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One path-addressed operation within a batch
///
/// The path is kept as the raw submitted string. It is parsed at execution
/// time; a string that does not parse becomes the per-path status
/// `PathInvalid` on the result fragment rather than an append-time error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// What to do
    pub kind: OpKind,
    /// The submitted path string
    pub path: String,
    /// Payload for value-carrying mutations
    pub value: Option<Value>,
    /// Create missing intermediate containers on the way to the target
    pub create_parents: bool,
    /// Signed delta for Counter
    pub delta: Option<i64>,
}

impl Operation {
    /// Create a Get operation
    pub fn get(path: impl Into<String>) -> Self {
        Operation {
            kind: OpKind::Get,
            path: path.into(),
            value: None,
            create_parents: false,
            delta: None,
        }
    }

    /// Create an Exists operation
    pub fn exists(path: impl Into<String>) -> Self {
        Operation {
            kind: OpKind::Exists,
            path: path.into(),
            value: None,
            create_parents: false,
            delta: None,
        }
    }

    /// Create an Insert operation
    pub fn insert(path: impl Into<String>, value: Value, create_parents: bool) -> Self {
        Operation {
            kind: OpKind::Insert,
            path: path.into(),
            value: Some(value),
            create_parents,
            delta: None,
        }
    }

    /// Create a Replace operation
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Operation {
            kind: OpKind::Replace,
            path: path.into(),
            value: Some(value),
            create_parents: false,
            delta: None,
        }
    }

    /// Create a Remove operation
    pub fn remove(path: impl Into<String>) -> Self {
        Operation {
            kind: OpKind::Remove,
            path: path.into(),
            value: None,
            create_parents: false,
            delta: None,
        }
    }

    /// Create an ArrayAppend operation
    pub fn array_append(path: impl Into<String>, value: Value, create_parents: bool) -> Self {
        Operation {
            kind: OpKind::ArrayAppend,
            path: path.into(),
            value: Some(value),
            create_parents,
            delta: None,
        }
    }

    /// Create an ArrayPrepend operation
    pub fn array_prepend(path: impl Into<String>, value: Value, create_parents: bool) -> Self {
        Operation {
            kind: OpKind::ArrayPrepend,
            path: path.into(),
            value: Some(value),
            create_parents,
            delta: None,
        }
    }

    /// Create an ArrayInsert operation
    ///
    /// The path must end in an index segment naming the insert position.
    pub fn array_insert(path: impl Into<String>, value: Value) -> Self {
        Operation {
            kind: OpKind::ArrayInsert,
            path: path.into(),
            value: Some(value),
            create_parents: false,
            delta: None,
        }
    }

    /// Create an ArrayAddUnique operation
    pub fn array_add_unique(path: impl Into<String>, value: Value) -> Self {
        Operation {
            kind: OpKind::ArrayAddUnique,
            path: path.into(),
            value: Some(value),
            create_parents: false,
            delta: None,
        }
    }

    /// Create a Counter operation
    pub fn counter(path: impl Into<String>, delta: i64) -> Self {
        Operation {
            kind: OpKind::Counter,
            path: path.into(),
            value: None,
            create_parents: false,
            delta: Some(delta),
        }
    }

    /// Check if this is a read-only lookup operation
    pub fn is_lookup(&self) -> bool {
        self.kind.is_lookup()
    }

    /// Check if this is a mutation operation
    pub fn is_mutation(&self) -> bool {
        self.kind.is_mutation()
    }
}
