//! Value types for subdoc
//!
//! This module defines:
//! - Value: the tagged payload variant for document content and fragments
//!
//! ## Canonical Value Model
//!
//! The Value enum has exactly 7 variants, matching what JSON can carry:
//! - Null, Bool, Int, Float, String, Array, Object
//!
//! ### Type Rules
//!
//! - No implicit type coercions
//! - `Int(1) != Float(1.0)`: different types are NEVER equal
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//!
//! Every payload entering the store and every fragment leaving it is one of
//! these variants; callers decode into their own types at the boundary with
//! [`Value::deserialize_into`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Canonical subdoc value type for all API surfaces
///
/// This enum represents the 7 canonical value types in the data model.
/// Document content, operation payloads, and result fragments all use it.
///
/// ## Type Equality
///
/// Different types are NEVER equal, even if they contain the same "value":
/// - `Int(1) != Float(1.0)`
///
/// Float equality follows IEEE-754 semantics:
/// - `NaN != NaN`
/// - `-0.0 == 0.0`
///
/// Equality matters operationally: `ArrayAddUnique` uses it to decide
/// whether a candidate element is already present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object with string keys (JSON object)
    Object(HashMap<String, Value>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            // Different types are NEVER equal
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a float value
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is an object value
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &mut Vec if this is an Array value
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &HashMap if this is an Object value
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as &mut HashMap if this is an Object value
    pub fn as_object_mut(&mut self) -> Option<&mut HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Calculate the maximum nesting depth of this value
    ///
    /// Scalars have depth 0; each container level adds 1. The store rejects
    /// mutations that would push a document past the configured depth limit.
    pub fn nesting_depth(&self) -> usize {
        match self {
            Value::Array(arr) => 1 + arr.iter().map(Value::nesting_depth).max().unwrap_or(0),
            Value::Object(obj) => 1 + obj.values().map(Value::nesting_depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Build a Value from any serializable type
    ///
    /// Routes through `serde_json`, so the result obeys JSON's number model:
    /// integers that fit `i64` become `Int`, everything else `Float`.
    pub fn from_serialize<T: Serialize>(payload: &T) -> Result<Value> {
        let json = serde_json::to_value(payload).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Value::from(json))
    }

    /// Decode this value into a concrete deserializable type
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        let json: serde_json::Value = self.clone().into();
        serde_json::from_value(json).map_err(|e| Error::Decode(e.to_string()))
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(o: HashMap<String, Value>) -> Self {
        Value::Object(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        match o {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// ============================================================================
// serde_json interop for ergonomic JSON construction
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    // Fallback for u64 that doesn't fit in i64
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
