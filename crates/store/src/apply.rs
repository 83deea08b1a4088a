//! Per-operation execution against a document tree
//!
//! This module is the semantic core of the store: given one [`Operation`]
//! and a document root, it resolves the path and applies the operation,
//! reporting the outcome as a per-path [`OpStatus`]. Nothing here aborts a
//! batch; the caller records each outcome and moves on to the next
//! operation.
//!
//! ## Status mapping
//!
//! - A key or element that simply is not there is `PathNotFound`.
//! - A scalar (or wrong container kind) standing where the path needs a
//!   container is `PathMismatch`.
//! - A path string that does not parse, exceeds the segment limit, is root
//!   for a mutation, or has the wrong shape for the operation kind is
//!   `PathInvalid`.
//!
//! `create_parents` follows the same materialization rule as whole-value
//! writes: a missing key link is created as an object or an array depending
//! on the next segment. Missing array slots are never fabricated.

use std::collections::HashMap;
use subdoc_core::path::{Path, Segment};
use subdoc_core::{Limits, OpKind, Operation, OpStatus, Value};

/// Outcome of executing one operation
#[derive(Debug, Clone, PartialEq)]
pub struct OpOutcome {
    /// Per-path status
    pub status: OpStatus,
    /// Payload carried back on the fragment, if the operation produces one
    pub value: Option<Value>,
    /// True if the document tree was modified
    pub mutated: bool,
}

impl OpOutcome {
    fn fail(status: OpStatus) -> Self {
        OpOutcome {
            status,
            value: None,
            mutated: false,
        }
    }

    fn ok(value: Option<Value>, mutated: bool) -> Self {
        OpOutcome {
            status: OpStatus::Success,
            value,
            mutated,
        }
    }
}

enum Nav<'a> {
    Found(&'a Value),
    Missing,
    Mismatch,
}

enum NavMut<'a> {
    Found(&'a mut Value),
    Missing,
    Mismatch,
}

/// Execute a read-only lookup operation
///
/// Handles `Get` and `Exists`. A mutation kind handed to a lookup batch is
/// reported as `PathInvalid` rather than silently applied.
pub fn lookup(root: &Value, op: &Operation, limits: &Limits) -> OpOutcome {
    let path = match parse_path(&op.path, limits) {
        Ok(path) => path,
        Err(status) => return OpOutcome::fail(status),
    };

    match op.kind {
        OpKind::Get => match navigate(root, path.segments()) {
            Nav::Found(v) => OpOutcome::ok(Some(v.clone()), false),
            Nav::Missing => OpOutcome::fail(OpStatus::PathNotFound),
            Nav::Mismatch => OpOutcome::fail(OpStatus::PathMismatch),
        },
        OpKind::Exists => {
            let found = matches!(navigate(root, path.segments()), Nav::Found(_));
            OpOutcome {
                status: if found {
                    OpStatus::Success
                } else {
                    OpStatus::PathNotFound
                },
                value: Some(Value::Bool(found)),
                mutated: false,
            }
        }
        _ => OpOutcome::fail(OpStatus::PathInvalid),
    }
}

/// Execute a mutation operation against a working copy of the document
///
/// A lookup kind handed to a mutation batch is reported as `PathInvalid`.
/// The root path is never a legal mutation target; whole-document
/// replacement goes through upsert.
pub fn mutate(root: &mut Value, op: &Operation, limits: &Limits) -> OpOutcome {
    let path = match parse_path(&op.path, limits) {
        Ok(path) => path,
        Err(status) => return OpOutcome::fail(status),
    };

    if path.is_root() {
        return OpOutcome::fail(OpStatus::PathInvalid);
    }

    if op.create_parents {
        // Containers created on the way to a failing target must not
        // survive the failure
        let mut scratch = root.clone();
        let outcome = dispatch(&mut scratch, &path, op, limits);
        if outcome.mutated {
            *root = scratch;
        }
        return outcome;
    }

    dispatch(root, &path, op, limits)
}

fn dispatch(root: &mut Value, path: &Path, op: &Operation, limits: &Limits) -> OpOutcome {
    match op.kind {
        OpKind::Insert => insert(root, path, op, limits),
        OpKind::Replace => replace(root, path, op, limits),
        OpKind::Remove => remove(root, path),
        OpKind::ArrayAppend => array_push(root, path, op, limits, ArrayEnd::Back),
        OpKind::ArrayPrepend => array_push(root, path, op, limits, ArrayEnd::Front),
        OpKind::ArrayInsert => array_insert(root, path, op, limits),
        OpKind::ArrayAddUnique => array_add_unique(root, path, op, limits),
        OpKind::Counter => counter(root, path, op, limits),
        OpKind::Get | OpKind::Exists => OpOutcome::fail(OpStatus::PathInvalid),
    }
}

fn parse_path(raw: &str, limits: &Limits) -> Result<Path, OpStatus> {
    let path: Path = raw.parse().map_err(|_| OpStatus::PathInvalid)?;
    if path.len() > limits.max_path_segments {
        return Err(OpStatus::PathInvalid);
    }
    Ok(path)
}

fn navigate<'a>(root: &'a Value, segments: &[Segment]) -> Nav<'a> {
    let mut current = root;

    for segment in segments {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(obj)) => match obj.get(key) {
                Some(next) => next,
                None => return Nav::Missing,
            },
            (Segment::Index(idx), Value::Array(arr)) => match arr.get(*idx) {
                Some(next) => next,
                None => return Nav::Missing,
            },
            _ => return Nav::Mismatch,
        };
    }

    Nav::Found(current)
}

fn navigate_mut<'a>(root: &'a mut Value, segments: &[Segment]) -> NavMut<'a> {
    let mut current = root;

    for segment in segments {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(obj)) => match obj.get_mut(key) {
                Some(next) => next,
                None => return NavMut::Missing,
            },
            (Segment::Index(idx), Value::Array(arr)) => match arr.get_mut(*idx) {
                Some(next) => next,
                None => return NavMut::Missing,
            },
            _ => return NavMut::Mismatch,
        };
    }

    NavMut::Found(current)
}

/// Navigate to the parent of the last segment, creating missing key links
///
/// The created container is an object when the following segment is a key
/// and an array when it is an index. Missing array slots are not created;
/// they report `PathNotFound` like the non-creating walk.
fn navigate_parent_creating<'a>(
    root: &'a mut Value,
    segments: &[Segment],
) -> Result<&'a mut Value, OpStatus> {
    let parent_segments = &segments[..segments.len() - 1];
    let mut current = root;

    for (i, segment) in parent_segments.iter().enumerate() {
        let next_segment = &segments[i + 1];
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(obj)) => {
                if !obj.contains_key(key) {
                    let new_container = match next_segment {
                        Segment::Key(_) => Value::Object(HashMap::new()),
                        Segment::Index(_) => Value::Array(Vec::new()),
                    };
                    obj.insert(key.clone(), new_container);
                }
                obj.get_mut(key).unwrap()
            }
            (Segment::Index(idx), Value::Array(arr)) => match arr.get_mut(*idx) {
                Some(next) => next,
                None => return Err(OpStatus::PathNotFound),
            },
            _ => return Err(OpStatus::PathMismatch),
        };
    }

    Ok(current)
}

/// Largest depth this branch reaches after placing `payload` at `base_len`
/// segments below the root
fn branch_depth(base_len: usize, payload: &Value) -> usize {
    base_len + payload.nesting_depth()
}

fn insert(root: &mut Value, path: &Path, op: &Operation, limits: &Limits) -> OpOutcome {
    let key = match path.last_segment() {
        Some(Segment::Key(key)) => key.clone(),
        // Insert adds object members; an index target is a structure conflict
        _ => return OpOutcome::fail(OpStatus::PathMismatch),
    };
    let Some(value) = op.value.clone() else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    if branch_depth(path.len(), &value) > limits.max_nesting_depth {
        return OpOutcome::fail(OpStatus::ValueTooDeep);
    }

    let parent = if op.create_parents {
        match navigate_parent_creating(root, path.segments()) {
            Ok(parent) => parent,
            Err(status) => return OpOutcome::fail(status),
        }
    } else {
        let parent_segments = &path.segments()[..path.len() - 1];
        match navigate_mut(root, parent_segments) {
            NavMut::Found(parent) => parent,
            NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
            NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
        }
    };

    let Some(obj) = parent.as_object_mut() else {
        return OpOutcome::fail(OpStatus::PathMismatch);
    };
    if obj.contains_key(&key) {
        return OpOutcome::fail(OpStatus::PathExists);
    }
    obj.insert(key, value);
    OpOutcome::ok(None, true)
}

fn replace(root: &mut Value, path: &Path, op: &Operation, limits: &Limits) -> OpOutcome {
    let Some(value) = op.value.clone() else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    if branch_depth(path.len(), &value) > limits.max_nesting_depth {
        return OpOutcome::fail(OpStatus::ValueTooDeep);
    }

    let parent_segments = &path.segments()[..path.len() - 1];
    let parent = match navigate_mut(root, parent_segments) {
        NavMut::Found(parent) => parent,
        NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
        NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    match (path.last_segment(), parent) {
        (Some(Segment::Key(key)), Value::Object(obj)) => match obj.get_mut(key) {
            Some(slot) => {
                *slot = value;
                OpOutcome::ok(None, true)
            }
            None => OpOutcome::fail(OpStatus::PathNotFound),
        },
        (Some(Segment::Index(idx)), Value::Array(arr)) => {
            if *idx < arr.len() {
                arr[*idx] = value;
                OpOutcome::ok(None, true)
            } else {
                OpOutcome::fail(OpStatus::IndexOutOfBounds)
            }
        }
        _ => OpOutcome::fail(OpStatus::PathMismatch),
    }
}

fn remove(root: &mut Value, path: &Path) -> OpOutcome {
    let parent_segments = &path.segments()[..path.len() - 1];
    let parent = match navigate_mut(root, parent_segments) {
        NavMut::Found(parent) => parent,
        NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
        NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    match (path.last_segment(), parent) {
        (Some(Segment::Key(key)), Value::Object(obj)) => {
            if obj.remove(key).is_some() {
                OpOutcome::ok(None, true)
            } else {
                OpOutcome::fail(OpStatus::PathNotFound)
            }
        }
        (Some(Segment::Index(idx)), Value::Array(arr)) => {
            if *idx < arr.len() {
                // Removing an element shifts the tail left
                arr.remove(*idx);
                OpOutcome::ok(None, true)
            } else {
                OpOutcome::fail(OpStatus::PathNotFound)
            }
        }
        _ => OpOutcome::fail(OpStatus::PathMismatch),
    }
}

enum ArrayEnd {
    Front,
    Back,
}

fn array_push(
    root: &mut Value,
    path: &Path,
    op: &Operation,
    limits: &Limits,
    end: ArrayEnd,
) -> OpOutcome {
    let Some(value) = op.value.clone() else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    // The element lands one level inside the array at `path`
    if branch_depth(path.len() + 1, &value) > limits.max_nesting_depth {
        return OpOutcome::fail(OpStatus::ValueTooDeep);
    }

    let target = if op.create_parents {
        let parent = match navigate_parent_creating(root, path.segments()) {
            Ok(parent) => parent,
            Err(status) => return OpOutcome::fail(status),
        };
        match (path.last_segment(), parent) {
            (Some(Segment::Key(key)), Value::Object(obj)) => obj
                .entry(key.clone())
                .or_insert_with(|| Value::Array(Vec::new())),
            (Some(Segment::Index(idx)), Value::Array(arr)) => match arr.get_mut(*idx) {
                Some(slot) => slot,
                None => return OpOutcome::fail(OpStatus::PathNotFound),
            },
            _ => return OpOutcome::fail(OpStatus::PathMismatch),
        }
    } else {
        match navigate_mut(root, path.segments()) {
            NavMut::Found(target) => target,
            NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
            NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
        }
    };

    let Some(arr) = target.as_array_mut() else {
        return OpOutcome::fail(OpStatus::PathMismatch);
    };
    if arr.len() >= limits.max_array_len {
        return OpOutcome::fail(OpStatus::IndexOutOfBounds);
    }
    match end {
        ArrayEnd::Back => arr.push(value),
        ArrayEnd::Front => arr.insert(0, value),
    }
    OpOutcome::ok(None, true)
}

fn array_insert(root: &mut Value, path: &Path, op: &Operation, limits: &Limits) -> OpOutcome {
    let idx = match path.last_segment() {
        Some(Segment::Index(idx)) => *idx,
        // The insert position must be spelled in the path
        _ => return OpOutcome::fail(OpStatus::PathInvalid),
    };
    let Some(value) = op.value.clone() else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    if branch_depth(path.len(), &value) > limits.max_nesting_depth {
        return OpOutcome::fail(OpStatus::ValueTooDeep);
    }

    let parent_segments = &path.segments()[..path.len() - 1];
    let parent = match navigate_mut(root, parent_segments) {
        NavMut::Found(parent) => parent,
        NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
        NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    let Some(arr) = parent.as_array_mut() else {
        return OpOutcome::fail(OpStatus::PathMismatch);
    };
    if idx > arr.len() || arr.len() >= limits.max_array_len {
        return OpOutcome::fail(OpStatus::IndexOutOfBounds);
    }
    // Valid positions are 0..=len; inserting at len appends
    arr.insert(idx, value);
    OpOutcome::ok(None, true)
}

fn array_add_unique(root: &mut Value, path: &Path, op: &Operation, limits: &Limits) -> OpOutcome {
    let Some(value) = op.value.clone() else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    if branch_depth(path.len() + 1, &value) > limits.max_nesting_depth {
        return OpOutcome::fail(OpStatus::ValueTooDeep);
    }

    let target = match navigate_mut(root, path.segments()) {
        NavMut::Found(target) => target,
        NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
        NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    let Some(arr) = target.as_array_mut() else {
        return OpOutcome::fail(OpStatus::PathMismatch);
    };
    if arr.iter().any(|element| element == &value) {
        return OpOutcome::fail(OpStatus::PathExists);
    }
    if arr.len() >= limits.max_array_len {
        return OpOutcome::fail(OpStatus::IndexOutOfBounds);
    }
    arr.push(value);
    OpOutcome::ok(None, true)
}

fn counter(root: &mut Value, path: &Path, op: &Operation, _limits: &Limits) -> OpOutcome {
    let Some(delta) = op.delta else {
        return OpOutcome::fail(OpStatus::PathInvalid);
    };

    let parent_segments = &path.segments()[..path.len() - 1];
    let parent = match navigate_mut(root, parent_segments) {
        NavMut::Found(parent) => parent,
        NavMut::Missing => return OpOutcome::fail(OpStatus::PathNotFound),
        NavMut::Mismatch => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    let slot = match (path.last_segment(), parent) {
        (Some(Segment::Key(key)), Value::Object(obj)) => {
            // An absent leaf starts from zero
            obj.entry(key.clone()).or_insert(Value::Int(0))
        }
        (Some(Segment::Index(idx)), Value::Array(arr)) => match arr.get_mut(*idx) {
            Some(slot) => slot,
            None => return OpOutcome::fail(OpStatus::PathNotFound),
        },
        _ => return OpOutcome::fail(OpStatus::PathMismatch),
    };

    let Some(current) = slot.as_int() else {
        return OpOutcome::fail(OpStatus::PathMismatch);
    };
    let Some(next) = current.checked_add(delta) else {
        return OpOutcome::fail(OpStatus::DeltaOutOfRange);
    };
    *slot = Value::Int(next);
    OpOutcome::ok(Some(Value::Int(next)), true)
}
