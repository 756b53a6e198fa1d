// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fleet Contributors

//! Newtype identifiers for jobs and nodes.
//!
//! Job/node identifiers are plain strings with no fixed-width encoding —
//! unlike UUID-backed ids, `task{i}` names and `{prefix}_{uuid}` node ids
//! vary in length, so these wrap `String` directly rather than an
//! inline fixed-size buffer.

/// Define a newtype wrapping `String` with the usual string-like ergonomics.
macro_rules! define_string_id {
    ($(#[$meta:meta])* pub struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap any string-like value as this id type.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id! {
    /// Identifies a job/task by its canonical name (`task{i}`, 1-indexed).
    pub struct TaskName;
}

define_string_id! {
    /// Identifies a worker node. Always `{node_id_prefix}_{uuid}` or a bare
    /// uuid when no human prefix was configured (spec.md §6, `node_id`).
    pub struct NodeId;
}

impl TaskName {
    /// Build the canonical task name for a 1-indexed job position.
    pub fn for_index(idx: usize) -> Self {
        Self(format!("task{idx}"))
    }
}

impl NodeId {
    /// Build a node id from an optional human prefix plus a fresh UUID suffix.
    ///
    /// A prefix is always followed by `_` and the UUID; with no prefix the
    /// id is the bare UUID, matching `original_source/fleet/worker.py`.
    pub fn generate(prefix: Option<&str>) -> Self {
        let suffix = uuid::Uuid::new_v4();
        match prefix {
            Some(p) if !p.is_empty() => Self(format!("{p}_{suffix}")),
            _ => Self(suffix.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
