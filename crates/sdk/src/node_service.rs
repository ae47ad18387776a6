//! Family A - modern typed permission service
//!
//! The strongly typed backend family. Lookups go through per-user handles
//! with backend-maintained cached permission data; group membership is
//! derived from inheritance nodes.

use std::sync::Arc;

use crate::error::BackendResult;
use crate::player::PlayerId;

/// Three-valued permission lookup result.
///
/// `Undefined` means the node is not set for the user; callers that need
/// a plain boolean treat it as denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    True,
    False,
    Undefined,
}

impl Tristate {
    /// Collapse to a boolean - only an explicit `True` grants
    pub fn as_bool(self) -> bool {
        matches!(self, Tristate::True)
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        if value {
            Tristate::True
        } else {
            Tristate::False
        }
    }
}

/// Kind of a stored node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain permission node
    Permission,
    /// Group membership node (key is `group.<name>`)
    Inheritance,
    Prefix,
    Suffix,
    Meta,
}

/// A node as stored by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub key: String,
    pub kind: NodeKind,
}

impl NodeInfo {
    pub fn new(key: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }

    /// Plain permission node
    pub fn permission(key: impl Into<String>) -> Self {
        Self::new(key, NodeKind::Permission)
    }

    /// Group membership node for `group`
    pub fn inheritance(group: &str) -> Self {
        Self::new(format!("group.{group}"), NodeKind::Inheritance)
    }
}

/// A loaded user held by the service.
///
/// Handles are only obtainable for users the backend has loaded this
/// session; mutations are applied in memory and persisted via
/// [`NodeServiceApi::save_user`].
pub trait NodeServiceUser: Send + Sync {
    /// Cached permission lookup
    fn check(&self, node: &str) -> Tristate;

    /// Add a node to the user's in-memory data
    fn add_node(&self, node: &str);

    /// Remove a node from the user's in-memory data
    fn remove_node(&self, node: &str);

    /// All nodes currently held by the user
    fn nodes(&self) -> Vec<NodeInfo>;
}

/// Entry point of the modern typed backend
pub trait NodeServiceApi: Send + Sync {
    /// Loaded user handle, or `None` if the user is not loaded this session
    fn user(&self, id: PlayerId) -> Option<Arc<dyn NodeServiceUser>>;

    /// Persist a user's current in-memory data
    fn save_user(&self, id: PlayerId) -> BackendResult<()>;

    /// All groups known to the service
    fn loaded_groups(&self) -> Vec<String>;
}
