//! Family C - legacy version-fragmented endpoint
//!
//! Several incompatible releases of this backend family exist in the
//! wild, each exposing a different subset of call shapes for the same
//! operations. Every candidate shape is a probe method here: the default
//! body returns `None`, meaning *this release does not have that shape*.
//! A release implements exactly the shapes it has.
//!
//! Shape availability must be static per concrete type - it is resolved
//! once per (type, operation) by the compatibility shim and never
//! re-discovered within a session. `Some(Err(_))` means the shape exists
//! but the invocation failed; the shim treats that as a transient failure,
//! not a missing shape.

use std::any::Any;

use crate::error::BackendResult;
use crate::player::PlayerId;

/// Entry point of the version-fragmented backend.
///
/// The `world` argument on scoped shapes carries the caller's context
/// world when one is known; releases ignore it or scope by it as they
/// see fit.
pub trait LegacyEndpoint: Send + Sync + 'static {
    /// Concrete type accessor, used to key per-release call-shape
    /// resolution
    fn as_any(&self) -> &dyn Any;

    // --- permission checks, most specific shape first ---

    /// `has(id, node, world)`
    fn check_id_scoped(
        &self,
        id: PlayerId,
        node: &str,
        world: Option<&str>,
    ) -> Option<BackendResult<bool>> {
        let _ = (id, node, world);
        None
    }

    /// `has(name, node, world)`
    fn check_name_scoped(
        &self,
        name: &str,
        node: &str,
        world: Option<&str>,
    ) -> Option<BackendResult<bool>> {
        let _ = (name, node, world);
        None
    }

    /// `has(id, node)`
    fn check_id(&self, id: PlayerId, node: &str) -> Option<BackendResult<bool>> {
        let _ = (id, node);
        None
    }

    /// `has(name, node)`
    fn check_name(&self, name: &str, node: &str) -> Option<BackendResult<bool>> {
        let _ = (name, node);
        None
    }

    // --- mutations ---

    /// `addPermission(id, node)`
    fn add_node(&self, id: PlayerId, node: &str) -> Option<BackendResult<()>> {
        let _ = (id, node);
        None
    }

    /// `addPermission(id, node, world)`
    fn add_node_scoped(
        &self,
        id: PlayerId,
        node: &str,
        world: Option<&str>,
    ) -> Option<BackendResult<()>> {
        let _ = (id, node, world);
        None
    }

    /// `removePermission(id, node)`
    fn remove_node(&self, id: PlayerId, node: &str) -> Option<BackendResult<()>> {
        let _ = (id, node);
        None
    }

    /// `removePermission(id, node, world)`
    fn remove_node_scoped(
        &self,
        id: PlayerId,
        node: &str,
        world: Option<&str>,
    ) -> Option<BackendResult<()>> {
        let _ = (id, node, world);
        None
    }

    /// Flush a user's pending changes to the backend's store. Best-effort;
    /// releases without an explicit save step omit it.
    fn persist(&self, id: PlayerId) -> Option<BackendResult<()>> {
        let _ = id;
        None
    }

    // --- group queries ---

    /// Direct array-returning group accessor for one user
    fn group_names(&self, id: PlayerId) -> Option<BackendResult<Vec<String>>> {
        let _ = id;
        None
    }

    /// List-returning parent-identifier accessor, scoped by world.
    /// Different releases ship this *instead of* [`group_names`]
    /// (neither name supersedes the other).
    ///
    /// [`group_names`]: LegacyEndpoint::group_names
    fn parent_identifiers(
        &self,
        id: PlayerId,
        world: Option<&str>,
    ) -> Option<BackendResult<Vec<String>>> {
        let _ = (id, world);
        None
    }

    /// All group names known system-wide
    fn known_group_names(&self) -> Option<BackendResult<Vec<String>>> {
        None
    }

    /// All groups as objects, reduced to their names. Some releases stub
    /// [`known_group_names`] with an empty iterable and only populate
    /// this accessor.
    ///
    /// [`known_group_names`]: LegacyEndpoint::known_group_names
    fn group_list(&self) -> Option<BackendResult<Vec<String>>> {
        None
    }
}
