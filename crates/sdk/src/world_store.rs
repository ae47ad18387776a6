//! Family B - legacy world-scoped permission store
//!
//! Permissions live in per-world data sets and players are addressed by
//! name, not id. Adapters resolve the id -> name/world mapping through
//! the host before calling in here.

use std::sync::Arc;

/// Read view over one world's effective permissions
pub trait WorldPermissionView: Send + Sync {
    /// True iff `name` currently holds `node` in this world
    fn has(&self, name: &str, node: &str) -> bool;

    /// Group memberships of `name` in this world
    fn groups_of(&self, name: &str) -> Vec<String>;
}

/// Mutable holder for one world's stored permission data
pub trait WorldDataHolder: Send + Sync {
    fn add_user_permission(&self, name: &str, node: &str);

    fn remove_user_permission(&self, name: &str, node: &str);

    /// All groups defined for this world
    fn group_names(&self) -> Vec<String>;
}

/// Entry point of the world-scoped backend
pub trait WorldStoreApi: Send + Sync {
    /// Effective-permission view for a world, `None` if the world is unknown
    fn world_permissions(&self, world: &str) -> Option<Arc<dyn WorldPermissionView>>;

    /// Stored-data holder for a world, `None` if the world is unknown
    fn world_data(&self, world: &str) -> Option<Arc<dyn WorldDataHolder>>;

    /// Re-sync a live player's effective permissions after a mutation.
    ///
    /// Only meaningful for online players; the default is a no-op for
    /// stores that apply mutations immediately.
    fn refresh_player(&self, name: &str) {
        let _ = name;
    }
}
