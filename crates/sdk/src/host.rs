//! Host process services
//!
//! What adapters may ask of the process embedding permbridge: backend
//! registry lookups and player addressing. The host implements this once
//! and hands it to resolution at startup.

use std::sync::Arc;

use crate::legacy::LegacyEndpoint;
use crate::node_service::NodeServiceApi;
use crate::player::PlayerId;
use crate::world_store::WorldStoreApi;

/// A backend entry point acquired from the host registry
#[derive(Clone)]
pub enum BackendHandle {
    NodeService(Arc<dyn NodeServiceApi>),
    WorldStore(Arc<dyn WorldStoreApi>),
    Legacy(Arc<dyn LegacyEndpoint>),
}

/// Services provided by the host process
pub trait HostServices: Send + Sync {
    /// Acquire a backend entry point by interface id ([`crate::iface`]).
    /// `None` means the backend is not installed.
    fn backend(&self, id: &str) -> Option<BackendHandle>;

    /// Whether an installed backend is currently enabled. Resolution
    /// treats installed-but-disabled backends as absent.
    fn backend_enabled(&self, id: &str) -> bool;

    /// Last-known name for an identity, `None` if the host has never
    /// seen it
    fn player_name(&self, id: PlayerId) -> Option<String>;

    /// Current world of an online player, `None` when offline
    fn player_world(&self, id: PlayerId) -> Option<String>;

    /// The host's default world, if any world is loaded
    fn default_world(&self) -> Option<String>;

    /// Native permission check through the host's own permission
    /// attachment surface. `None` when the host has no such surface or
    /// the player is not online.
    fn player_has(&self, id: PlayerId, node: &str) -> Option<bool> {
        let _ = (id, node);
        None
    }

    /// Set a runtime-only permission through the host's attachment
    /// surface. Returns whether the host applied it. Not persisted.
    fn set_runtime_permission(&self, id: PlayerId, node: &str, value: bool) -> bool {
        let _ = (id, node, value);
        false
    }
}
