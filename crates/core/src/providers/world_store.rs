//! Adapter for the legacy world-scoped permission store

use std::collections::BTreeSet;
use std::sync::Arc;

use permbridge_api::{dispatch, Completion, PermissionProvider, ResolveError};
use permbridge_sdk::{iface, BackendHandle, HostServices, PlayerId, WorldStoreApi};
use tracing::debug;

/// Adapter for the world-scoped backend family.
///
/// The store addresses players by name within per-world data sets, so
/// every call first resolves the identity through the host. Strategy is
/// online-first: an online player's current world is used; offline
/// mutations and group lookups fall back to the host's default world.
/// Checks are online-only - the store has no effective-permission view
/// for players that are not in a world.
#[derive(Clone)]
pub struct WorldStoreProvider {
    store: Arc<dyn WorldStoreApi>,
    host: Arc<dyn HostServices>,
}

impl WorldStoreProvider {
    /// Acquire the store from the host registry.
    ///
    /// Fails if the entry point cannot actually be acquired, even when
    /// detection considered the backend present.
    pub fn new(host: Arc<dyn HostServices>) -> Result<Self, ResolveError> {
        let Some(BackendHandle::WorldStore(store)) = host.backend(iface::WORLD_STORE) else {
            return Err(ResolveError::BackendUnavailable {
                iface: iface::WORLD_STORE,
            });
        };
        Ok(Self { store, host })
    }

    /// World to address for an identity: current world when online, host
    /// default otherwise
    fn target_world(&self, id: PlayerId) -> Option<String> {
        self.host
            .player_world(id)
            .or_else(|| self.host.default_world())
    }

    fn mutate(&self, id: PlayerId, node: &str, add: bool) {
        let Some(name) = self.host.player_name(id) else {
            debug!(%id, "cannot mutate permissions, identity unknown to host");
            return;
        };
        let online = self.host.player_world(id);
        let Some(world) = online.clone().or_else(|| self.host.default_world()) else {
            debug!(%id, "cannot mutate permissions, no world to address");
            return;
        };
        let Some(data) = self.store.world_data(&world) else {
            debug!(%world, "world unknown to permission store");
            return;
        };

        if add {
            data.add_user_permission(&name, node);
        } else {
            data.remove_user_permission(&name, node);
        }

        // Live players need their effective permissions re-synced.
        if online.is_some() {
            self.store.refresh_player(&name);
        }
    }
}

impl PermissionProvider for WorldStoreProvider {
    fn provider_name(&self) -> String {
        "world-store".to_string()
    }

    fn has(&self, id: PlayerId, node: &str) -> bool {
        let Some(world) = self.host.player_world(id) else {
            debug!(%id, "player not online for permission check");
            return false;
        };
        let Some(name) = self.host.player_name(id) else {
            return false;
        };
        let Some(view) = self.store.world_permissions(&world) else {
            debug!(%world, "world unknown to permission store");
            return false;
        };
        view.has(&name, node)
    }

    fn grant(&self, id: PlayerId, node: &str) {
        self.mutate(id, node, true);
    }

    fn revoke(&self, id: PlayerId, node: &str) {
        self.mutate(id, node, false);
    }

    fn grant_async(&self, id: PlayerId, node: &str) -> Completion {
        let this = self.clone();
        let node = node.to_string();
        dispatch(move || {
            this.grant(id, &node);
            Ok(())
        })
    }

    fn revoke_async(&self, id: PlayerId, node: &str) -> Completion {
        let this = self.clone();
        let node = node.to_string();
        dispatch(move || {
            this.revoke(id, &node);
            Ok(())
        })
    }

    fn groups_of(&self, id: PlayerId) -> BTreeSet<String> {
        let Some(name) = self.host.player_name(id) else {
            return BTreeSet::new();
        };
        let Some(world) = self.target_world(id) else {
            return BTreeSet::new();
        };
        let Some(view) = self.store.world_permissions(&world) else {
            return BTreeSet::new();
        };
        view.groups_of(&name).into_iter().collect()
    }

    fn all_groups(&self) -> BTreeSet<String> {
        let Some(world) = self.host.default_world() else {
            return BTreeSet::new();
        };
        let Some(data) = self.store.world_data(&world) else {
            return BTreeSet::new();
        };
        data.group_names().into_iter().collect()
    }
}
