//! Shared test fixtures

use std::collections::HashMap;
use std::sync::Arc;

use permbridge_sdk::{
    iface, BackendHandle, HostServices, LegacyEndpoint, NodeServiceApi, PlayerId, WorldStoreApi,
};

/// Host stub with configurable backends and player addressing
#[derive(Default)]
pub struct MockHost {
    pub node_service: Option<Arc<dyn NodeServiceApi>>,
    pub world_store: Option<Arc<dyn WorldStoreApi>>,
    pub legacy: Option<Arc<dyn LegacyEndpoint>>,
    pub disabled: Vec<&'static str>,
    pub names: HashMap<PlayerId, String>,
    pub worlds: HashMap<PlayerId, String>,
    pub default_world: Option<String>,
}

impl MockHost {
    pub fn with_node_service(mut self, api: Arc<dyn NodeServiceApi>) -> Self {
        self.node_service = Some(api);
        self
    }

    pub fn with_world_store(mut self, store: Arc<dyn WorldStoreApi>) -> Self {
        self.world_store = Some(store);
        self
    }

    pub fn with_legacy(mut self, endpoint: Arc<dyn LegacyEndpoint>) -> Self {
        self.legacy = Some(endpoint);
        self
    }

    pub fn with_disabled(mut self, id: &'static str) -> Self {
        self.disabled.push(id);
        self
    }

    pub fn with_name(mut self, id: PlayerId, name: &str) -> Self {
        self.names.insert(id, name.to_string());
        self
    }

    pub fn with_world(mut self, id: PlayerId, world: &str) -> Self {
        self.worlds.insert(id, world.to_string());
        self
    }

    pub fn with_default_world(mut self, world: &str) -> Self {
        self.default_world = Some(world.to_string());
        self
    }
}

impl HostServices for MockHost {
    fn backend(&self, id: &str) -> Option<BackendHandle> {
        match id {
            iface::NODE_SERVICE => self.node_service.clone().map(BackendHandle::NodeService),
            iface::WORLD_STORE => self.world_store.clone().map(BackendHandle::WorldStore),
            iface::LEGACY_ENDPOINT => self.legacy.clone().map(BackendHandle::Legacy),
            _ => None,
        }
    }

    fn backend_enabled(&self, id: &str) -> bool {
        !self.disabled.iter().any(|d| *d == id) && self.backend(id).is_some()
    }

    fn player_name(&self, id: PlayerId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    fn player_world(&self, id: PlayerId) -> Option<String> {
        self.worlds.get(&id).cloned()
    }

    fn default_world(&self) -> Option<String> {
        self.default_world.clone()
    }
}
