//! Last-resort provider backed by the host's own permission surface

use std::collections::BTreeSet;
use std::sync::Arc;

use permbridge_api::{dispatch, Completion, PermissionProvider};
use permbridge_sdk::{HostServices, PlayerId};
use tracing::{debug, info};

/// Fallback provider using the host's native permission attachments.
///
/// Selected only when no real backend is installed and the host opted in
/// via configuration. Limitations compared to a real backend:
/// - only works for online players
/// - no group concept (both group queries return empty)
/// - mutations are runtime-only attachments, not persisted
#[derive(Clone)]
pub struct HostNativeProvider {
    host: Arc<dyn HostServices>,
}

impl HostNativeProvider {
    pub fn new(host: Arc<dyn HostServices>) -> Self {
        Self { host }
    }

    fn set_runtime(&self, id: PlayerId, node: &str, value: bool) {
        if self.host.set_runtime_permission(id, node, value) {
            info!(%id, node, value, "runtime permission attachment updated");
        } else {
            debug!(%id, node, "host did not apply runtime permission");
        }
    }
}

impl PermissionProvider for HostNativeProvider {
    fn provider_name(&self) -> String {
        "host-native".to_string()
    }

    fn has(&self, id: PlayerId, node: &str) -> bool {
        match self.host.player_has(id, node) {
            Some(held) => held,
            None => {
                debug!(%id, "player not online for native permission check");
                false
            }
        }
    }

    fn grant(&self, id: PlayerId, node: &str) {
        self.set_runtime(id, node, true);
    }

    fn revoke(&self, id: PlayerId, node: &str) {
        self.set_runtime(id, node, false);
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

    fn groups_of(&self, _id: PlayerId) -> BTreeSet<String> {
        // Native host permissions have no group concept.
        BTreeSet::new()
    }

    fn all_groups(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
