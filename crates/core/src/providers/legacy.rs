//! Adapter for the legacy version-fragmented backend

use std::collections::BTreeSet;
use std::sync::Arc;

use permbridge_api::{dispatch, Completion, PermissionProvider, ResolveError};
use permbridge_sdk::{iface, BackendHandle, HostServices, LegacyEndpoint, PlayerId};

use crate::shim::Shim;

/// Adapter for the version-fragmented backend family.
///
/// Every operation is routed through the [`Shim`], which resolves the
/// call shape of whatever release the host happens to run. One shim
/// instance lives for the adapter's lifetime so shape resolution is paid
/// once per operation.
#[derive(Clone)]
pub struct LegacyProvider {
    endpoint: Arc<dyn LegacyEndpoint>,
    host: Arc<dyn HostServices>,
    shim: Arc<Shim>,
}

impl LegacyProvider {
    /// Acquire the endpoint from the host registry.
    ///
    /// Fails if the entry point cannot actually be acquired, even when
    /// detection considered the backend present.
    pub fn new(host: Arc<dyn HostServices>) -> Result<Self, ResolveError> {
        let Some(BackendHandle::Legacy(endpoint)) = host.backend(iface::LEGACY_ENDPOINT) else {
            return Err(ResolveError::BackendUnavailable {
                iface: iface::LEGACY_ENDPOINT,
            });
        };
        Ok(Self {
            endpoint,
            host,
            shim: Arc::new(Shim::new()),
        })
    }
}

impl PermissionProvider for LegacyProvider {
    fn provider_name(&self) -> String {
        "legacy-endpoint".to_string()
    }

    fn has(&self, id: PlayerId, node: &str) -> bool {
        self.shim
            .check(self.endpoint.as_ref(), self.host.as_ref(), id, node)
    }

    fn grant(&self, id: PlayerId, node: &str) {
        self.shim
            .grant(self.endpoint.as_ref(), self.host.as_ref(), id, node);
    }

    fn revoke(&self, id: PlayerId, node: &str) {
        self.shim
            .revoke(self.endpoint.as_ref(), self.host.as_ref(), id, node);
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
        self.shim
            .groups_of(self.endpoint.as_ref(), self.host.as_ref(), id)
            .into_iter()
            .collect()
    }

    fn all_groups(&self) -> BTreeSet<String> {
        self.shim
            .all_groups(self.endpoint.as_ref())
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use permbridge_sdk::BackendResult;

    use super::*;
    use crate::testutil::MockHost;

    fn id() -> PlayerId {
        PlayerId::new(4)
    }

    /// A release with id-addressed check and unscoped mutations
    #[derive(Default)]
    struct ModernishRelease {
        nodes: Mutex<HashMap<PlayerId, Vec<String>>>,
    }

    impl LegacyEndpoint for ModernishRelease {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn check_id_scoped(
            &self,
            id: PlayerId,
            node: &str,
            _world: Option<&str>,
        ) -> Option<BackendResult<bool>> {
            let nodes = self.nodes.lock().unwrap();
            Some(Ok(nodes
                .get(&id)
                .is_some_and(|held| held.iter().any(|n| n == node))))
        }

        fn add_node(&self, id: PlayerId, node: &str) -> Option<BackendResult<()>> {
            self.nodes
                .lock()
                .unwrap()
                .entry(id)
                .or_default()
                .push(node.to_string());
            Some(Ok(()))
        }

        fn remove_node(&self, id: PlayerId, node: &str) -> Option<BackendResult<()>> {
            if let Some(held) = self.nodes.lock().unwrap().get_mut(&id) {
                held.retain(|n| n != node);
            }
            Some(Ok(()))
        }

        fn group_names(&self, _id: PlayerId) -> Option<BackendResult<Vec<String>>> {
            Some(Ok(vec!["legacy-group".into()]))
        }

        fn known_group_names(&self) -> Option<BackendResult<Vec<String>>> {
            Some(Ok(vec!["legacy-group".into(), "other".into()]))
        }
    }

    fn fixture() -> LegacyProvider {
        let host = Arc::new(
            MockHost::default()
                .with_legacy(Arc::new(ModernishRelease::default()))
                .with_name(id(), "steve"),
        );
        LegacyProvider::new(host).unwrap()
    }

    #[test]
    fn test_construction_fails_without_backend() {
        let host = Arc::new(MockHost::default());
        assert!(matches!(
            LegacyProvider::new(host),
            Err(ResolveError::BackendUnavailable { .. })
        ));
    }

    #[test]
    fn test_grant_check_revoke_round_trip() {
        let provider = fixture();

        assert!(!provider.has(id(), "example.permission"));
        provider.grant(id(), "example.permission");
        assert!(provider.has(id(), "example.permission"));
        provider.revoke(id(), "example.permission");
        assert!(!provider.has(id(), "example.permission"));
    }

    #[test]
    fn test_groups_through_shim() {
        let provider = fixture();
        assert!(provider.groups_of(id()).contains("legacy-group"));
        assert_eq!(provider.all_groups().len(), 2);
    }

    #[test]
    fn test_async_mutation_applies() {
        let provider = fixture();
        provider.grant_async(id(), "async.node").wait().unwrap();
        assert!(provider.has(id(), "async.node"));
    }
}
