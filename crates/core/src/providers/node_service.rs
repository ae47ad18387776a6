//! Adapter for the modern typed permission service

use std::collections::BTreeSet;
use std::sync::Arc;

use permbridge_api::{dispatch, Completion, PermissionProvider, ProviderError, ResolveError};
use permbridge_sdk::{iface, BackendHandle, HostServices, NodeKind, NodeServiceApi, PlayerId};
use tracing::{debug, warn};

/// Key prefix of inheritance nodes
const GROUP_PREFIX: &str = "group.";

/// Adapter for the strongly typed backend family.
///
/// All calls are direct: the service's own API covers the whole
/// contract, so nothing here goes through the compatibility shim.
#[derive(Clone)]
pub struct NodeServiceProvider {
    api: Arc<dyn NodeServiceApi>,
}

impl NodeServiceProvider {
    /// Acquire the service from the host registry.
    ///
    /// Fails if the entry point cannot actually be acquired, even when
    /// detection considered the backend present.
    pub fn new(host: &dyn HostServices) -> Result<Self, ResolveError> {
        let Some(BackendHandle::NodeService(api)) = host.backend(iface::NODE_SERVICE) else {
            return Err(ResolveError::BackendUnavailable {
                iface: iface::NODE_SERVICE,
            });
        };
        Ok(Self { api })
    }
}

impl PermissionProvider for NodeServiceProvider {
    fn provider_name(&self) -> String {
        "node-service".to_string()
    }

    fn has(&self, id: PlayerId, node: &str) -> bool {
        let Some(user) = self.api.user(id) else {
            debug!(%id, "user not loaded for permission check");
            return false;
        };
        user.check(node).as_bool()
    }

    fn grant(&self, id: PlayerId, node: &str) {
        let Some(user) = self.api.user(id) else {
            debug!(%id, "cannot grant, user not loaded");
            return;
        };
        user.add_node(node);
        if let Err(e) = self.api.save_user(id) {
            warn!(%id, error = %e, "failed to persist permission grant");
        }
    }

    fn revoke(&self, id: PlayerId, node: &str) {
        let Some(user) = self.api.user(id) else {
            debug!(%id, "cannot revoke, user not loaded");
            return;
        };
        user.remove_node(node);
        if let Err(e) = self.api.save_user(id) {
            warn!(%id, error = %e, "failed to persist permission revoke");
        }
    }

    fn grant_async(&self, id: PlayerId, node: &str) -> Completion {
        let api = Arc::clone(&self.api);
        let node = node.to_string();
        dispatch(move || {
            let Some(user) = api.user(id) else {
                debug!(%id, "cannot grant, user not loaded");
                return Ok(());
            };
            user.add_node(&node);
            api.save_user(id).map_err(ProviderError::from)
        })
    }

    fn revoke_async(&self, id: PlayerId, node: &str) -> Completion {
        let api = Arc::clone(&self.api);
        let node = node.to_string();
        dispatch(move || {
            let Some(user) = api.user(id) else {
                debug!(%id, "cannot revoke, user not loaded");
                return Ok(());
            };
            user.remove_node(&node);
            api.save_user(id).map_err(ProviderError::from)
        })
    }

    fn groups_of(&self, id: PlayerId) -> BTreeSet<String> {
        let Some(user) = self.api.user(id) else {
            debug!(%id, "user not loaded for group lookup");
            return BTreeSet::new();
        };
        user.nodes()
            .into_iter()
            .filter(|node| node.kind == NodeKind::Inheritance)
            .map(|node| node.key.trim_start_matches(GROUP_PREFIX).to_string())
            .collect()
    }

    fn all_groups(&self) -> BTreeSet<String> {
        self.api.loaded_groups().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use permbridge_sdk::{BackendError, BackendResult, NodeInfo, NodeServiceUser, Tristate};

    use super::*;
    use crate::testutil::MockHost;

    fn id() -> PlayerId {
        PlayerId::new(1)
    }

    struct MockUser {
        nodes: Mutex<Vec<NodeInfo>>,
    }

    impl MockUser {
        fn new(nodes: Vec<NodeInfo>) -> Self {
            Self {
                nodes: Mutex::new(nodes),
            }
        }
    }

    impl NodeServiceUser for MockUser {
        fn check(&self, node: &str) -> Tristate {
            let nodes = self.nodes.lock().unwrap();
            if nodes.iter().any(|n| n.key == node) {
                Tristate::True
            } else {
                Tristate::Undefined
            }
        }

        fn add_node(&self, node: &str) {
            self.nodes.lock().unwrap().push(NodeInfo::permission(node));
        }

        fn remove_node(&self, node: &str) {
            self.nodes.lock().unwrap().retain(|n| n.key != node);
        }

        fn nodes(&self) -> Vec<NodeInfo> {
            self.nodes.lock().unwrap().clone()
        }
    }

    struct MockService {
        user: Arc<MockUser>,
        save_fails: bool,
    }

    impl NodeServiceApi for MockService {
        fn user(&self, id: PlayerId) -> Option<Arc<dyn NodeServiceUser>> {
            // Only the fixture player is ever loaded.
            (id == PlayerId::new(1)).then(|| self.user.clone() as Arc<dyn NodeServiceUser>)
        }

        fn save_user(&self, _id: PlayerId) -> BackendResult<()> {
            if self.save_fails {
                Err(BackendError::new("storage gone"))
            } else {
                Ok(())
            }
        }

        fn loaded_groups(&self) -> Vec<String> {
            vec!["admin".into(), "default".into()]
        }
    }

    fn provider(save_fails: bool) -> (NodeServiceProvider, Arc<MockUser>) {
        let user = Arc::new(MockUser::new(vec![
            NodeInfo::permission("example.permission"),
            NodeInfo::inheritance("admin"),
            NodeInfo::inheritance("vip"),
        ]));
        let host = MockHost::default().with_node_service(Arc::new(MockService {
            user: user.clone(),
            save_fails,
        }));
        (NodeServiceProvider::new(&host).unwrap(), user)
    }

    #[test]
    fn test_construction_fails_without_backend() {
        let host = MockHost::default();
        assert!(matches!(
            NodeServiceProvider::new(&host),
            Err(ResolveError::BackendUnavailable { .. })
        ));
    }

    #[test]
    fn test_has_checks_loaded_user() {
        let (provider, _) = provider(false);
        assert!(provider.has(id(), "example.permission"));
        assert!(!provider.has(id(), "missing.permission"));
    }

    #[test]
    fn test_unknown_identity_defaults() {
        let (provider, user) = provider(false);
        let stranger = PlayerId::new(999);

        assert!(!provider.has(stranger, "example.permission"));
        assert!(provider.groups_of(stranger).is_empty());

        // Mutations on unknown identities are lenient no-ops.
        provider.grant(stranger, "new.node");
        provider.revoke(stranger, "example.permission");
        assert_eq!(user.nodes().len(), 3);
    }

    #[test]
    fn test_grant_and_revoke_mutate_user() {
        let (provider, user) = provider(false);

        provider.grant(id(), "new.node");
        assert!(user.nodes().iter().any(|n| n.key == "new.node"));

        provider.revoke(id(), "new.node");
        assert!(!user.nodes().iter().any(|n| n.key == "new.node"));
    }

    #[test]
    fn test_groups_derived_from_inheritance_nodes() {
        let (provider, _) = provider(false);
        let groups = provider.groups_of(id());
        assert_eq!(
            groups.into_iter().collect::<Vec<_>>(),
            vec!["admin".to_string(), "vip".to_string()]
        );
    }

    #[test]
    fn test_all_groups_lists_loaded_groups() {
        let (provider, _) = provider(false);
        let groups = provider.all_groups();
        assert!(groups.contains("admin"));
        assert!(groups.contains("default"));
    }

    #[test]
    fn test_async_grant_surfaces_save_failure() {
        let (provider, _) = provider(true);
        let result = provider.grant_async(id(), "new.node").wait();
        assert!(matches!(result, Err(ProviderError::Backend(_))));
    }

    #[test]
    fn test_async_grant_unknown_identity_resolves_ok() {
        let (provider, _) = provider(false);
        let result = provider.grant_async(PlayerId::new(999), "new.node").wait();
        assert!(result.is_ok());
    }
}
