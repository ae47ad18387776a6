//! Backend detection and provider construction
//!
//! Run once during host startup. Backends are probed in a fixed priority
//! order; the first one that is installed *and* enabled wins and exactly
//! one adapter is instantiated. Finding nothing is a supported outcome,
//! not a failure - the host proceeds without permission support and
//! callers see denials and no-ops.

use std::sync::Arc;
use std::time::Duration;

use permbridge_api::PermissionProvider;
use permbridge_sdk::{iface, HostServices};
use tracing::{debug, info, warn};

use crate::cache::CachedProvider;
use crate::config::BridgeConfig;
use crate::providers::{
    HostNativeProvider, LegacyProvider, NodeServiceProvider, WorldStoreProvider,
};

/// Detect the active backend and build the provider the host should
/// publish.
///
/// Applies the caching decorator per config before returning. `None`
/// means no backend was found (and the native fallback is off); the
/// caller leaves the access point unset.
pub fn resolve(
    host: Arc<dyn HostServices>,
    config: &BridgeConfig,
) -> Option<Arc<dyn PermissionProvider>> {
    let provider = select_provider(&host, config)?;

    let provider: Arc<dyn PermissionProvider> = if config.cache.enabled {
        let window = Duration::from_millis(config.cache.window_ms);
        debug!(window_ms = config.cache.window_ms, "check caching enabled");
        Arc::new(CachedProvider::with_window(provider, window))
    } else {
        provider
    };

    info!(provider = %provider.provider_name(), "permission backend resolved");
    Some(provider)
}

/// Fixed-priority probe: modern typed service, then world-scoped store,
/// then the version-fragmented endpoint, then (if configured) the host's
/// native surface.
fn select_provider(
    host: &Arc<dyn HostServices>,
    config: &BridgeConfig,
) -> Option<Arc<dyn PermissionProvider>> {
    if probe(host.as_ref(), iface::NODE_SERVICE) {
        match NodeServiceProvider::new(host.as_ref()) {
            Ok(provider) => return Some(Arc::new(provider)),
            Err(e) => warn!(error = %e, "backend detected but adapter construction failed"),
        }
    }

    if probe(host.as_ref(), iface::WORLD_STORE) {
        match WorldStoreProvider::new(Arc::clone(host)) {
            Ok(provider) => return Some(Arc::new(provider)),
            Err(e) => warn!(error = %e, "backend detected but adapter construction failed"),
        }
    }

    if probe(host.as_ref(), iface::LEGACY_ENDPOINT) {
        match LegacyProvider::new(Arc::clone(host)) {
            Ok(provider) => return Some(Arc::new(provider)),
            Err(e) => warn!(error = %e, "backend detected but adapter construction failed"),
        }
    }

    if config.resolution.native_fallback {
        info!("no backend installed, falling back to host-native permissions");
        return Some(Arc::new(HostNativeProvider::new(Arc::clone(host))));
    }

    info!("no permission backend found");
    None
}

/// An installed-but-disabled backend is treated as absent
fn probe(host: &dyn HostServices, id: &'static str) -> bool {
    let installed = host.backend(id).is_some();
    let enabled = installed && host.backend_enabled(id);
    debug!(iface = id, installed, enabled, "backend probe");
    installed && enabled
}
