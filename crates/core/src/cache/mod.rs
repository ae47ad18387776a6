//! Time-bounded caching decorator
//!
//! Wraps any provider and memoizes boolean check results per
//! (identity, node) pair for a bounded staleness window. Hot nodes
//! checked every event tick stop hitting the backend; a mutation on a
//! pair evicts exactly that pair before the mutation returns, so a
//! caller never reads its own write stale.
//!
//! Cache-aside semantics throughout: entries are independent and may be
//! evicted at any time without correctness impact - a miss always falls
//! through to the wrapped provider. Group queries are deliberately
//! uncached; membership changes are outside the staleness bound.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use permbridge_api::{dispatch, Completion, PermissionProvider};
use permbridge_sdk::PlayerId;

/// Default staleness window for cached check results
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    id: PlayerId,
    node: String,
}

struct CacheEntry {
    value: bool,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Caching wrapper around any [`PermissionProvider`]
pub struct CachedProvider {
    delegate: Arc<dyn PermissionProvider>,
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
    window: Duration,
}

impl CachedProvider {
    /// Wrap `delegate` with the default 30 second window
    pub fn new(delegate: Arc<dyn PermissionProvider>) -> Self {
        Self::with_window(delegate, DEFAULT_WINDOW)
    }

    /// Wrap `delegate` with a custom staleness window
    pub fn with_window(delegate: Arc<dyn PermissionProvider>, window: Duration) -> Self {
        Self {
            delegate,
            entries: Arc::new(DashMap::new()),
            window,
        }
    }

    /// Drop all cached entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop expired entries. Expired entries are never *served* either
    /// way; this just reclaims their memory. The host may call it
    /// periodically, nothing here schedules it.
    pub fn evict_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    /// Number of live entries, expired or not
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn evict(&self, id: PlayerId, node: &str) {
        self.entries.remove(&CacheKey {
            id,
            node: node.to_string(),
        });
    }

    /// Evict the pair once the delegate's mutation succeeds, before the
    /// outer completion resolves
    fn chain_eviction(&self, inner: Completion, id: PlayerId, node: &str) -> Completion {
        let entries = Arc::clone(&self.entries);
        let key = CacheKey {
            id,
            node: node.to_string(),
        };
        dispatch(move || {
            let result = inner.wait();
            if result.is_ok() {
                entries.remove(&key);
            }
            result
        })
    }
}

impl PermissionProvider for CachedProvider {
    fn provider_name(&self) -> String {
        format!("{} (cached)", self.delegate.provider_name())
    }

    fn has(&self, id: PlayerId, node: &str) -> bool {
        let key = CacheKey {
            id,
            node: node.to_string(),
        };

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired() {
                return entry.value;
            }
        }

        let value = self.delegate.has(id, node);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.window,
            },
        );
        value
    }

    fn grant(&self, id: PlayerId, node: &str) {
        self.delegate.grant(id, node);
        self.evict(id, node);
    }

    fn revoke(&self, id: PlayerId, node: &str) {
        self.delegate.revoke(id, node);
        self.evict(id, node);
    }

    fn grant_async(&self, id: PlayerId, node: &str) -> Completion {
        let inner = self.delegate.grant_async(id, node);
        self.chain_eviction(inner, id, node)
    }

    fn revoke_async(&self, id: PlayerId, node: &str) -> Completion {
        let inner = self.delegate.revoke_async(id, node);
        self.chain_eviction(inner, id, node)
    }

    fn groups_of(&self, id: PlayerId) -> BTreeSet<String> {
        self.delegate.groups_of(id)
    }

    fn all_groups(&self) -> BTreeSet<String> {
        self.delegate.all_groups()
    }
}
