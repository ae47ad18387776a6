//! Process-wide access to the resolved permission provider
//!
//! A write-once holder: the host publishes the provider resolution found
//! during its startup phase, and every later caller reads the same
//! instance. The provider lives for the process lifetime; nothing here
//! ever destroys it.
//!
//! # Thread safety
//!
//! `set`/`get`/`is_initialized` are linearizable: once `set` returns,
//! every subsequently-starting `get` on any thread observes the value,
//! and of concurrent `set` attempts exactly one wins while the rest fail
//! with [`AccessError::AlreadyInitialized`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::AccessError;
use crate::provider::PermissionProvider;

static PROVIDER: RwLock<Option<Arc<dyn PermissionProvider>>> = RwLock::new(None);

/// Publish the resolved provider.
///
/// Only the first call in a process succeeds; later calls fail with
/// [`AccessError::AlreadyInitialized`] and leave the published provider
/// untouched.
pub fn set(provider: Arc<dyn PermissionProvider>) -> Result<(), AccessError> {
    let mut slot = PROVIDER.write();
    if slot.is_some() {
        return Err(AccessError::AlreadyInitialized);
    }
    tracing::info!(provider = %provider.provider_name(), "permission provider published");
    *slot = Some(provider);
    Ok(())
}

/// The published provider.
///
/// Fails with [`AccessError::NotInitialized`] before [`set`]; meant as a
/// startup-time programming error, not a per-call condition.
pub fn get() -> Result<Arc<dyn PermissionProvider>, AccessError> {
    PROVIDER.read().clone().ok_or(AccessError::NotInitialized)
}

/// The published provider, or `None` before [`set`]
pub fn try_get() -> Option<Arc<dyn PermissionProvider>> {
    PROVIDER.read().clone()
}

/// Whether a provider has been published. Never fails.
pub fn is_initialized() -> bool {
    PROVIDER.read().is_some()
}

/// Clear the holder so [`set`] can succeed again.
///
/// Use with caution - typically only needed for tests or full teardown.
/// Callers running tests against the holder must serialize them around
/// this.
pub fn reset() {
    *PROVIDER.write() = None;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use permbridge_sdk::PlayerId;

    use super::*;
    use crate::tasks::Completion;

    // The holder is process-global; tests that touch it take this lock
    // so they cannot interleave.
    static HOLDER_LOCK: Mutex<()> = Mutex::new(());

    struct NullProvider(&'static str);

    impl PermissionProvider for NullProvider {
        fn provider_name(&self) -> String {
            self.0.to_string()
        }

        fn has(&self, _id: PlayerId, _node: &str) -> bool {
            false
        }

        fn grant(&self, _id: PlayerId, _node: &str) {}

        fn revoke(&self, _id: PlayerId, _node: &str) {}

        fn grant_async(&self, _id: PlayerId, _node: &str) -> Completion {
            Completion::completed()
        }

        fn revoke_async(&self, _id: PlayerId, _node: &str) -> Completion {
            Completion::completed()
        }

        fn groups_of(&self, _id: PlayerId) -> BTreeSet<String> {
            BTreeSet::new()
        }

        fn all_groups(&self) -> BTreeSet<String> {
            BTreeSet::new()
        }
    }

    #[test]
    fn test_get_before_set_fails() {
        let _guard = HOLDER_LOCK.lock().unwrap();
        reset();

        assert!(matches!(get(), Err(AccessError::NotInitialized)));
        assert!(!is_initialized());
        assert!(try_get().is_none());
    }

    #[test]
    fn test_write_once() {
        let _guard = HOLDER_LOCK.lock().unwrap();
        reset();

        set(Arc::new(NullProvider("first"))).unwrap();
        assert!(is_initialized());
        assert_eq!(get().unwrap().provider_name(), "first");

        // Second set fails and the first instance survives.
        let second = set(Arc::new(NullProvider("second")));
        assert!(matches!(second, Err(AccessError::AlreadyInitialized)));
        assert_eq!(get().unwrap().provider_name(), "first");

        reset();
    }

    #[test]
    fn test_get_returns_same_instance() {
        let _guard = HOLDER_LOCK.lock().unwrap();
        reset();

        let provider: Arc<dyn PermissionProvider> = Arc::new(NullProvider("only"));
        set(Arc::clone(&provider)).unwrap();

        let seen = get().unwrap();
        assert!(Arc::ptr_eq(&provider, &seen));

        reset();
    }

    #[test]
    fn test_concurrent_set_single_winner() {
        let _guard = HOLDER_LOCK.lock().unwrap();
        reset();

        let winners: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| set(Arc::new(NullProvider("racer"))).is_ok()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count()
        });

        assert_eq!(winners, 1);
        assert!(is_initialized());

        reset();
    }
}
