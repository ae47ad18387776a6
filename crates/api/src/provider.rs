//! The uniform permission provider contract

use std::collections::BTreeSet;

use permbridge_sdk::PlayerId;

use crate::tasks::Completion;

/// The capability contract every backend adapter implements.
///
/// Callers issue these operations without knowing which backend is
/// active. All methods are safe to call from any thread.
///
/// # Identity semantics
///
/// An identity the backend has never seen (e.g. never connected this
/// session) is not an error anywhere in this contract: checks return
/// `false`, mutations are no-ops, group queries return empty sets. This
/// lenient-failure policy is deliberate - callers cannot always know
/// whether a player is loaded.
pub trait PermissionProvider: Send + Sync {
    /// Stable identifying label, for diagnostics only
    fn provider_name(&self) -> String;

    /// True iff the backend currently grants `node` to `id`.
    ///
    /// Must not perform unbounded blocking I/O; unknown identities
    /// return `false` rather than failing.
    fn has(&self, id: PlayerId, node: &str) -> bool;

    /// Grant `node` to `id`. No-op if the identity is unknown.
    fn grant(&self, id: PlayerId, node: &str);

    /// Revoke `node` from `id`. No-op if the identity is unknown.
    fn revoke(&self, id: PlayerId, node: &str);

    /// Grant `node` to `id` without blocking the calling thread.
    ///
    /// Adapters without a native async form delegate to
    /// [`tasks::dispatch`](crate::tasks::dispatch), which runs the
    /// synchronous form on the background executor and resolves the
    /// completion when it finishes or fails.
    fn grant_async(&self, id: PlayerId, node: &str) -> Completion;

    /// Async form of [`revoke`](PermissionProvider::revoke)
    fn revoke_async(&self, id: PlayerId, node: &str) -> Completion;

    /// Current group membership of `id`; empty for unknown identities or
    /// backends without a group concept
    fn groups_of(&self, id: PlayerId) -> BTreeSet<String>;

    /// All groups known to the backend irrespective of membership; empty
    /// if unsupported
    fn all_groups(&self) -> BTreeSet<String>;
}
