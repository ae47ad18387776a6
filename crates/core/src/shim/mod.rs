//! Call-shape resolution for the version-fragmented legacy backend
//!
//! Incompatible releases of the legacy backend expose different call
//! shapes for the same operation - some have `has(id, node, world)`,
//! others only `has(name, node, world)` or `has(name, node)`. The shim
//! lets one code path work against all of them without knowing at build
//! time which release is loaded:
//!
//! 1. Candidate shapes per operation are tried in a fixed order, most
//!    specific and modern first, most generic and legacy last.
//! 2. The first shape that *exists* on the backend's concrete type is
//!    memoized per (type, operation) and used directly from then on -
//!    steady-state calls make zero probes.
//! 3. A backend with none of the known shapes degrades to the contract
//!    default (false / no-op / empty set) rather than failing the caller.
//! 4. An invocation failure of a resolved shape is logged and degrades
//!    for that call only. The memo keeps pointing at the shape: transient
//!    failures (e.g. a briefly disconnected backend) must not poison
//!    future attempts, so the next call retries it.

use std::any::TypeId;

use dashmap::DashMap;
use permbridge_sdk::{BackendResult, HostServices, LegacyEndpoint, PlayerId};
use tracing::{debug, warn};

/// Operations with per-release call shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Op {
    Check,
    Grant,
    Revoke,
    GroupsOf,
}

/// Everything a candidate shape may consult: the endpoint itself plus
/// the host for id -> name/world resolution.
struct ShimCtx<'a> {
    endpoint: &'a dyn LegacyEndpoint,
    host: &'a dyn HostServices,
}

impl ShimCtx<'_> {
    fn name_of(&self, id: PlayerId) -> Option<String> {
        self.host.player_name(id)
    }

    /// Context world: the player's current world when online, else the
    /// host default. `None` is passed through to the backend unscoped.
    fn world_of(&self, id: PlayerId) -> Option<String> {
        self.host
            .player_world(id)
            .or_else(|| self.host.default_world())
    }
}

/// One candidate call shape for an operation.
///
/// `attempt` returns `None` when the shape does not exist on this
/// release (or cannot address the identity), `Some(outcome)` when it was
/// invoked.
struct Strategy<T> {
    /// Shape label for logs
    name: &'static str,
    attempt: fn(&ShimCtx<'_>, PlayerId, &str) -> Option<BackendResult<T>>,
}

static CHECK_STRATEGIES: &[Strategy<bool>] = &[
    Strategy {
        name: "has(id, node, world)",
        attempt: |ctx, id, node| {
            let world = ctx.world_of(id);
            ctx.endpoint.check_id_scoped(id, node, world.as_deref())
        },
    },
    Strategy {
        name: "has(name, node, world)",
        attempt: |ctx, id, node| {
            let name = ctx.name_of(id)?;
            let world = ctx.world_of(id);
            ctx.endpoint.check_name_scoped(&name, node, world.as_deref())
        },
    },
    Strategy {
        name: "has(id, node)",
        attempt: |ctx, id, node| ctx.endpoint.check_id(id, node),
    },
    Strategy {
        name: "has(name, node)",
        attempt: |ctx, id, node| {
            let name = ctx.name_of(id)?;
            ctx.endpoint.check_name(&name, node)
        },
    },
];

static GRANT_STRATEGIES: &[Strategy<()>] = &[
    Strategy {
        name: "add_node(id, node)",
        attempt: |ctx, id, node| ctx.endpoint.add_node(id, node),
    },
    Strategy {
        name: "add_node(id, node, world)",
        attempt: |ctx, id, node| {
            let world = ctx.world_of(id);
            ctx.endpoint.add_node_scoped(id, node, world.as_deref())
        },
    },
];

static REVOKE_STRATEGIES: &[Strategy<()>] = &[
    Strategy {
        name: "remove_node(id, node)",
        attempt: |ctx, id, node| ctx.endpoint.remove_node(id, node),
    },
    Strategy {
        name: "remove_node(id, node, world)",
        attempt: |ctx, id, node| {
            let world = ctx.world_of(id);
            ctx.endpoint.remove_node_scoped(id, node, world.as_deref())
        },
    },
];

static GROUPS_OF_STRATEGIES: &[Strategy<Vec<String>>] = &[
    Strategy {
        name: "group_names(id)",
        attempt: |ctx, id, _node| ctx.endpoint.group_names(id),
    },
    Strategy {
        name: "parent_identifiers(id, world)",
        attempt: |ctx, id, _node| {
            let world = ctx.world_of(id);
            ctx.endpoint.parent_identifiers(id, world.as_deref())
        },
    },
];

/// Per-process call-shape resolver.
///
/// Holds the (concrete endpoint type, operation) -> resolved shape memo.
/// Concurrent first-time resolution for the same key may probe more than
/// once; the publish is idempotent (both racers find the same shape, the
/// backend's method set being static per type).
#[derive(Default)]
pub struct Shim {
    memo: DashMap<(TypeId, Op), usize>,
}

impl Shim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boolean permission check; false when no shape exists or the
    /// resolved shape fails
    pub fn check(
        &self,
        endpoint: &dyn LegacyEndpoint,
        host: &dyn HostServices,
        id: PlayerId,
        node: &str,
    ) -> bool {
        let ctx = ShimCtx { endpoint, host };
        self.run(&ctx, Op::Check, CHECK_STRATEGIES, id, node)
            .unwrap_or(false)
    }

    /// Grant via the resolved mutation shape, then best-effort persist.
    /// Returns whether a shape applied the mutation.
    pub fn grant(
        &self,
        endpoint: &dyn LegacyEndpoint,
        host: &dyn HostServices,
        id: PlayerId,
        node: &str,
    ) -> bool {
        let ctx = ShimCtx { endpoint, host };
        let applied = self
            .run(&ctx, Op::Grant, GRANT_STRATEGIES, id, node)
            .is_some();
        if applied {
            persist(endpoint, id);
        }
        applied
    }

    /// Revoke via the resolved mutation shape, then best-effort persist.
    /// Returns whether a shape applied the mutation.
    pub fn revoke(
        &self,
        endpoint: &dyn LegacyEndpoint,
        host: &dyn HostServices,
        id: PlayerId,
        node: &str,
    ) -> bool {
        let ctx = ShimCtx { endpoint, host };
        let applied = self
            .run(&ctx, Op::Revoke, REVOKE_STRATEGIES, id, node)
            .is_some();
        if applied {
            persist(endpoint, id);
        }
        applied
    }

    /// Group membership of one player; empty when no shape exists
    pub fn groups_of(
        &self,
        endpoint: &dyn LegacyEndpoint,
        host: &dyn HostServices,
        id: PlayerId,
    ) -> Vec<String> {
        let ctx = ShimCtx { endpoint, host };
        self.run(&ctx, Op::GroupsOf, GROUPS_OF_STRATEGIES, id, "")
            .unwrap_or_default()
    }

    /// All groups known to the backend.
    ///
    /// Not routed through the memo: releases that stub the name accessor
    /// return an empty iterable from a shape that exists, so an empty
    /// first answer must still fall through to the list accessor.
    pub fn all_groups(&self, endpoint: &dyn LegacyEndpoint) -> Vec<String> {
        match endpoint.known_group_names() {
            Some(Ok(names)) if !names.is_empty() => return names,
            Some(Err(e)) => warn!(error = %e, "known_group_names failed"),
            _ => {}
        }
        match endpoint.group_list() {
            Some(Ok(groups)) => groups,
            Some(Err(e)) => {
                warn!(error = %e, "group_list failed");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Resolve and invoke the call shape for `op`.
    ///
    /// `None` covers every degradation: no shape exists, the resolved
    /// shape failed, or the resolved shape could not address the
    /// identity this call.
    fn run<T>(
        &self,
        ctx: &ShimCtx<'_>,
        op: Op,
        table: &[Strategy<T>],
        id: PlayerId,
        node: &str,
    ) -> Option<T> {
        let key = (ctx.endpoint.as_any().type_id(), op);

        // Copy the index out so no memo shard lock is held while the
        // backend runs.
        let resolved = self.memo.get(&key).map(|entry| *entry);
        if let Some(index) = resolved {
            let strategy = &table[index];
            return match (strategy.attempt)(ctx, id, node) {
                Some(Ok(value)) => Some(value),
                Some(Err(e)) => {
                    warn!(?op, shape = strategy.name, error = %e, "resolved call shape failed");
                    None
                }
                None => {
                    debug!(?op, shape = strategy.name, %id, "resolved call shape could not address identity");
                    None
                }
            };
        }

        for (index, strategy) in table.iter().enumerate() {
            let Some(outcome) = (strategy.attempt)(ctx, id, node) else {
                continue;
            };
            self.memo.insert(key, index);
            debug!(?op, shape = strategy.name, "resolved backend call shape");
            return match outcome {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(?op, shape = strategy.name, error = %e, "resolved call shape failed");
                    None
                }
            };
        }

        debug!(?op, "no known call shape on this backend release");
        None
    }
}

/// Flush pending changes after a mutation. Failures are diagnostic only.
fn persist(endpoint: &dyn LegacyEndpoint, id: PlayerId) {
    if let Some(Err(e)) = endpoint.persist(id) {
        debug!(%id, error = %e, "persist after mutation failed");
    }
}
