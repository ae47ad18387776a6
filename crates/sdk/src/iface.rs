//! Interface ids for backend registration
//!
//! Backends register their entry points with the host under these ids.
//! The trailing digits version the surface - a breaking revision of a
//! backend family bumps its id rather than mutating the trait.

/// Modern typed permission service (family A)
pub const NODE_SERVICE: &str = "NodePermissionService001";

/// Legacy world-scoped permission store (family B)
pub const WORLD_STORE: &str = "WorldPermissionStore001";

/// Legacy version-fragmented endpoint (family C)
pub const LEGACY_ENDPOINT: &str = "LegacyPermissionEndpoint001";

/// Collected interface ids for iteration
pub const INTERFACE_IDS: &[(&str, &str)] = &[
    ("NodePermissionService", NODE_SERVICE),
    ("WorldPermissionStore", WORLD_STORE),
    ("LegacyPermissionEndpoint", LEGACY_ENDPOINT),
];
