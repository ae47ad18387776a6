//! Backend adapters
//!
//! One adapter per backend family, each translating the uniform
//! [`PermissionProvider`](permbridge_api::PermissionProvider) contract
//! into that family's entry-point API:
//!
//! - [`NodeServiceProvider`] - modern typed service, direct calls
//! - [`WorldStoreProvider`] - legacy world-scoped store, name-addressed
//! - [`LegacyProvider`] - version-fragmented endpoint, routed through
//!   the compatibility shim
//! - [`HostNativeProvider`] - last-resort fallback using only the host's
//!   own attachment surface
//!
//! Adapters are constructed by [`resolve`](crate::resolve) and
//! double-check their backend's availability at construction, failing
//! with a state error even when detection considered it present.

mod legacy;
mod native;
mod node_service;
mod world_store;

pub use legacy::LegacyProvider;
pub use native::HostNativeProvider;
pub use node_service::NodeServiceProvider;
pub use world_store::WorldStoreProvider;
