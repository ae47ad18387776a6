//! permbridge SDK - backend interface definitions
//!
//! This crate defines the surfaces the rest of permbridge is built against:
//! - The entry-point traits each backend family's in-process plugin
//!   implements ([`NodeServiceApi`], [`WorldStoreApi`], [`LegacyEndpoint`])
//! - The services a host process provides to adapters ([`HostServices`])
//! - Interface ids under which backends register with the host ([`iface`])
//! - Shared value types ([`PlayerId`], [`Tristate`], [`NodeInfo`])
//!
//! Backend internals (storage, group hierarchies, world scoping) stay
//! opaque behind these traits. permbridge only ever invokes them.

pub mod error;
pub mod host;
pub mod iface;
pub mod legacy;
pub mod node_service;
pub mod player;
pub mod world_store;

pub use error::{BackendError, BackendResult};
pub use host::{BackendHandle, HostServices};
pub use legacy::LegacyEndpoint;
pub use node_service::{NodeInfo, NodeKind, NodeServiceApi, NodeServiceUser, Tristate};
pub use player::PlayerId;
pub use world_store::{WorldDataHolder, WorldPermissionView, WorldStoreApi};
