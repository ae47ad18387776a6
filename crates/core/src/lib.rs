//! permbridge core - backend adapters, compatibility shim, caching and
//! resolution
//!
//! This crate turns the uniform contract of `permbridge-api` into calls
//! against whichever backend the host actually runs:
//!
//! - [`providers`] - one adapter per backend family, translating generic
//!   calls into that family's entry-point API
//! - [`shim`] - per-release call-shape resolution for the
//!   version-fragmented legacy family
//! - [`cache`] - a time-bounded caching decorator for any provider
//! - [`resolve`] - backend detection and provider construction, run once
//!   at host startup
//! - [`config`] - TOML configuration for caching and resolution
//!
//! # Usage
//!
//! ```ignore
//! use permbridge_api::access;
//! use permbridge_core::{resolve, BridgeConfig};
//!
//! fn on_startup(host: Arc<dyn HostServices>) {
//!     let config = BridgeConfig::load(Path::new("configs/permbridge.toml"))
//!         .unwrap_or_default();
//!     if let Some(provider) = resolve::resolve(host, &config) {
//!         access::set(provider).expect("startup runs once");
//!     }
//!     // No backend found is a supported state: checks are simply
//!     // denied and mutations no-op until the next restart.
//! }
//! ```

pub mod cache;
pub mod config;
pub mod providers;
pub mod resolve;
pub mod shim;

#[cfg(test)]
mod testutil;

pub use cache::CachedProvider;
pub use config::{BridgeConfig, CacheConfig, ConfigError, ConfigResult, ResolutionConfig};
pub use providers::{
    HostNativeProvider, LegacyProvider, NodeServiceProvider, WorldStoreProvider,
};
pub use shim::Shim;
