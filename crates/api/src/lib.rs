//! permbridge API - provider contract and process-wide access point
//!
//! This crate carries everything a *caller* of the permission layer
//! needs:
//! - [`PermissionProvider`] - the uniform contract every backend adapter
//!   implements
//! - [`access`] - the write-once holder publishing the resolved provider
//!   process-wide
//! - [`tasks`] - the background executor and [`Completion`] handle
//!   backing the async mutation forms
//! - The error taxonomy ([`AccessError`], [`ResolveError`],
//!   [`ProviderError`])
//!
//! # Error policy
//!
//! Read operations (`has`, `groups_of`, `all_groups`) never surface
//! errors - a permission check must never crash a caller. Unknown
//! identities are modeled as false/empty/no-op results throughout, never
//! as errors. True backend-communication failures reach callers only
//! through the async mutation channel.

pub mod access;
pub mod error;
pub mod provider;
pub mod tasks;

pub use error::{AccessError, ProviderError, ResolveError};
pub use provider::PermissionProvider;
pub use tasks::{dispatch, Completion};
