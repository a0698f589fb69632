//! Campus Portal Core
//!
//! Capability registry, access policy and dashboard dispatcher for a
//! multi-tenant institutional portal.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         CAPABILITY REGISTRY                         │
//! │   ┌──────────────────┐              ┌────────────────────────────┐  │
//! │   │  Descriptor Set  │◄── coverage ─►│    Implementation Map     │  │
//! │   │  (who sees what) │              │  (name → on-demand loader) │  │
//! │   └────────┬─────────┘              └──────────────┬─────────────┘  │
//! └────────────┼───────────────────────────────────────┼────────────────┘
//!              │ (role, tenant)                        │
//!     ┌────────▼─────────┐    ┌──────────────┐   ┌─────▼──────────────┐
//!     │  Access Policy   │───►│   Composer   │──►│    Dispatcher      │
//!     │ deny-by-default  │    │ groups/search│   │ generation-guarded │
//!     └──────────────────┘    └──────────────┘   └─────┬──────────────┘
//!                                                      │ { user, on_navigate }
//!                                                ┌─────▼──────────────┐
//!                                                │  Feature screen    │
//!                                                └────────────────────┘
//! ```

#![warn(clippy::all)]

pub mod cache;
pub mod capability;
pub mod catalog;
pub mod composer;
pub mod dispatcher;
pub mod error;
pub mod implementation;
pub mod model;
pub mod policy;
pub mod registry;
pub mod validation;

pub use cache::DailyCache;
pub use capability::{CapabilityId, OVERVIEW};
pub use catalog::{Category, Descriptor, DescriptorSet, DisplayInfo, Scope};
pub use composer::{compose, search, Tile, TileGroup};
pub use dispatcher::{DispatchState, Dispatcher, MountProps, Navigator};
pub use error::{LoadError, MountError, RegistryError, RegistryResult};
pub use implementation::{Component, ComponentLoader, ComponentRef, ImplementationMap, View};
pub use model::{Role, SessionUser, TenantConfig, TenantId, TenantType, UserId};
pub use policy::{AccessPolicy, TenantOverrides};
pub use registry::Registry;
