//! # Mimic Provider System
//!
//! Everything concerned with resolving named operations to data providers
//! and invoking them:
//!
//! - **Traits:** [`Provider`] for a single provider, [`ProviderPack`] for a
//!   bundle of factories shipped together ([`traits`]).
//! - **Identifiers:** the pure derivation from operation name to provider
//!   identifier ([`ident`]).
//! - **Location:** the [`ProviderLocator`] seam and the factory-backed
//!   [`FactoryLocator`] ([`locator`]).
//! - **Caching:** [`ProviderRegistry`], which memoizes one provider per
//!   operation name ([`registry`]).
//! - **Management:** [`DefaultProviderManager`], the kernel component that
//!   serializes cache access and exposes [`ProviderManager`] ([`manager`]).
//! - **Support:** shared randomness and profile access ([`context`]),
//!   ordered option sets ([`options`]), API version checks ([`version`]),
//!   and the system's error type ([`error`]).

pub mod context;
pub mod error;
pub mod ident;
pub mod locator;
pub mod manager;
pub mod options;
pub mod registry;
pub mod traits;
pub mod version;

pub use context::{ProviderContext, SharedRng};
pub use error::ProviderSystemError;
pub use ident::{provider_ident, PROVIDER_NAMESPACE};
pub use locator::{FactoryLocator, ProviderFactory, ProviderLocator};
pub use manager::{DefaultProviderManager, ProviderManager};
pub use options::OptionSet;
pub use registry::ProviderRegistry;
pub use traits::{Provider, ProviderPack, Value};
pub use version::{ApiVersion, VersionRange};

#[cfg(test)]
mod tests;
