//! # Mimic Core Kernel
//!
//! The engine's backbone: component lifecycle, dependency wiring, and the
//! top-level error type.
//!
//! - **Bootstrap:** [`Engine`] construction and lifecycle driving
//!   ([`bootstrap`]).
//! - **Components:** the [`KernelComponent`] trait and the type-keyed
//!   [`DependencyRegistry`] ([`component`]).
//! - **Errors:** [`Error`] and the kernel [`Result`] alias ([`error`]).
//! - **Constants:** application and API version strings ([`constants`]).

pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;

pub use bootstrap::{Engine, EngineOptions};
pub use component::{DependencyRegistry, KernelComponent};
pub use error::{Error, KernelLifecyclePhase, Result};

#[cfg(test)]
mod tests;
