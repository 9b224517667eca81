//! # Mimic Core Configuration
//!
//! Generation profiles: a flat, serde-backed key/value store loaded from
//! JSON (or TOML/YAML behind the `toml-config`/`yaml-config` features).
//! Profiles carry the deterministic seed and per-pack data such as option
//! sets and amount presets. Profiles are inputs only; mimic does not
//! persist settings.
pub mod data;
pub mod error;
pub mod manager;

pub use data::{ConfigData, ConfigFormat};
pub use error::ConfigSystemError;
pub use manager::{ConfigManager, DefaultConfigManager};
