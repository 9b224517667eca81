/// Application name
pub const APP_NAME: &str = "mimic";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Current provider API version
///
/// Provider packs declare the API ranges they are compatible with; the
/// locator rejects packs whose ranges do not include this version.
pub const API_VERSION: &str = "0.1.0";

/// Environment variable controlling log filtering in the CLI
pub const LOG_ENV_VAR: &str = "MIMIC_LOG";

/// Configuration key holding the deterministic RNG seed
pub const SEED_CONFIG_KEY: &str = "seed";
