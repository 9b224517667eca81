use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::data::ConfigData;

/// Randomness source shared by every provider built from one context.
///
/// All draws go through a single seeded `StdRng`, so a profile with a fixed
/// seed reproduces the identical value stream across runs regardless of
/// which provider performs the draw.
#[derive(Clone, Debug)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    /// Deterministic generator from a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Non-deterministic generator from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Run a closure with exclusive access to the generator.
    ///
    /// A poisoned lock is recovered rather than propagated; the RNG state is
    /// always usable and a panic elsewhere must not wedge generation.
    pub fn with<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Uniform draw from an inclusive integer range
    pub fn range_u64(&self, low: u64, high: u64) -> u64 {
        self.with(|rng| rng.gen_range(low..=high))
    }

    /// Uniform draw from an inclusive float range
    pub fn range_f64(&self, low: f64, high: f64) -> f64 {
        self.with(|rng| rng.gen_range(low..=high))
    }

    /// Pick one element of a slice, `None` on an empty slice
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.with(|rng| items.choose(rng))
    }
}

/// Everything a provider factory needs to construct a provider: the shared
/// randomness source and the generation profile.
///
/// The context is owned by the locator and handed to each factory at
/// construction time; providers built from the same context share one RNG
/// stream and see one consistent profile.
#[derive(Clone, Debug)]
pub struct ProviderContext {
    rng: SharedRng,
    config: Arc<ConfigData>,
}

impl ProviderContext {
    pub fn new(rng: SharedRng, config: Arc<ConfigData>) -> Self {
        Self { rng, config }
    }

    /// Context with an entropy-seeded RNG and an empty profile
    pub fn with_entropy() -> Self {
        Self::new(SharedRng::from_entropy(), Arc::new(ConfigData::new()))
    }

    /// Build a context from a profile, honoring its `seed` key when present.
    pub fn from_config(config: ConfigData) -> Self {
        let rng = match config.get::<u64>(crate::kernel::constants::SEED_CONFIG_KEY) {
            Some(seed) => SharedRng::from_seed(seed),
            None => SharedRng::from_entropy(),
        };
        Self::new(rng, Arc::new(config))
    }

    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    pub fn config(&self) -> &ConfigData {
        &self.config
    }
}
