//! Provider pack for commerce data: donation amounts, currencies, payment
//! statuses, and creation timestamps.
//!
//! Unlike the other packs this one reads the generation profile: preset
//! amounts, the currency list, and the payment status set can all be
//! overridden per profile under `commerce.*` keys.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use log::error;
use serde_json::json;

use mimic_core::provider::context::{ProviderContext, SharedRng};
use mimic_core::provider::error::ProviderSystemError;
use mimic_core::provider::locator::FactoryLocator;
use mimic_core::provider::options::OptionSet;
use mimic_core::provider::traits::{Provider, ProviderPack, Value};
use mimic_core::provider::version::VersionRange;

/// Profile keys this pack understands.
pub const AMOUNTS_CONFIG_KEY: &str = "commerce.amounts";
pub const CURRENCIES_CONFIG_KEY: &str = "commerce.currencies";
pub const STATUSES_CONFIG_KEY: &str = "commerce.statuses";

const DEFAULT_AMOUNTS: &[f64] = &[5.0, 10.0, 25.0, 50.0, 100.0, 250.0];
const DEFAULT_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CAD", "AUD"];
const DEFAULT_DAYS_BACK: u64 = 365;
// About ten thousand years. Windows past this overflow chrono's timestamp range.
const MAX_DAYS_BACK: u64 = 3_652_500;
const SECONDS_PER_DAY: u64 = 86_400;

/// Operations this pack registers, one factory per name.
pub const OPERATIONS: &[&str] = &["amount", "currency", "paymentStatus", "createdAt"];

fn default_statuses() -> OptionSet {
    OptionSet::from_pairs([
        ("publish", "Complete"),
        ("pending", "Pending"),
        ("refunded", "Refunded"),
        ("cancelled", "Cancelled"),
        ("abandoned", "Abandoned"),
        ("failed", "Failed"),
        ("preapproval", "Pre-Approved"),
        ("revoked", "Revoked"),
    ])
}

/// Provider answering every commerce operation.
///
/// Profile lookups happen once at construction; a provider sees the profile
/// as it was when the engine was built, which keeps repeated draws cheap.
pub struct CommerceProvider {
    rng: SharedRng,
    amounts: Vec<f64>,
    currencies: Vec<String>,
    statuses: OptionSet,
}

impl CommerceProvider {
    pub fn new(context: &ProviderContext) -> Self {
        let config = context.config();

        let amounts = match config.get::<Vec<f64>>(AMOUNTS_CONFIG_KEY) {
            Some(list) if !list.is_empty() => list,
            _ => DEFAULT_AMOUNTS.to_vec(),
        };
        let currencies = match config.get::<Vec<String>>(CURRENCIES_CONFIG_KEY) {
            Some(list) if !list.is_empty() => list,
            _ => DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        };

        // Configured statuses extend the defaults: known keys get their label
        // replaced in place, new keys append.
        let mut statuses = default_statuses();
        if let Some(configured) = config.get::<OptionSet>(STATUSES_CONFIG_KEY) {
            statuses.extend(configured.iter().map(|(k, l)| (k.to_string(), l.to_string())));
        }

        Self {
            rng: context.rng().clone(),
            amounts,
            currencies,
            statuses,
        }
    }

    fn preset_amount(&self) -> f64 {
        self.rng.pick(&self.amounts).copied().unwrap_or_default()
    }

    fn ranged_amount(&self, args: &[Value]) -> Result<f64, ProviderSystemError> {
        let bound = |arg: &Value, which: &str| {
            arg.as_f64()
                .ok_or_else(|| ProviderSystemError::InvalidArguments {
                    operation: "amount".to_string(),
                    message: format!("{} bound must be a number", which),
                })
        };
        let min = bound(&args[0], "lower")?;
        let max = bound(&args[1], "upper")?;
        if min > max {
            return Err(ProviderSystemError::InvalidArguments {
                operation: "amount".to_string(),
                message: format!("lower bound {} exceeds upper bound {}", min, max),
            });
        }
        if min == max {
            return Ok(round_cents(min));
        }
        // The uniform sampler cannot represent a span that overflows f64.
        if !(max - min).is_finite() {
            return Err(ProviderSystemError::InvalidArguments {
                operation: "amount".to_string(),
                message: format!("range from {} to {} is too wide to sample", min, max),
            });
        }
        Ok(round_cents(self.rng.range_f64(min, max)))
    }

    fn amount(&self, args: &[Value]) -> Result<f64, ProviderSystemError> {
        match args.len() {
            0 => Ok(self.preset_amount()),
            2 => self.ranged_amount(args),
            n => Err(ProviderSystemError::InvalidArguments {
                operation: "amount".to_string(),
                message: format!("expected zero or two arguments, got {}", n),
            }),
        }
    }

    fn currency(&self) -> String {
        self.rng
            .pick(&self.currencies)
            .cloned()
            .unwrap_or_default()
    }

    fn payment_status(&self) -> String {
        let keys: Vec<&str> = self.statuses.keys().collect();
        self.rng
            .pick(&keys)
            .map(|key| key.to_string())
            .unwrap_or_default()
    }

    fn created_at(&self, args: &[Value]) -> Result<String, ProviderSystemError> {
        let days_back = match args.first() {
            None => DEFAULT_DAYS_BACK,
            Some(arg) => arg
                .as_u64()
                .ok_or_else(|| ProviderSystemError::InvalidArguments {
                    operation: "createdAt".to_string(),
                    message: "days back must be a non-negative integer".to_string(),
                })?,
        };
        if days_back > MAX_DAYS_BACK {
            return Err(ProviderSystemError::InvalidArguments {
                operation: "createdAt".to_string(),
                message: format!(
                    "days back must be at most {}, got {}",
                    MAX_DAYS_BACK, days_back
                ),
            });
        }

        let window = days_back * SECONDS_PER_DAY;
        let offset = if window == 0 {
            0
        } else {
            self.rng.range_u64(0, window)
        };
        let timestamp = Utc::now() - Duration::seconds(offset as i64);
        Ok(timestamp.to_rfc3339())
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Provider for CommerceProvider {
    fn name(&self) -> &'static str {
        "commerce"
    }

    fn operations(&self) -> Vec<&'static str> {
        OPERATIONS.to_vec()
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError> {
        match operation {
            "amount" => Ok(json!(self.amount(args)?)),
            "currency" => Ok(json!(self.currency())),
            "paymentStatus" => Ok(json!(self.payment_status())),
            "createdAt" => Ok(json!(self.created_at(args)?)),
            _ => Err(ProviderSystemError::UnsupportedOperation {
                provider: self.name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }
}

/// Pack registering one [`CommerceProvider`] factory per operation.
#[derive(Default)]
pub struct CommercePack;

impl ProviderPack for CommercePack {
    fn name(&self) -> &'static str {
        "core-commerce"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        const COMPATIBLE_API_REQ: &str = "^0.1";
        match VersionRange::from_str(COMPATIBLE_API_REQ) {
            Ok(range) => vec![range],
            Err(e) => {
                error!(
                    "Failed to parse API version requirement ('{}'): {}",
                    COMPATIBLE_API_REQ, e
                );
                vec![]
            }
        }
    }

    fn register(&self, locator: &mut FactoryLocator) -> Result<(), ProviderSystemError> {
        for operation in OPERATIONS {
            locator.register_operation(
                operation,
                Box::new(|ctx| Ok(Arc::new(CommerceProvider::new(ctx)) as Arc<dyn Provider>)),
            )?;
        }
        Ok(())
    }
}
