//! Provider pack for person-shaped data: names and company names.
//!
//! Every operation draws from fixed word lists through the context's shared
//! RNG, so a seeded profile produces the same people on every run.

use std::str::FromStr;
use std::sync::Arc;

use log::error;
use serde_json::json;

use mimic_core::provider::context::{ProviderContext, SharedRng};
use mimic_core::provider::error::ProviderSystemError;
use mimic_core::provider::locator::FactoryLocator;
use mimic_core::provider::traits::{Provider, ProviderPack, Value};
use mimic_core::provider::version::VersionRange;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alex", "Amara", "Ben", "Bianca", "Carlos", "Chloe", "Daniel", "Dara", "Elena",
    "Emil", "Fatima", "Felix", "Grace", "Hannah", "Hugo", "Imani", "Ivan", "Jade", "Jonas",
    "Kai", "Kira", "Liam", "Lucia", "Marcus", "Mina", "Noah", "Nora", "Omar", "Priya",
    "Quinn", "Rosa", "Sam", "Sofia", "Tariq", "Tessa", "Umar", "Vera", "Wes", "Yara",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Alvarez", "Barnes", "Becker", "Carter", "Chen", "Dawson", "Diaz", "Ellis",
    "Engel", "Fischer", "Floyd", "Garcia", "Grant", "Hansen", "Hart", "Ibarra", "Ishida",
    "Jensen", "Jordan", "Keller", "Kim", "Larsen", "Lopez", "Mason", "Meyer", "Nakamura",
    "Novak", "Okafor", "Ortiz", "Patel", "Petrov", "Quintero", "Reyes", "Silva", "Sorensen",
    "Tanaka", "Torres", "Ueda", "Vargas", "Weber", "Zhang",
];

const COMPANY_SUFFIXES: &[&str] = &["LLC", "Inc", "Group", "Ltd", "and Sons", "Partners"];

/// Operations this pack registers, one factory per name.
pub const OPERATIONS: &[&str] = &["firstName", "lastName", "fullName", "company"];

/// Provider answering every person-related operation.
pub struct PersonProvider {
    rng: SharedRng,
}

impl PersonProvider {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            rng: context.rng().clone(),
        }
    }

    fn pick_from(&self, items: &'static [&'static str]) -> &'static str {
        self.rng.pick(items).copied().unwrap_or_default()
    }

    fn first_name(&self) -> &'static str {
        self.pick_from(FIRST_NAMES)
    }

    fn last_name(&self) -> &'static str {
        self.pick_from(LAST_NAMES)
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    fn company(&self) -> String {
        format!("{} {}", self.last_name(), self.pick_from(COMPANY_SUFFIXES))
    }
}

impl Provider for PersonProvider {
    fn name(&self) -> &'static str {
        "person"
    }

    fn operations(&self) -> Vec<&'static str> {
        OPERATIONS.to_vec()
    }

    fn call(&self, operation: &str, _args: &[Value]) -> Result<Value, ProviderSystemError> {
        // None of these take arguments; extras are ignored rather than rejected.
        match operation {
            "firstName" => Ok(json!(self.first_name())),
            "lastName" => Ok(json!(self.last_name())),
            "fullName" => Ok(json!(self.full_name())),
            "company" => Ok(json!(self.company())),
            _ => Err(ProviderSystemError::UnsupportedOperation {
                provider: self.name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }
}

/// Pack registering one [`PersonProvider`] factory per operation.
#[derive(Default)]
pub struct PersonPack;

impl ProviderPack for PersonPack {
    fn name(&self) -> &'static str {
        "core-person"
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
                Box::new(|ctx| Ok(Arc::new(PersonProvider::new(ctx)) as Arc<dyn Provider>)),
            )?;
        }
        Ok(())
    }
}
