//! Provider pack for internet-shaped data: email addresses, domains, URLs,
//! and IPv4 addresses.
//!
//! `email` optionally takes a first and last name and builds a mailbox from
//! them; everything else is drawn from fixed word lists through the shared
//! RNG.

use std::str::FromStr;
use std::sync::Arc;

use log::error;
use serde_json::json;

use mimic_core::provider::context::{ProviderContext, SharedRng};
use mimic_core::provider::error::ProviderSystemError;
use mimic_core::provider::locator::FactoryLocator;
use mimic_core::provider::traits::{Provider, ProviderPack, Value};
use mimic_core::provider::version::VersionRange;

const HANDLES: &[&str] = &[
    "alex", "casey", "dana", "eli", "jo", "kit", "lee", "max", "nico", "pat",
    "quin", "ray", "sage", "tay", "val", "wren",
];

const DOMAIN_WORDS: &[&str] = &[
    "brightline", "cobalt", "driftwood", "emberworks", "fernhill", "gladeview", "harborlight",
    "ironoak", "juniper", "kestrel", "lakeshore", "mosshaven", "northpine", "opalridge",
    "quartzbay", "riverbend", "stonegate", "thistledown", "umberfield", "willowmere",
];

const TLDS: &[&str] = &["com", "org", "net", "io", "dev"];

const SLUG_WORDS: &[&str] = &[
    "about", "blog", "contact", "docs", "events", "faq", "gallery", "help", "news",
    "pricing", "projects", "resources", "support", "team", "updates",
];

/// Operations this pack registers, one factory per name.
pub const OPERATIONS: &[&str] = &["email", "domain", "url", "ipv4"];

/// Lowercase a name and keep only its alphanumeric characters.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Provider answering every internet-related operation.
pub struct InternetProvider {
    rng: SharedRng,
}

impl InternetProvider {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            rng: context.rng().clone(),
        }
    }

    fn pick_from(&self, items: &'static [&'static str]) -> &'static str {
        self.rng.pick(items).copied().unwrap_or_default()
    }

    fn domain(&self) -> String {
        format!("{}.{}", self.pick_from(DOMAIN_WORDS), self.pick_from(TLDS))
    }

    fn url(&self) -> String {
        format!(
            "https://{}/{}-{}",
            self.domain(),
            self.pick_from(SLUG_WORDS),
            self.pick_from(SLUG_WORDS)
        )
    }

    fn ipv4(&self) -> String {
        let octets: Vec<String> = (0..4)
            .map(|_| self.rng.range_u64(1, 254).to_string())
            .collect();
        octets.join(".")
    }

    /// Mailbox part from explicit names, or random handles when none given.
    fn email(&self, args: &[Value]) -> Result<String, ProviderSystemError> {
        let mut parts = Vec::new();
        for (position, arg) in args.iter().take(2).enumerate() {
            let name = arg
                .as_str()
                .ok_or_else(|| ProviderSystemError::InvalidArguments {
                    operation: "email".to_string(),
                    message: format!("argument {} must be a string", position + 1),
                })?;
            let sanitized = sanitize_name(name);
            if sanitized.is_empty() {
                return Err(ProviderSystemError::InvalidArguments {
                    operation: "email".to_string(),
                    message: format!("argument {} has no usable characters", position + 1),
                });
            }
            parts.push(sanitized);
        }
        if parts.is_empty() {
            parts.push(self.pick_from(HANDLES).to_string());
            parts.push(self.pick_from(HANDLES).to_string());
        }
        Ok(format!("{}@{}", parts.join("."), self.domain()))
    }
}

impl Provider for InternetProvider {
    fn name(&self) -> &'static str {
        "internet"
    }

    fn operations(&self) -> Vec<&'static str> {
        OPERATIONS.to_vec()
    }

    fn call(&self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError> {
        match operation {
            "email" => Ok(json!(self.email(args)?)),
            "domain" => Ok(json!(self.domain())),
            "url" => Ok(json!(self.url())),
            "ipv4" => Ok(json!(self.ipv4())),
            _ => Err(ProviderSystemError::UnsupportedOperation {
                provider: self.name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }
}

/// Pack registering one [`InternetProvider`] factory per operation.
#[derive(Default)]
pub struct InternetPack;

impl ProviderPack for InternetPack {
    fn name(&self) -> &'static str {
        "core-internet"
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
                Box::new(|ctx| Ok(Arc::new(InternetProvider::new(ctx)) as Arc<dyn Provider>)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::config::data::ConfigData;
    use mimic_core::provider::locator::ProviderLocator;

    fn seeded_provider(seed: u64) -> InternetProvider {
        let context = ProviderContext::new(SharedRng::from_seed(seed), Arc::new(ConfigData::new()));
        InternetProvider::new(&context)
    }

    #[test]
    fn test_email_from_explicit_names() {
        let provider = seeded_provider(1);
        let value = provider
            .call("email", &[json!("Mary Jane"), json!("O'Brien")])
            .expect("call failed");
        let email = value.as_str().expect("expected a string");

        let (mailbox, host) = email.split_once('@').expect("expected an @");
        assert_eq!(mailbox, "maryjane.obrien");
        assert!(host.contains('.'));
    }

    #[test]
    fn test_email_with_single_name() {
        let provider = seeded_provider(2);
        let value = provider
            .call("email", &[json!("Wes")])
            .expect("call failed");
        let email = value.as_str().expect("expected a string");
        assert!(email.starts_with("wes@"));
    }

    #[test]
    fn test_email_without_args_uses_random_handles() {
        let provider = seeded_provider(3);
        let value = provider.call("email", &[]).expect("call failed");
        let email = value.as_str().expect("expected a string");

        let (mailbox, _) = email.split_once('@').expect("expected an @");
        let (first, last) = mailbox.split_once('.').expect("expected two handles");
        assert!(HANDLES.contains(&first));
        assert!(HANDLES.contains(&last));
    }

    #[test]
    fn test_email_rejects_non_string_argument() {
        let provider = seeded_provider(4);
        let err = provider.call("email", &[json!(12)]).unwrap_err();
        assert!(matches!(err, ProviderSystemError::InvalidArguments { .. }));
    }

    #[test]
    fn test_email_rejects_unusable_name() {
        let provider = seeded_provider(5);
        let err = provider.call("email", &[json!("!!!")]).unwrap_err();
        match err {
            ProviderSystemError::InvalidArguments { operation, .. } => {
                assert_eq!(operation, "email");
            }
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_domain_uses_known_words() {
        let provider = seeded_provider(6);
        let value = provider.call("domain", &[]).expect("call failed");
        let domain = value.as_str().expect("expected a string");
        let (word, tld) = domain.split_once('.').expect("expected word.tld");
        assert!(DOMAIN_WORDS.contains(&word));
        assert!(TLDS.contains(&tld));
    }

    #[test]
    fn test_url_shape() {
        let provider = seeded_provider(7);
        let value = provider.call("url", &[]).expect("call failed");
        let url = value.as_str().expect("expected a string");
        assert!(url.starts_with("https://"));
        let path = url.trim_start_matches("https://");
        assert!(path.contains('/'), "missing path in {}", url);
    }

    #[test]
    fn test_ipv4_octets_in_range() {
        let provider = seeded_provider(8);
        for _ in 0..20 {
            let value = provider.call("ipv4", &[]).expect("call failed");
            let ip = value.as_str().expect("expected a string");
            let octets: Vec<u64> = ip
                .split('.')
                .map(|part| part.parse().expect("octet not a number"))
                .collect();
            assert_eq!(octets.len(), 4, "bad address {}", ip);
            assert!(octets.iter().all(|o| (1..=254).contains(o)), "bad address {}", ip);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = seeded_provider(42);
        let b = seeded_provider(42);
        for _ in 0..10 {
            assert_eq!(
                a.call("url", &[]).expect("call failed"),
                b.call("url", &[]).expect("call failed")
            );
        }
    }

    #[test]
    fn test_provider_advertises_operations() {
        let provider = seeded_provider(10);
        assert_eq!(provider.operations(), OPERATIONS.to_vec());
    }

    #[test]
    fn test_pack_registers_every_operation() {
        let context = ProviderContext::new(SharedRng::from_seed(9), Arc::new(ConfigData::new()));
        let mut locator = FactoryLocator::new(context).expect("locator failed");
        InternetPack.register(&mut locator).expect("register failed");

        let registered = locator.registered();
        assert_eq!(registered.len(), OPERATIONS.len());
        assert!(registered.contains(&"mimic::provider::Email".to_string()));
        assert!(registered.contains(&"mimic::provider::Ipv4".to_string()));
    }
}
