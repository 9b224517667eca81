use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::Value;

use mimic_core::config::data::ConfigData;
use mimic_core::kernel::bootstrap::{Engine, EngineOptions};
use mimic_core::kernel::constants;
use mimic_core::kernel::error::Error;
use mimic_core::provider::context::ProviderContext;
use mimic_core::provider::locator::FactoryLocator;
use mimic_core::provider::manager::ProviderManager;

// Provider packs registered statically at startup
use core_commerce::CommercePack;
use core_internet::InternetPack;
use core_person::PersonPack;

const GENERATE_COUNT_KEY: &str = "generate.count";
const DEFAULT_GENERATE_COUNT: usize = 10;

// Record layout used by `generate` when no --field mappings are given.
const DEFAULT_FIELDS: &[(&str, &str)] = &[
    ("name", "fullName"),
    ("email", "email"),
    ("amount", "amount"),
    ("currency", "currency"),
    ("status", "paymentStatus"),
    ("created_at", "createdAt"),
];

/// Mimic: deterministic test-data generation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Path to a generation profile (.json, .yaml, or .toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed the shared RNG for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Invoke a single operation and print its value as JSON
    Invoke {
        /// Operation name, e.g. "fullName" or "amount"
        operation: String,
        /// Positional arguments, parsed as JSON with plain-string fallback
        args: Vec<String>,
    },
    /// Inspect providers
    Provider {
        #[command(subcommand)]
        command: ProviderCommand,
    },
    /// Generate records as JSON lines
    Generate {
        /// Number of records (falls back to the profile's "generate.count", then 10)
        #[arg(long)]
        count: Option<usize>,
        /// Field mapping, repeatable; defaults to a donation-shaped record
        #[arg(long = "field", value_name = "KEY=OPERATION")]
        fields: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProviderCommand {
    /// List resolvable provider identifiers
    List {},
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::new().filter_or(constants::LOG_ENV_VAR, "info"),
    )
    .init();

    let args = CliArgs::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading profile from {}", path.display());
            ConfigData::load_path(path).await?
        }
        None => ConfigData::new(),
    };
    if let Some(seed) = args.seed {
        config.set(constants::SEED_CONFIG_KEY, seed)?;
    }

    let context = ProviderContext::from_config(config.clone());
    let mut locator = FactoryLocator::new(context)?;
    locator.register_pack(&PersonPack)?;
    locator.register_pack(&InternetPack)?;
    locator.register_pack(&CommercePack)?;

    let mut engine = Engine::with_options(EngineOptions {
        config,
        locator: Box::new(locator),
    })?;
    engine.initialize().await?;
    engine.start().await?;

    let outcome = execute(&engine, args.command).await;

    // Shut down even when the command failed; the command error wins.
    let shutdown = engine.shutdown().await;
    outcome?;
    shutdown
}

async fn execute(engine: &Engine, command: Commands) -> Result<(), Error> {
    match command {
        Commands::Invoke { operation, args } => {
            let manager = engine.provider_manager().await?;
            let values: Vec<Value> = args.iter().map(|raw| parse_arg(raw)).collect();
            let result = manager.invoke(&operation, &values).await?;
            println!("{}", result);
            Ok(())
        }
        Commands::Provider {
            command: ProviderCommand::List {},
        } => {
            let manager = engine.provider_manager().await?;
            for ident in manager.available_providers().await {
                println!("{}", ident);
            }
            Ok(())
        }
        Commands::Generate { count, fields } => {
            let manager = engine.provider_manager().await?;
            let count = match count {
                Some(n) => n,
                None => {
                    let config_manager = engine.config_manager().await?;
                    config_manager
                        .get_or(GENERATE_COUNT_KEY, DEFAULT_GENERATE_COUNT)
                        .await
                }
            };
            let fields = parse_fields(&fields)?;
            debug!("Generating {} record(s) with {} field(s)", count, fields.len());

            for _ in 0..count {
                let mut record = serde_json::Map::new();
                for (key, operation) in &fields {
                    let value = manager.invoke(operation, &[]).await?;
                    record.insert(key.clone(), value);
                }
                println!("{}", Value::Object(record));
            }
            Ok(())
        }
    }
}

/// Treat each raw argument as JSON when it parses, and as a string otherwise,
/// so `invoke amount 5 10` and `invoke email Ada Lovelace` both do what they
/// look like.
fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_fields(raw_fields: &[String]) -> Result<Vec<(String, String)>, Error> {
    if raw_fields.is_empty() {
        return Ok(DEFAULT_FIELDS
            .iter()
            .map(|(key, operation)| (key.to_string(), operation.to_string()))
            .collect());
    }
    raw_fields
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .filter(|(key, operation)| !key.is_empty() && !operation.is_empty())
                .map(|(key, operation)| (key.to_string(), operation.to_string()))
                .ok_or_else(|| {
                    Error::Other(format!(
                        "invalid --field '{}', expected KEY=OPERATION",
                        raw
                    ))
                })
        })
        .collect()
}
