//! schemareg CLI — publish, fetch and list ledger schemas from the terminal.
//!
//! Usage:
//! ```bash
//! # Accept the ledger's Transaction Authors Agreement
//! schemareg accept-taa --url http://localhost:8021
//!
//! # Publish a schema and make it the issuer default
//! schemareg publish --name degree --version 1.0 --attr name --attr score --default
//!
//! # List schemas created by this agent
//! schemareg ids --name degree
//!
//! # Fetch a schema by id
//! schemareg fetch --id WgWxqztrNooG92RXvxSTWv:2:degree:1.0
//! ```

mod logging;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};

use schemareg_core::{RegistrySlot, SchemaDefinition, SchemaRegistryClient};
use schemareg_http::{AdminConfig, HttpAdminTransport};

use logging::{init_tracing, LogConfig};

const URL_ENV: &str = "SCHEMAREG_ADMIN_URL";
const API_KEY_ENV: &str = "SCHEMAREG_API_KEY";

static REGISTRY: RegistrySlot = RegistrySlot::new();

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let rest = &args[2..];
    match log_config(rest) {
        Ok(config) => init_tracing(&config),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }

    let result = match args[1].as_str() {
        "accept-taa" => cmd_accept_taa(rest).await,
        "publish" => cmd_publish(rest).await,
        "ids" => cmd_ids(rest).await,
        "fetch" => cmd_fetch(rest).await,
        "version" | "--version" | "-V" => {
            println!("schemareg {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("schemareg {}", env!("CARGO_PKG_VERSION"));
    println!("Publish and fetch credential schemas through a ledger agent's admin API\n");
    println!("USAGE:");
    println!("    schemareg <COMMAND> [FLAGS]\n");
    println!("COMMANDS:");
    println!("    accept-taa  Accept the ledger's Transaction Authors Agreement");
    println!("    publish     Publish a schema");
    println!("    ids         List ids of schemas created by this agent");
    println!("    fetch       Fetch a schema by id");
    println!("    version     Print version");
    println!("    help        Print this help\n");
    println!("COMMON FLAGS:");
    println!("    --url <URL>          Admin API base URL  [env: {URL_ENV}]");
    println!("    --api-key <KEY>      Admin API key       [env: {API_KEY_ENV}]");
    println!("    --log-level <LEVEL>  Log level (default: warn)");
    println!("    --log-component <NAME=LEVEL>  Per-crate log level, repeatable");
    println!("    --json-logs          Emit JSON logs\n");
    println!("PUBLISH FLAGS:");
    println!("    --name <NAME> --version <VERSION> --attr <ATTR>... [--default] [--public]\n");
    println!("IDS FLAGS:");
    println!("    [--name <NAME>] [--version <VERSION>]\n");
    println!("FETCH FLAGS:");
    println!("    --id <ID> [--default] [--public]");
}

fn log_config(args: &[String]) -> Result<LogConfig> {
    let mut config = LogConfig::default();
    if let Some(level) = parse_flag(args, "--log-level")? {
        config.level = level;
    }
    for spec in parse_multi(args, "--log-component")? {
        if !config.add_component(&spec) {
            bail!("--log-component expects NAME=LEVEL, got {spec:?}");
        }
    }
    config.json = has_flag(args, "--json-logs");
    Ok(config)
}

fn admin_config(args: &[String]) -> Result<AdminConfig> {
    let url = parse_flag(args, "--url")?
        .or_else(|| env::var(URL_ENV).ok())
        .ok_or_else(|| anyhow!("--url is required (or set {URL_ENV})"))?;
    let mut config = AdminConfig::new(url);
    if let Some(key) = parse_flag(args, "--api-key")?.or_else(|| env::var(API_KEY_ENV).ok()) {
        config = config.with_api_key(key);
    }
    Ok(config)
}

fn registry(args: &[String]) -> Result<Arc<SchemaRegistryClient>> {
    let transport = HttpAdminTransport::new(admin_config(args)?)
        .context("failed to build admin transport")?;
    Ok(REGISTRY.get(Some(Arc::new(transport)))?)
}

async fn cmd_accept_taa(args: &[String]) -> Result<()> {
    let registry = registry(args)?;
    if registry.sign_agreement().await? {
        println!("TAA accepted by {}", registry.base_url());
        Ok(())
    } else {
        bail!("TAA was not accepted by {}", registry.base_url())
    }
}

async fn cmd_publish(args: &[String]) -> Result<()> {
    let name = parse_flag(args, "--name")?.ok_or_else(|| anyhow!("--name is required"))?;
    let version =
        parse_flag(args, "--version")?.ok_or_else(|| anyhow!("--version is required"))?;
    let attrs = parse_multi(args, "--attr")?;
    if attrs.is_empty() {
        bail!("at least one --attr is required");
    }

    let mut definition = SchemaDefinition::new(name, version, attrs);
    definition.default = has_flag(args, "--default");
    definition.public = has_flag(args, "--public");

    let registry = registry(args)?;
    let record = registry.publish_schema(&definition).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn cmd_ids(args: &[String]) -> Result<()> {
    let name = parse_flag(args, "--name")?;
    let version = parse_flag(args, "--version")?;
    let registry = registry(args)?;
    let ids = registry
        .fetch_schema_ids(name.as_deref(), version.as_deref())
        .await?;
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

async fn cmd_fetch(args: &[String]) -> Result<()> {
    let id = parse_flag(args, "--id")?.ok_or_else(|| anyhow!("--id is required"))?;
    let registry = registry(args)?;
    let record = registry
        .fetch_schema(&id, has_flag(args, "--default"), has_flag(args, "--public"))
        .await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Value of `flag`, if present. A flag followed by nothing or by another
/// `--flag` is an error.
fn parse_flag(args: &[String], flag: &str) -> Result<Option<String>> {
    match args.iter().position(|a| a == flag) {
        Some(pos) => flag_value(args, pos).map(Some),
        None => Ok(None),
    }
}

/// Every value of a repeatable `flag`.
fn parse_multi(args: &[String], flag: &str) -> Result<Vec<String>> {
    args.iter()
        .enumerate()
        .filter(|(_, a)| *a == flag)
        .map(|(pos, _)| flag_value(args, pos))
        .collect()
}

fn flag_value(args: &[String], pos: usize) -> Result<String> {
    match args.get(pos + 1) {
        Some(value) if !value.starts_with("--") => Ok(value.clone()),
        _ => bail!("{} requires a value", args[pos]),
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
