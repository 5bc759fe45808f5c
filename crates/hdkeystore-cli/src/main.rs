//! HD Keystore CLI — derive hierarchical keys from a hex seed
//!
//! # Usage
//!
//! ```bash
//! hdkeystore --seed 0101...01 --path m/0/1
//! HDKEYSTORE_SEED=0101...01 hdkeystore --path m/44/0 --path m/44/1
//! hdkeystore --config hdkeystore.toml --validate
//! ```

mod config;

use anyhow::{Context, Result};
use hdkeystore_core::{DerivationPath, KeyMaterial, Store};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const DEFAULT_CONFIG_PATH: &str = "hdkeystore.toml";

fn main() -> Result<()> {
    // Security hardening: disable core dumps before the seed is anywhere in memory
    let core_dumps_disabled = hdkeystore_core::memory::disable_core_dumps();

    // Parse CLI args (minimal — no clap dependency needed)
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut seed_hex: Option<Zeroizing<String>> = None;
    let mut paths: Vec<DerivationPath> = Vec::new();
    let mut validate_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let value = args.get(i).context("--config requires a path argument")?;
                config_path = Some(PathBuf::from(value));
            }
            "--seed" | "-s" => {
                i += 1;
                let value = args.get(i).context("--seed requires a hex argument")?;
                seed_hex = Some(Zeroizing::new(value.clone()));
            }
            "--path" | "-p" => {
                i += 1;
                let value = args.get(i).context("--path requires a path argument")?;
                let path = value
                    .parse::<DerivationPath>()
                    .with_context(|| format!("Invalid derivation path: {}", value))?;
                paths.push(path);
            }
            "--validate" => {
                validate_only = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("hdkeystore {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    let mut cli_config =
        config::CliConfig::load(config_path.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
            .context("Failed to load config")?;
    cli_config.apply_env_overrides();
    cli_config
        .validate()
        .context("Configuration validation failed")?;

    env_logger::Builder::new()
        .parse_filters(&cli_config.logging.level)
        .init();

    if !core_dumps_disabled {
        log::warn!("Core dumps are still enabled; a crash may write key material to disk");
    }

    if validate_only {
        println!("Configuration is valid.");
        println!("  Variant:     {:?}", cli_config.hash.variant);
        println!("  Iterations:  {}", cli_config.hash.t_cost);
        println!("  Memory:      {} KiB", cli_config.hash.m_cost);
        println!("  Parallelism: {}", cli_config.hash.p_cost);
        return Ok(());
    }

    let seed_hex = match seed_hex {
        Some(seed_hex) => seed_hex,
        None => Zeroizing::new(
            std::env::var("HDKEYSTORE_SEED")
                .context("No seed given: pass --seed or set HDKEYSTORE_SEED")?,
        ),
    };
    let seed = Zeroizing::new(hex::decode(seed_hex.trim()).context("Seed must be hex encoded")?);
    anyhow::ensure!(!seed.is_empty(), "Seed must not be empty");

    if paths.is_empty() {
        paths.push(DerivationPath::root());
    }

    log::info!(
        "Generating root key (t={}, m={} KiB, p={})…",
        cli_config.hash.t_cost,
        cli_config.hash.m_cost,
        cli_config.hash.p_cost
    );
    let store =
        Store::with_config(&seed, cli_config.hash.clone()).context("Failed to create key store")?;

    for path in &paths {
        let key = store
            .key_at(path)
            .with_context(|| format!("Failed to derive {}", path))?;
        print_key(path, &key);
    }

    Ok(())
}

fn print_key(path: &DerivationPath, key: &KeyMaterial) {
    let private_key = Zeroizing::new(hex::encode(key.private_key()));
    let chain_code = Zeroizing::new(hex::encode(key.chain_code()));
    println!("{}", path);
    println!("  private key: {}", private_key.as_str());
    println!("  chain code:  {}", chain_code.as_str());
}

fn print_help() {
    println!(
        r#"HD Keystore — deterministic hierarchical key derivation

USAGE:
    hdkeystore [OPTIONS]

OPTIONS:
    -c, --config <PATH>   Config file path (default: ./hdkeystore.toml if present)
    -s, --seed <HEX>      Seed bytes, hex encoded
    -p, --path <PATH>     Derivation path, e.g. m/0/1 or m/0x00ff (repeatable, default: m)
    --validate            Validate configuration and exit
    -h, --help            Show this help message
    -V, --version         Show version

ENVIRONMENT VARIABLES (override config file):
    HDKEYSTORE_SEED         Seed bytes, hex encoded (used when --seed is absent)
    HDKEYSTORE_T_COST       Argon2 iterations
    HDKEYSTORE_M_COST       Argon2 memory in KiB
    HDKEYSTORE_P_COST       Argon2 parallelism
    HDKEYSTORE_LOG_LEVEL    Log level (off/error/warn/info/debug/trace)

EXAMPLES:
    # Root key material
    hdkeystore --seed 01010101010101010101010101010101

    # Two accounts from the same seed
    hdkeystore --seed 0101... --path m/0/0 --path m/0/1
"#
    );
}
