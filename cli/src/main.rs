//! halogen CLI: driving adapter for the HAL resource generator.
//!
//! Subcommands:
//! - `info`: print metadata types, their default strategies and the strategy catalog
//! - `check <config>`: validate a generator config applies without errors
//! - `array <data.json> [--uri URI]`: wrap a JSON object into a HAL resource

use std::process;

use halogen::{
    GeneratorConfig, Hydrators, LinkGenerator, MetadataKind, MetadataMap, ResourceGenerator,
    StrategyCatalog,
};
use halogen_test::RouteTable;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "info" => cmd_info(),
        "check" => cmd_check(&args[2..]),
        "array" => cmd_array(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_info() -> Result<(), String> {
    let generator = build_generator();

    println!("Metadata types:");
    for kind in MetadataKind::ALL {
        match generator.strategy(kind) {
            Some(strategy) => println!("  {kind} -> {strategy:?}"),
            None => println!("  {kind} -> (no strategy)"),
        }
    }

    println!("\nStrategy catalog:");
    for name in build_catalog().names() {
        println!("  {name}");
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("check requires a config file path".into());
    }

    let config = load_config(&args[0])?;
    let mut generator = build_generator();
    generator
        .apply_config(&config, &build_catalog())
        .map_err(|e| format!("config invalid: {e}"))?;

    println!(
        "Config valid ({} registrations, {} metadata types handled)",
        config.strategies.len(),
        generator.strategy_count()
    );
    Ok(())
}

fn cmd_array(args: &[String]) -> Result<(), String> {
    let (path, uri) = parse_array_args(args)?;
    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;
    let data = match serde_json::from_str(&content) {
        Ok(Value::Object(data)) => data,
        Ok(_) => return Err(format!("\"{path}\" must hold a JSON object")),
        Err(e) => return Err(format!("JSON parse error: {e}")),
    };

    let resource = build_generator().from_array(data, uri.as_deref());
    let rendered = serde_json::to_string_pretty(&resource)
        .map_err(|e| format!("failed to render resource: {e}"))?;
    println!("{rendered}");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Generator assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn build_catalog() -> StrategyCatalog {
    halogen_test::register(StrategyCatalog::with_builtins())
}

fn build_generator() -> ResourceGenerator {
    ResourceGenerator::new(
        MetadataMap::new(),
        Hydrators::with_defaults(),
        LinkGenerator::new(RouteTable::new()),
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<GeneratorConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    tracing::debug!(path, json = is_json, "loading generator config");

    if is_json {
        GeneratorConfig::from_json(&content).map_err(|e| e.to_string())
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_array_args(args: &[String]) -> Result<(String, Option<String>), String> {
    let mut path = None;
    let mut uri = None;
    let mut i = 0;

    while i < args.len() {
        if args[i] == "--uri" {
            let value = args
                .get(i + 1)
                .ok_or_else(|| "--uri requires a value".to_string())?;
            uri = Some(value.clone());
            i += 2;
        } else if args[i].starts_with("--") {
            return Err(format!("unexpected argument \"{}\"", args[i]));
        } else if path.is_none() {
            path = Some(args[i].clone());
            i += 1;
        } else {
            return Err(format!("unexpected argument \"{}\"", args[i]));
        }
    }

    let path = path.ok_or_else(|| "array requires a data file path".to_string())?;
    Ok((path, uri))
}

fn print_usage() {
    eprintln!(
        "Usage: halogen <command> [options]

Commands:
  info                             Print metadata types and strategies
  check <config>                   Validate a generator config (YAML or JSON)
  array <data.json> [--uri URI]    Render a JSON object as a HAL resource
  help                             Show this help

Set RUST_LOG=debug to trace strategy registration."
    );
}
