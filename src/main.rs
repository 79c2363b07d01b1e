//! Item Forge - Entry Point
//!
//! Builds a host from a catalog, loads the forge configuration, runs the
//! host's setup (which triggers the forge mod once), and prints what was
//! created.

use std::path::PathBuf;

use clap::Parser;
use item_forge::core::config::ForgeConfig;
use item_forge::core::error::Result;
use item_forge::host::{ForgeMod, Host};
use item_forge::registry::{Catalog, TemplateSource};
use tracing_subscriber::EnvFilter;

/// Forge new items from registered templates
#[derive(Parser, Debug)]
#[command(name = "item-forge")]
#[command(about = "Clone template items, patch them, and register them under new ids")]
struct Args {
    /// Host catalog (TOML). Uses the built-in catalog if omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Forge configuration (TOML). Uses the built-in ULTRA backpack if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print run reports as JSON
    #[arg(long)]
    json: bool,

    /// Log filter directive
    #[arg(long, default_value = "item_forge=info")]
    log_filter: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_filter))
        .init();

    tracing::info!("Item Forge starting...");

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let config = match &args.config {
        Some(path) => ForgeConfig::load(path)?,
        None => ForgeConfig::default(),
    };

    let mut host = Host::from_catalog(&catalog)?;
    let mut forge_mod = ForgeMod::new(config);
    host.run_setup(&mut [&mut forge_mod])?;

    if args.json {
        let reports = forge_mod.reports();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_summary(&host, &forge_mod);
    }

    Ok(())
}

fn print_summary(host: &Host, forge_mod: &ForgeMod) {
    println!();
    println!("=== ITEM FORGE ===");
    for run in forge_mod.runs() {
        match &run.result {
            Ok(report) => {
                println!("  [ok]   {} -> id {}", run.display_name, report.new_id);
                println!(
                    "         tags: {:?}, slots: {}, max weight: {}",
                    report.tags,
                    report.slot_ids.len(),
                    report
                        .max_weight
                        .map_or_else(|| "-".to_string(), |w| format!("{:+}", w))
                );
                if !report.unknown_attributes.is_empty() {
                    println!("         unknown attributes: {:?}", report.unknown_attributes);
                }
                if let Some(item) = host.items().get_prefab(report.new_id) {
                    println!(
                        "         weight {}, value {}, quality {}",
                        item.weight(),
                        item.value(),
                        item.quality()
                    );
                }
            }
            Err(e) => println!(
                "  [fail] {} ({}, {:?}): {}",
                run.display_name,
                run.new_id,
                run.stage(),
                e
            ),
        }
    }
    println!(
        "\n{} native items, {} dynamic items registered.",
        host.items().native_len(),
        host.items().dynamic_len()
    );
}
