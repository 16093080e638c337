//! locnorm — POI location normalization and validation runner.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod run;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LOCNORM_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_usage() {
    println!("locnorm — POI location normalization and validation");
    println!();
    println!("Usage: locnorm <command>");
    println!();
    println!("Commands:");
    println!("  run <input-dir> [output-dir]   Build brand collections and reports");
    println!("  validate <collections-dir>     Re-validate written collections");
    println!("  help                           Show this help message");
    println!();
    println!("Environment:");
    println!("  LOCNORM_DATA_DIR        data root (default: ./data)");
    println!("  LOCNORM_REFERENCE_DIR   reference tables (default: <data>/reference)");
    println!("  LOCNORM_OUTPUT_DIR      output directory (default: <data>/output)");
    println!("  LOCNORM_WORKERS         brand worker threads (default: all cores)");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        std::process::exit(1);
    };

    let data_dir = resolve_data_dir();
    let mut config = locnorm_core::LocnormConfig::from_env(&data_dir);

    let report = match command.as_str() {
        "run" => {
            let Some(input) = args.get(2) else {
                eprintln!("Usage: locnorm run <input-dir> [output-dir]");
                std::process::exit(1);
            };
            if let Some(output) = args.get(3) {
                config = config.with_output_dir(output);
            }
            info!("Reference directory: {}", config.reference.root.display());
            run::run(&PathBuf::from(input), &config)?
        }
        "validate" => {
            let Some(dir) = args.get(2) else {
                eprintln!("Usage: locnorm validate <collections-dir>");
                std::process::exit(1);
            };
            run::validate_dir(&PathBuf::from(dir), &config)?
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        other => {
            eprintln!("Unknown command: {}. Use 'locnorm help' for usage.", other);
            std::process::exit(1);
        }
    };

    run::print_report(&report);
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
