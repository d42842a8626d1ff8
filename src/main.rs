//! trade-settlement CLI
//!
//! Settle trade-in deals from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a deal file
//! trade-settlement settle --input deal.json
//!
//! # Output as JSON
//! trade-settlement settle --input deal.json --format json
//!
//! # Standard percentage choices
//! trade-settlement options
//!
//! # Generate a random deal for testing
//! trade-settlement generate --vendor-items 3 --collector-items 6
//! ```

use log::{info, warn};
use std::fs;
use std::process;
use trade_settlement::allocation::summary::DealSummary;
use trade_settlement::config::{AllocationOrder, OutputFormat, SettlementConfig};
use trade_settlement::core::item::{validate_collector_items, validate_vendor_items};
use trade_settlement::core::percentage::percentage_options;
use trade_settlement::input::DealFile;
use trade_settlement::simulation::random_deal::{generate_random_deal, DealConfig};

fn print_usage() {
    eprintln!(
        r#"trade-settlement — settle trade-in deals between a vendor and a collector

USAGE:
    trade-settlement <COMMAND> [OPTIONS]

COMMANDS:
    settle      Settle a deal file
    options     List the standard percentage choices
    generate    Generate a random deal file (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>      Path to JSON deal file
    --format <FORMAT>   Output format: text (default) or json
    --order <ORDER>     Trade allocation order: descending (default), ascending or input

OPTIONS (generate):
    --vendor-items <N>      Number of vendor items (default: 5)
    --collector-items <N>   Number of collector items (default: 5)
    --output <FILE>         Write to file instead of stdout

Set RUST_LOG=debug to trace the allocation.

EXAMPLES:
    trade-settlement settle --input deal.json
    trade-settlement settle --input deal.json --format json --order ascending
    trade-settlement generate --vendor-items 2 --collector-items 8 --output deal.json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn next_value(args: &[String], i: &mut usize, flag: &str, expected: &str) -> String {
    *i += 1;
    args.get(*i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, expected)))
}

fn cmd_settle(args: &[String]) {
    let mut input_path = None;
    let mut format = OutputFormat::default();
    let mut config = SettlementConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => input_path = Some(next_value(args, &mut i, "--input", "a file path")),
            "--format" => {
                let value = next_value(args, &mut i, "--format", "'text' or 'json'");
                format = value.parse::<OutputFormat>().unwrap_or_else(|e| fail(e));
            }
            "--order" => {
                let value = next_value(args, &mut i, "--order", "an allocation order");
                config.order = value
                    .parse::<AllocationOrder>()
                    .unwrap_or_else(|e| fail(e));
            }
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| fail("--input <FILE> is required"));
    let deal = DealFile::load(&path).unwrap_or_else(|e| fail(e));
    info!(
        "loaded {} vendor and {} collector items from {}",
        deal.vendor.len(),
        deal.collector.len(),
        path
    );

    if let Err(e) = validate_vendor_items(&deal.vendor) {
        warn!("{}", e);
    }
    if let Err(e) = validate_collector_items(&deal.collector) {
        warn!("{}", e);
    }

    let summary = DealSummary::evaluate_with(&deal.vendor, &deal.collector, &config);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", summary),
    }
}

fn cmd_options() {
    let options: Vec<String> = percentage_options()
        .iter()
        .map(|p| format!("{}%", p.normalize()))
        .collect();
    println!("{}", options.join(" "));
}

fn cmd_generate(args: &[String]) {
    let mut config = DealConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--vendor-items" => {
                config.vendor_items = next_value(args, &mut i, "--vendor-items", "a number")
                    .parse()
                    .unwrap_or_else(|_| fail("--vendor-items requires a number"));
            }
            "--collector-items" => {
                config.collector_items =
                    next_value(args, &mut i, "--collector-items", "a number")
                        .parse()
                        .unwrap_or_else(|_| fail("--collector-items requires a number"));
            }
            "--output" => output_path = Some(next_value(args, &mut i, "--output", "a file path")),
            other => fail(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    let deal = generate_random_deal(&config);
    let json = deal.to_json().unwrap_or_else(|e| fail(e));

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("cannot write '{}': {}", path, e)));
        eprintln!(
            "Generated {} vendor and {} collector items → {}",
            deal.vendor.len(),
            deal.collector.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "options" => cmd_options(),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
