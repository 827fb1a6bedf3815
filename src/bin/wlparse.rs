//! Command-line interface for wlparse
//! Extracts metrics from one summary report and prints them.
//!
//! Usage:
//!   wlparse extract `<path>` [--catalog `<file>`] [--targets `<set>`] [--format `<format>`]
//!   wlparse power `<path>` [--column `<name>`] [--format `<format>`]
//!   wlparse list-targets [--catalog `<file>`] [--targets `<set>`]
//!
//! Log output goes to stderr; set `RUST_LOG` (default `warn`) to see more.

use clap::{Arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use wlparse::wlparse::catalog::CatalogSection;
use wlparse::wlparse::formats::FormatRegistry;
use wlparse::wlparse::power::PowerSummaryParser;
use wlparse::{ParseError, SectionParser, TargetCatalog};

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let catalog_args = [
        Arg::new("catalog")
            .long("catalog")
            .short('c')
            .help("JSON or YAML file with the targets to extract"),
        Arg::new("targets")
            .long("targets")
            .short('t')
            .help("Target set: 'socwatch', 'pcie' or 'all'")
            .default_value("socwatch"),
    ];
    let format_arg = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format ('json' or 'simple')")
        .default_value("json");

    let matches = Command::new("wlparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract metrics from profiling summary reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("extract")
                .about("Extract catalog tables from a summary report")
                .arg(
                    Arg::new("path")
                        .help("Path to the summary report")
                        .required(true)
                        .index(1),
                )
                .args(catalog_args.clone())
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("power")
                .about("Read a power rail summary")
                .arg(
                    Arg::new("path")
                        .help("Path to the power summary")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("column")
                        .long("column")
                        .help("Column holding the rail values")
                        .default_value("Average"),
                )
                .arg(format_arg),
        )
        .subcommand(
            Command::new("list-targets")
                .about("List the targets of a catalog")
                .args(catalog_args),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("extract", extract_matches)) => handle_extract_command(extract_matches),
        Some(("power", power_matches)) => handle_power_command(power_matches),
        Some(("list-targets", list_matches)) => handle_list_targets_command(list_matches),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

/// Catalog from `--catalog`, or the built-in defaults for `--targets`.
fn load_catalog(matches: &ArgMatches) -> Result<TargetCatalog, String> {
    let set = matches
        .get_one::<String>("targets")
        .map(String::as_str)
        .unwrap_or("socwatch");
    let section = CatalogSection::from_name(set).ok_or_else(|| {
        format!("unknown target set '{}' (expected socwatch, pcie or all)", set)
    })?;

    if let Some(path) = matches.get_one::<String>("catalog") {
        return TargetCatalog::load(path, section).map_err(|e| e.to_string());
    }

    let catalog = match section {
        CatalogSection::Socwatch => TargetCatalog::socwatch_defaults(),
        CatalogSection::Pcie => TargetCatalog::pcie_defaults(),
        CatalogSection::All => {
            let targets = TargetCatalog::socwatch_defaults()
                .iter()
                .chain(TargetCatalog::pcie_defaults().iter())
                .cloned()
                .collect();
            TargetCatalog::new(targets).map_err(|e| e.to_string())?
        }
    };
    Ok(catalog)
}

fn format_name(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json")
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches) -> Result<String, String> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("missing report path")?;
    let catalog = load_catalog(matches)?;
    let document = SectionParser::new(&catalog)
        .parse_file(path)
        .map_err(|e: ParseError| e.to_string())?;

    let output = FormatRegistry::with_defaults()
        .serialize(&document.mapping, format_name(matches))
        .map_err(|e| e.to_string())?;
    Ok(with_newline(output))
}

/// Handle the power command
fn handle_power_command(matches: &ArgMatches) -> Result<String, String> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("missing power summary path")?;
    let mut parser = PowerSummaryParser::new();
    if let Some(column) = matches.get_one::<String>("column") {
        parser = parser.with_value_column(column.as_str());
    }
    let summary = parser.parse_file(path).map_err(|e| e.to_string())?;

    let output = FormatRegistry::with_defaults()
        .serialize(&summary.to_mapping(), format_name(matches))
        .map_err(|e| e.to_string())?;
    Ok(with_newline(output))
}

/// Handle the list-targets command
fn handle_list_targets_command(matches: &ArgMatches) -> Result<String, String> {
    let catalog = load_catalog(matches)?;
    let mut output = String::new();
    for target in &catalog {
        output.push_str(&format!("{}\t{}\n", target.key, target.lookup));
    }
    Ok(output)
}

fn with_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
