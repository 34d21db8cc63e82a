// Entry point and high-level CLI flow.
//
// - `generate` loads the warehouse, resolves the scope, computes availability
//   and writes the sections, listings, availability and summary files.
// - `options` prints the selectable units of a grouping.
mod cli;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, GenerateArgs, OptionsArgs};
use trade_report::error::ReportError;
use trade_report::loader::{self, CsvGeography, Warehouse};
use trade_report::output;
use trade_report::periods::ReportPeriods;
use trade_report::reports::generate_report;
use trade_report::scope::ScopeResolver;
use trade_report::summary::build_summary;
use trade_report::util;
use tracing_subscriber::EnvFilter;

const SECTIONS_FILE: &str = "sections.csv";
const LISTINGS_FILE: &str = "listings.csv";
const AVAILABILITY_FILE: &str = "availability.csv";
const REPORT_FILE: &str = "report.json";
const SUMMARY_FILE: &str = "summary.json";

/// Handle `generate`: build one report and write every output file.
fn handle_generate(args: GenerateArgs) -> Result<(), ReportError> {
    let (warehouse, load_report) = Warehouse::open(&args.data_dir)?;
    println!(
        "Processing warehouse... ({} rows read, {} loaded)",
        util::format_int(load_report.total_rows as i64),
        util::format_int(load_report.loaded_rows as i64)
    );
    if load_report.parse_errors > 0 || load_report.unknown_keys > 0 {
        println!(
            "Note: {} rows skipped due to parse errors, {} with unknown keys.",
            util::format_int(load_report.parse_errors as i64),
            util::format_int(load_report.unknown_keys as i64)
        );
    }

    let geography = CsvGeography::load(&args.data_dir)?;
    let scope = ScopeResolver::new(&geography).resolve(args.grouping, args.unit.as_deref(), args.threshold)?;
    let periods = ReportPeriods::from_parameters(&loader::load_parameters(&args.data_dir)?)?;

    println!("Generating report for {} ({})...\n", scope.display_unit(), scope.kind());
    let report = generate_report(&warehouse, &scope, &periods)?;
    let summary = build_summary(&report, Utc::now());

    std::fs::create_dir_all(&args.out_dir)?;
    let availability = output::availability_rows(&report);
    let sections = output::section_rows(&report);
    let listings = output::listing_rows(&report);
    output::write_csv(&args.out_dir.join(AVAILABILITY_FILE), &availability)?;
    output::write_csv(&args.out_dir.join(SECTIONS_FILE), &sections)?;
    output::write_csv(&args.out_dir.join(LISTINGS_FILE), &listings)?;
    output::write_json(&args.out_dir.join(REPORT_FILE), &report)?;
    output::write_json(&args.out_dir.join(SUMMARY_FILE), &summary)?;

    println!(
        "Availability: {} of {} indicators with data\n",
        summary.available_indicators, summary.total_indicators
    );
    output::preview_table_rows(&availability, args.preview_rows);

    println!("Sections ({} rows)\n", util::format_int(sections.len() as i64));
    output::preview_table_rows(&sections, args.preview_rows);

    println!("Listings ({} rows)\n", util::format_int(listings.len() as i64));
    output::preview_table_rows(&listings, args.preview_rows);

    println!("Summary ({}):", SUMMARY_FILE);
    for headline in &summary.headlines {
        println!("- {}", headline.text);
    }
    println!("\n(Outputs exported to {})", args.out_dir.display());
    Ok(())
}

/// Handle `options`: print the units selectable for a grouping.
fn handle_options(args: OptionsArgs) -> Result<(), ReportError> {
    let geography = CsvGeography::load(&args.data_dir)?;
    let options = ScopeResolver::new(&geography).options(args.grouping);
    println!("{} units for {}:", options.len(), args.grouping);
    for unit in options {
        println!("  {}", unit);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate(args) => handle_generate(args),
        Commands::Options(args) => handle_options(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
