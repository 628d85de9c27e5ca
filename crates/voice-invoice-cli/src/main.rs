mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::batch::BatchArgs;
use commands::format::FormatArgs;
use commands::preview::PreviewArgs;
use commands::rates::RatesArgs;
use commands::totals::TotalsArgs;
use commands::validate::ValidateArgs;

/// Invoice totals for UK trade jobs
#[derive(Parser)]
#[command(
    name = "vinv",
    version,
    about = "Invoice totals for UK trade jobs",
    long_about = "Computes labour, materials, CIS and VAT totals for trade invoices \
                  with decimal precision, using the same engine as the web app's PDF, \
                  payment-link, email and listing views."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute totals for one invoice
    Totals(TotalsArgs),
    /// Preview the invoice totals block, material rows and amounts due
    Preview(PreviewArgs),
    /// Compute totals for a list of invoices, with page sums
    Batch(BatchArgs),
    /// Strictly validate an invoice before it is saved
    Validate(ValidateArgs),
    /// Format an amount as GBP
    Format(FormatArgs),
    /// Show the rate regime that would be applied
    Rates(RatesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Totals(args) => commands::totals::run_totals(args),
        Commands::Preview(args) => commands::preview::run_preview(args),
        Commands::Batch(args) => commands::batch::run_batch(args),
        Commands::Validate(args) => commands::validate::run_validate(args),
        Commands::Format(args) => commands::format::run_format(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Version => {
            println!("vinv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            logging::log_warnings(&value);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
