use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod load;

/// Landing distance estimation CLI
#[derive(Parser)]
#[command(name = "ldcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the four chart CSV files
    #[arg(short, long, env = "LDCALC_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate landing distance for a single scenario
    Estimate {
        /// Pressure altitude in feet
        #[arg(long, default_value_t = 2000.0)]
        pressure_alt: f64,

        /// Outside air temperature in degrees Celsius
        #[arg(long, default_value_t = 15.0, allow_hyphen_values = true)]
        oat: f64,

        /// Landing weight in lb
        #[arg(long, default_value_t = 11_500)]
        weight: i32,

        /// Wind speed in kt (negative = tailwind)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        wind: i32,

        /// Use the legacy chart-style step lookup
        #[arg(short, long)]
        chart: bool,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Estimate landing distance for multiple scenarios from a CSV file
    Batch {
        /// Input CSV with pressure_alt, oat, weight and wind columns
        input: PathBuf,

        /// Output file (input name with `_distances` appended if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the legacy chart-style step lookup
        #[arg(short, long)]
        chart: bool,
    },

    /// Display information about the chart tables in the data directory
    Info,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            pressure_alt,
            oat,
            weight,
            wind,
            chart,
            json,
        } => commands::estimate::run(cli.data_dir, pressure_alt, oat, weight, wind, chart, json),
        Commands::Batch {
            input,
            output,
            chart,
        } => commands::batch::run(cli.data_dir, input, output, chart),
        Commands::Info => commands::info::run(cli.data_dir),
    }
}
