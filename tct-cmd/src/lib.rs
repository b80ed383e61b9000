//! Command implementations for the cyclone track CLI.
//!
//! Provides subcommands for fetching cyclone datasets from the data API,
//! computing density grids from fetched data, and exporting the fixed-
//! column CSV used by the map app.

use clap::Subcommand;

pub mod density;
pub mod fetch;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch cyclone data for a scenario/ensemble and write it as JSON
    Fetch {
        /// Data API endpoint URL
        #[arg(short, long)]
        endpoint: String,

        /// Scenario id: current, nat, 2k, or 4k
        #[arg(short, long)]
        scenario: String,

        /// Ensemble member id
        #[arg(short = 'm', long, default_value_t = 1)]
        ensemble: u32,

        /// SST model id (required for 2k/4k): CC, GF, HA, MI, MP, MR
        #[arg(long)]
        sst: Option<String>,

        /// Output path for the cyclone JSON
        #[arg(short, long)]
        output: String,
    },

    /// Compute a density grid from a fetched cyclone JSON file
    Density {
        /// Path to a cyclone JSON file written by `fetch`
        #[arg(short, long)]
        input: String,

        /// Grid resolution in degrees
        #[arg(short, long, default_value_t = 2.0)]
        resolution: f64,

        /// Output CSV path; a .gz suffix enables gzip compression
        #[arg(short, long)]
        output: String,
    },

    /// Export a fetched cyclone JSON file as the fixed-column CSV
    Export {
        /// Path to a cyclone JSON file written by `fetch`
        #[arg(short, long)]
        input: String,

        /// Optional inclusive year filter, e.g. 1960:1980
        #[arg(short, long)]
        years: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            endpoint,
            scenario,
            ensemble,
            sst,
            output,
        } => fetch::run_fetch(&endpoint, &scenario, ensemble, sst.as_deref(), &output).await,
        Command::Density {
            input,
            resolution,
            output,
        } => density::run_density(&input, resolution, &output),
        Command::Export {
            input,
            years,
            output,
        } => fetch::run_export(&input, years.as_deref(), &output),
    }
}
