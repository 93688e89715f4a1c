//! CLI definition using clap

use clap::{Parser, Subcommand};
use ferry_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ferry-crossing")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Two-port ferry crossing simulation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug-level event log)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Suppress the event log, print only the report
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a simulation
    Run {
        /// Number of cars. Uses config value if not specified.
        #[arg(long)]
        cars: Option<u32>,

        /// Number of minibuses
        #[arg(long)]
        minibuses: Option<u32>,

        /// Number of trucks
        #[arg(long)]
        trucks: Option<u32>,

        /// Ferry capacity in units (car=1, minibus=2, truck=3)
        #[arg(long, short = 'c')]
        capacity: Option<u32>,

        /// RNG seed for port and gate assignment
        #[arg(long, short = 's')]
        seed: Option<u64>,

        /// Port the ferry starts at (0 or 1)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        start_port: Option<u8>,

        /// Multiply every delay by this factor (0 = no waiting)
        #[arg(long, short = 't')]
        time_scale: Option<f64>,

        /// Keep the ferry running until every vehicle has crossed
        #[arg(long)]
        drain: bool,

        /// Include the full event journal in JSON output
        #[arg(long)]
        events: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default ferry capacity
        #[arg(long)]
        set_capacity: Option<u32>,

        /// Set default time scale
        #[arg(long)]
        set_time_scale: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set a fixed seed
        #[arg(long)]
        set_seed: Option<u64>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
