//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use fleet_types::OutputFormat;

#[derive(Parser)]
#[command(name = "fleet-efficiency")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Per-vehicle fuel efficiency and ticket revenue analysis")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a workbook, list every vehicle, and show the fleet summary
    Analyze {
        /// Workbook or CSV with vehicle no, distance, diesel, ticket sales
        file: PathBuf,

        /// Directory for the efficiency and ticket sales charts
        #[arg(long)]
        charts: Option<PathBuf>,

        /// Do not draw charts
        #[arg(long)]
        no_charts: bool,

        /// Reject rows with malformed numbers (overrides config)
        #[arg(long)]
        strict: bool,
    },

    /// Write vehicle_analysis.csv (and optionally vehicle_analysis.xlsx)
    Export {
        /// Workbook or CSV with vehicle no, distance, diesel, ticket sales
        file: PathBuf,

        /// Output directory. Uses config value, then the current directory.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also write an Excel workbook
        #[arg(long)]
        excel: bool,

        /// Reject rows with malformed numbers (overrides config)
        #[arg(long)]
        strict: bool,
    },

    /// Email the best and worst vehicle summary
    Email {
        /// Workbook or CSV with vehicle no, distance, diesel, ticket sales
        file: PathBuf,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// EmailJS public key (overrides config)
        #[arg(long, env = "EMAILJS_PUBLIC_KEY")]
        public_key: Option<String>,

        /// Reject rows with malformed numbers (overrides config)
        #[arg(long)]
        strict: bool,
    },

    /// Interactive session: upload, finalize, email and download on demand
    Session {
        /// Directory for charts and downloads
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set EmailJS service id
        #[arg(long)]
        set_service_id: Option<String>,

        /// Set EmailJS template id
        #[arg(long)]
        set_template_id: Option<String>,

        /// Set EmailJS public key
        #[arg(long)]
        set_public_key: Option<String>,

        /// Set EmailJS endpoint URL
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Set default output directory
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Enable/disable strict number parsing
        #[arg(long)]
        set_strict: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
