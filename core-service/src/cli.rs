use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use flow_idps_core::constants::DEFAULT_DETAIL_ROWS;
use flow_idps_core::logic::dataset::TrafficKind;
use flow_idps_core::RecordPolicy;

#[derive(Parser)]
#[command(name = "flow-idps")]
#[command(author, version, about = "Batch intrusion detection over network-flow statistics")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every flow in a CSV batch and print the report
    Analyze {
        /// CSV file with the 78 feature columns
        file: PathBuf,

        /// ONNX model (overrides IDPS_MODEL_PATH)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Attack probability threshold in [0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Per-record failure handling (fail-fast, skip)
        #[arg(short, long)]
        policy: Option<RecordPolicy>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Detailed result rows in text output
        #[arg(long, default_value_t = DEFAULT_DETAIL_ROWS)]
        rows: usize,

        /// Score records in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Write a labelled synthetic batch
    Generate {
        /// Traffic to generate
        #[arg(short, long, value_enum, default_value_t = GenerateKind::Mixed)]
        kind: GenerateKind,

        /// Number of flows
        #[arg(short, long, default_value = "1000")]
        count: usize,

        /// Output CSV path
        #[arg(short, long)]
        out: PathBuf,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the feature schema
    Schema {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateKind {
    Normal,
    Ddos,
    Portscan,
    Generic,
    /// Normal, ddos, portscan and generic in a 10:5:3:2 split
    Mixed,
}

impl GenerateKind {
    /// `None` for the mixed dataset
    pub fn traffic_kind(self) -> Option<TrafficKind> {
        match self {
            GenerateKind::Normal => Some(TrafficKind::Normal),
            GenerateKind::Ddos => Some(TrafficKind::Ddos),
            GenerateKind::Portscan => Some(TrafficKind::Portscan),
            GenerateKind::Generic => Some(TrafficKind::Generic),
            GenerateKind::Mixed => None,
        }
    }
}
