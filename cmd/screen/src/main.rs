//! medai-screen - screen one input file for stroke indicators.
//!
//! Loads the classifiers and standardization artifacts named by the config
//! file once, runs one modality over one file and prints the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use medai_screening::Modality;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

/// Stroke screening from a face photo, a limb-motion CSV or a speech recording.
///
/// Exit status: 0 on success, 2 when the input cannot be screened
/// (undecodable, no face, silent, ...), 1 on internal or artifact errors.
#[derive(Parser)]
#[command(name = "medai-screen")]
#[command(about = "Stroke screening feature pipelines and classifiers")]
#[command(version)]
pub struct Cli {
    /// Config file (default: $MEDAI_SCREEN_CONFIG, then ./screening.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one input file
    Analyze {
        #[arg(value_enum)]
        modality: ModalityArg,
        /// Input file (image, CSV or audio)
        file: PathBuf,
    },
    /// Print the feature vector the classifier would see
    Features {
        #[arg(value_enum)]
        modality: ModalityArg,
        /// Input file (image, CSV or audio)
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModalityArg {
    Face,
    Arm,
    Speech,
}

impl From<ModalityArg> for Modality {
    fn from(m: ModalityArg) -> Self {
        match m {
            ModalityArg::Face => Modality::Face,
            ModalityArg::Arm => Modality::Arm,
            ModalityArg::Speech => Modality::Speech,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match commands::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("medai-screen: {e:#}");
            ExitCode::from(1)
        }
    }
}
