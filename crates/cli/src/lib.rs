pub mod defaults;
pub mod infer;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wings_core::WingsConfig;

#[derive(Parser)]
#[command(
    name = "wings",
    version,
    about = "Infer data catalog entries from dataset names",
    long_about = "Wings derives catalog entries from the names a pipeline uses for its inputs \
                  and outputs. A dataset called 02_intermediate/model_input.parquet is stored \
                  at data/02_intermediate/model_input.parquet as a pandas.ParquetDataSet, \
                  without being declared in the catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a dataset name is split and which entry it produces
    Parse {
        /// Dataset name, e.g. 02_intermediate/data.profile.html
        #[arg(value_name = "IDENTIFIER")]
        identifier: String,

        /// Wings configuration file (JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Namespace prefix to strip, may be repeated
        #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
        namespaces: Vec<String>,
    },
    /// Print the catalog entries created for a pipeline
    #[command(
        long_about = "Reads a pipeline description ({\"nodes\": [{\"inputs\": [...], \"outputs\": [...]}]}, \
                            or an object of named pipelines) and prints the entries wings would add \
                            to the catalog before the pipeline runs."
    )]
    Infer {
        /// Pipeline description file (JSON)
        #[arg(value_name = "PIPELINE")]
        pipeline: PathBuf,

        /// Wings configuration file (JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Existing catalog file (JSON object of dataset name to entry)
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Print the whole resulting catalog instead of only the new entries
        #[arg(long)]
        all: bool,
    },
    /// List the dataset types known without configuration
    Defaults,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = wings_core::logging::init_logging("cli", true);

    let output = match cli.command {
        Commands::Parse {
            identifier,
            config,
            namespaces,
        } => parse::run(&identifier, config.as_deref(), namespaces)?,
        Commands::Infer {
            pipeline,
            config,
            catalog,
            all,
        } => infer::run(&pipeline, config.as_deref(), catalog.as_deref(), all)?,
        Commands::Defaults => defaults::run()?,
    };

    println!("{output}");
    Ok(())
}

pub(crate) fn load_config(path: Option<&Path>) -> wings_core::Result<WingsConfig> {
    match path {
        Some(path) => WingsConfig::from_path(path),
        None => Ok(WingsConfig::default()),
    }
}
