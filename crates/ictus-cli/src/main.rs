//! ictus - stroke-risk model operations CLI
//!
//! Usage:
//!   ictus train                          # Train from stroke-data.csv
//!   ictus train --data my.csv --seed 7   # Train with custom input and seed
//!   ictus serve                          # Serve the trained model over HTTP
//!   ictus serve --port 9000              # Serve on a custom port
//!   ictus dashboard                      # Render prediction statistics

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;

use commands::{dashboard, serve, train};

/// ictus - stroke-risk model operations tool
///
/// Train, serve, and monitor the stroke prediction model.
#[derive(Parser)]
#[command(name = "ictus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the stroke model from a labeled CSV
    Train {
        /// Path to the training CSV
        #[arg(long, value_name = "FILE", default_value = "stroke-data.csv")]
        data: PathBuf,

        /// Path the model bundle is written to
        #[arg(long, value_name = "FILE", default_value = "model/stroke_model.bin")]
        model: PathBuf,

        /// Directory for tracking run documents
        #[arg(long, value_name = "DIR", default_value = "runs")]
        runs_dir: PathBuf,

        /// Number of trees in the forest
        #[arg(long, default_value_t = 100)]
        trees: usize,

        /// Random seed for split, oversampling, and fitting
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Serve predictions over HTTP
    Serve {
        /// Path to the trained model bundle
        #[arg(long, value_name = "FILE", default_value = "model/stroke_model.bin")]
        model: PathBuf,

        /// Path to the prediction log CSV
        #[arg(long, value_name = "FILE", default_value = "logs/prediction_logs.csv")]
        log: PathBuf,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },

    /// Render the prediction monitoring dashboard
    Dashboard {
        /// Path to the prediction log CSV
        #[arg(long, value_name = "FILE", default_value = "logs/prediction_logs.csv")]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train {
            data,
            model,
            runs_dir,
            trees,
            seed,
        } => train::run(&data, &model, &runs_dir, trees, seed),

        Commands::Serve {
            model,
            log,
            host,
            port,
        } => {
            let config = serve::ServerConfig { host, port };
            serve::run(&model, &log, &config)
        }

        Commands::Dashboard { log } => dashboard::run(&log),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
