// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses the command line with clap and hands off to Layer 2.
//
//   1. `prepare` - build the pair files the model trains on
//   2. `predict` - vote over generation logs and write glosses

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, PrepareArgs};

use crate::application::predict_use_case::PredictUseCase;
use crate::application::prepare_use_case::PrepareUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "glossing-pipeline",
    version = "0.1.0",
    about = "Prepare interlinear glossing datasets and assemble ensemble predictions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    tracing::info!("Preparing datasets for '{}' from {}", args.language, args.data_dir);

    let folders = PrepareUseCase::new(args.into()).execute()?;
    for folder in &folders {
        println!("Wrote {}", folder.display());
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    tracing::info!(
        "Predicting '{}' {} with {} window model(s)",
        args.language,
        args.split,
        args.window_logs.len()
    );

    let output  = args.output.clone();
    let glosses = PredictUseCase::new(args.into()).execute()?;
    println!("Glossed {} sentences into {}", glosses.len(), output);
    Ok(())
}
