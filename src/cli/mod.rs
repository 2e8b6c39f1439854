//! Command-line interface wiring for spam-classifier.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod evaluate;
pub mod predict;
pub mod serve;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Spam/ham message classifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Train(args) => train::run(args, settings).await,
            Commands::Evaluate(args) => evaluate::run(args, settings).await,
            Commands::Predict(args) => predict::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit, evaluate and publish a model from a labelled CSV.
    Train(train::Args),
    /// Score a published model version against a labelled CSV.
    Evaluate(evaluate::Args),
    /// Classify a few messages with the current model.
    Predict(predict::Args),
    /// Serve the HTML form and JSON API.
    Serve(serve::Args),
}
