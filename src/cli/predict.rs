//! CLI entry-point for classifying ad-hoc messages with the current model.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, inference::InferenceService};

const SAMPLE_MESSAGES: &[&str] = &[
    "Win a free prize now!!!",
    "Hey, are we still meeting tomorrow?",
];

/// Args for the `predict` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Messages to classify; two samples are used when omitted.
    pub texts: Vec<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let service = InferenceService::load(&settings.model_dir)
        .with_context(|| format!("loading model from {}", settings.model_dir.display()))?;

    let texts = if args.texts.is_empty() {
        SAMPLE_MESSAGES.iter().map(|s| s.to_string()).collect()
    } else {
        args.texts
    };
    for text in &texts {
        let prediction = service.predict_proba(text);
        println!("Text: {text}");
        println!("Predicted label: {}", prediction.label);
        println!(
            "Probabilities (ham, spam): ({:.4}, {:.4})",
            1.0 - prediction.probability,
            prediction.probability
        );
        println!("---");
    }
    Ok(())
}
