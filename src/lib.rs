//! Spam/ham text classification: normalisation, TF-IDF features, linear and
//! naive Bayes classifiers, offline training and an HTTP prediction service.

pub mod api;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod inference;
pub mod label;
pub mod logging;
pub mod nlp;
pub mod training;
pub mod ui;

pub use error::{Result, SpamError};
pub use inference::{InferenceService, ModelSlot, Prediction};
pub use label::Label;
pub use nlp::normalize::normalize;
