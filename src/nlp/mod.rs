//! Text processing and model layer.

pub mod classifier;
pub mod features;
pub mod normalize;
pub mod pipeline;

pub use classifier::{Classifier, ClassifierKind, FittedClassifier};
pub use features::{SparseVector, TfidfParams, TfidfVectorizer};
pub use pipeline::{HyperParams, SpamModel, SpamPipeline};
