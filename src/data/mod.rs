//! Dataset ingestion and partitioning layer.

pub mod dataset;
pub mod split;

pub use dataset::Dataset;
pub use split::{stratified_k_fold, stratified_split, Split};
