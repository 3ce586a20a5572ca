//! Decision forest training for classification: weak-learner strategies,
//! parallel ensemble orchestration, and binary model persistence.
//!
//! Provides axis-aligned and random-hyperplane weak learners (with
//! optional per-feature normalization), entropy-driven per-tree training,
//! sequential or rayon-parallel ensemble training with exclusive
//! aggregation, and a versioned bincode artifact format.

mod config;
mod context;
mod dataset;
mod error;
mod forest;
mod histogram;
mod response;
mod serialize;
mod stats;
mod trainer;
mod tree;

pub use config::ForestConfig;
pub use context::TrainingContext;
pub use dataset::DataPointCollection;
pub use error::ForestError;
pub use forest::{Advisory, Forest, ForestResult, TrainingMetadata};
pub use histogram::ClassHistogram;
pub use response::{FeatureIndex, FeatureResponse, ResponseGenerator, ResponseKind, WeakLearner};
pub use stats::FeatureStats;
pub use trainer::{DepthFirstTrainer, TrainingParameters, TreeTrainer};
pub use tree::{Node, NodeIndex, Tree};
