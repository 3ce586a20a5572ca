//! Training-set loading and validation for the sylva pipeline.

mod error;
mod reader;

pub use error::IoError;
pub use reader::{TrainingSet, TrainingSetReader};
