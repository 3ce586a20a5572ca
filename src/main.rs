use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use sylva_forest::{DataPointCollection, Forest, ForestConfig, Tree, WeakLearner};
use sylva_io::TrainingSetReader;

#[derive(Parser)]
#[command(name = "sylva")]
#[command(about = "Decision forest training for tabular classification data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Train a forest and write the binary model artifact
    Train {
        /// Path to the training CSV (label column first, then features)
        #[arg(long)]
        data: PathBuf,

        /// Output path for the serialized forest
        #[arg(long)]
        output: PathBuf,

        /// Number of trees in the forest
        #[arg(long, default_value_t = 100)]
        n_trees: usize,

        /// Weak learner family: "axis-aligned" or "hyperplane"
        #[arg(long, default_value = "axis-aligned")]
        weak_learner: String,

        /// Normalize hyperplane responses by per-feature statistics
        #[arg(long, default_value_t = false)]
        feature_scaling: bool,

        /// Maximum number of decision levels per tree
        #[arg(long, default_value_t = 5)]
        max_decision_levels: usize,

        /// Number of candidate feature responses evaluated per node
        #[arg(long, default_value_t = 10)]
        candidate_features: usize,

        /// Number of candidate thresholds evaluated per response
        #[arg(long, default_value_t = 10)]
        candidate_thresholds: usize,

        /// Worker threads for tree training (1 = sequential)
        #[arg(long, default_value_t = 1)]
        max_threads: usize,
    },

    /// Print a summary of a saved forest artifact
    Inspect {
        /// Path to the forest binary
        #[arg(long)]
        model: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    n_trees: usize,
    dimensions: usize,
    n_classes: usize,
    n_samples: usize,
    threads_used: usize,
    advisories: Vec<String>,
    model_path: String,
}

#[derive(Serialize)]
struct InspectOutput {
    n_trees: usize,
    dimensions: usize,
    n_classes: usize,
    total_nodes: usize,
    max_depth: usize,
}

fn parse_weak_learner(s: &str) -> Result<WeakLearner> {
    match s {
        "axis-aligned" => Ok(WeakLearner::AxisAligned),
        "hyperplane" => Ok(WeakLearner::RandomHyperplane),
        other => anyhow::bail!("unknown weak learner: {other} (expected axis-aligned or hyperplane)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Train {
            data,
            output,
            n_trees,
            weak_learner,
            feature_scaling,
            max_decision_levels,
            candidate_features,
            candidate_thresholds,
            max_threads,
        } => {
            let learner = parse_weak_learner(&weak_learner)?;

            // Read dataset
            let training_set = TrainingSetReader::new(&data)
                .read()
                .context("failed to read training CSV")?;
            let (samples, labels) = training_set.into_parts();
            let dataset = DataPointCollection::from_rows(&samples, labels)
                .context("failed to build training dataset")?;
            info!(
                n_samples = dataset.count(),
                dimensions = dataset.dimensions(),
                n_classes = dataset.count_classes(),
                "dataset loaded"
            );

            // Train
            let config = ForestConfig::new(n_trees)?
                .with_weak_learner(learner)
                .with_feature_scaling(feature_scaling)
                .with_max_decision_levels(max_decision_levels)
                .with_candidate_features(candidate_features)
                .with_candidate_thresholds(candidate_thresholds)
                .with_max_threads(max_threads)
                .with_seed(cli.seed);

            let result = config.fit(&dataset).context("forest training failed")?;

            // Save artifact
            result
                .forest()
                .save(&output)
                .context("failed to save forest")?;
            info!(path = %output.display(), "forest saved");

            // Print stdout summary
            let metadata = result.metadata();
            let summary = TrainOutput {
                n_trees: metadata.n_trees,
                dimensions: metadata.dimensions,
                n_classes: metadata.n_classes,
                n_samples: metadata.n_samples,
                threads_used: metadata.threads_used,
                advisories: result.advisories().iter().map(ToString::to_string).collect(),
                model_path: output.display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Inspect { model } => {
            let forest = Forest::load(&model).context("failed to load forest")?;

            let summary = InspectOutput {
                n_trees: forest.n_trees(),
                dimensions: forest.dimensions(),
                n_classes: forest.n_classes(),
                total_nodes: forest.trees().iter().map(Tree::n_nodes).sum(),
                max_depth: forest.trees().iter().map(Tree::depth).max().unwrap_or(0),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
