//! Randomly-parameterized feature responses, the splitting primitive used
//! by tree nodes, and the generator that produces them.

use std::fmt;

use rand::Rng;

use crate::dataset::DataPointCollection;
use crate::error::ForestError;
use crate::stats::FeatureStats;

/// Weak-learner family selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakLearner {
    /// Single-feature threshold tests.
    AxisAligned,
    /// Random-direction linear tests over all features.
    RandomHyperplane,
}

/// The concrete response strategy a training run is instantiated against.
///
/// A closed set: the weak-learner family crossed with the feature-scaling
/// flag resolves to exactly one variant, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// One randomly chosen feature per response.
    AxisAligned,
    /// Random direction vector, raw feature magnitudes.
    Hyperplane,
    /// Random direction vector with each component scaled by the inverse
    /// standard deviation of its feature.
    HyperplaneNormalized,
}

impl ResponseKind {
    /// Map the configuration surface onto the closed strategy set.
    #[must_use]
    pub fn resolve(weak_learner: WeakLearner, feature_scaling: bool) -> Self {
        match (weak_learner, feature_scaling) {
            (WeakLearner::AxisAligned, _) => ResponseKind::AxisAligned,
            (WeakLearner::RandomHyperplane, false) => ResponseKind::Hyperplane,
            (WeakLearner::RandomHyperplane, true) => ResponseKind::HyperplaneNormalized,
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseKind::AxisAligned => "axis-aligned",
            ResponseKind::Hyperplane => "hyperplane",
            ResponseKind::HyperplaneNormalized => "hyperplane-normalized",
        };
        write!(f, "{name}")
    }
}

/// Zero-based feature column index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct FeatureIndex(usize);

impl FeatureIndex {
    /// Create a new feature index from a zero-based column position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based feature column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scalar-valued function of one example, drawn at random per split
/// candidate.
///
/// Embedded in every split node, so serialized artifacts are
/// self-describing regardless of the strategy they were trained with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FeatureResponse {
    /// The value of a single feature.
    AxisAligned {
        /// Feature whose raw value is the response.
        axis: FeatureIndex,
    },
    /// A linear projection of all features onto a direction vector.
    /// Normalization, when enabled, is baked into the weights.
    Hyperplane {
        /// One weight per feature dimension.
        weights: Vec<f64>,
    },
}

impl FeatureResponse {
    /// Evaluate the response for one example of the dataset.
    ///
    /// # Panics
    ///
    /// Panics when `example` is out of range or the response was generated
    /// for a different dimension count.
    #[must_use]
    pub fn evaluate(&self, data: &DataPointCollection, example: usize) -> f64 {
        match self {
            FeatureResponse::AxisAligned { axis } => data.value(axis.index(), example),
            FeatureResponse::Hyperplane { weights } => weights
                .iter()
                .enumerate()
                .map(|(d, w)| w * data.value(d, example))
                .sum(),
        }
    }
}

/// Produces randomly-parameterized feature responses for one fixed
/// [`ResponseKind`].
///
/// Immutable after construction; shared by reference across all tree
/// trainings of a run. The only side effect of
/// [`create_random`](Self::create_random) is consuming entropy from the
/// supplied random source.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    kind: ResponseKind,
    dimensions: usize,
    stats: Vec<FeatureStats>,
}

impl ResponseGenerator {
    /// Build a generator for `dimensions` features.
    ///
    /// `stats` must hold one entry per dimension when `kind` is
    /// [`ResponseKind::HyperplaneNormalized`]; the other kinds ignore it.
    ///
    /// # Errors
    ///
    /// | Variant                                  | When                                          |
    /// |------------------------------------------|-----------------------------------------------|
    /// | [`ForestError::InvalidDimensionCount`]   | `dimensions` is zero                          |
    /// | [`ForestError::MissingFeatureStats`]     | normalized kind without per-dimension stats   |
    pub fn new(
        kind: ResponseKind,
        dimensions: usize,
        stats: Vec<FeatureStats>,
    ) -> Result<Self, ForestError> {
        if dimensions == 0 {
            return Err(ForestError::InvalidDimensionCount { dimensions });
        }
        if kind == ResponseKind::HyperplaneNormalized && stats.len() != dimensions {
            return Err(ForestError::MissingFeatureStats {
                expected: dimensions,
                got: stats.len(),
            });
        }
        Ok(Self {
            kind,
            dimensions,
            stats,
        })
    }

    /// Return the active response strategy.
    #[must_use]
    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Return the number of feature dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the per-dimension statistics, empty unless scaling was computed.
    #[must_use]
    pub fn stats(&self) -> &[FeatureStats] {
        &self.stats
    }

    /// Draw one new feature response.
    pub fn create_random(&self, rng: &mut impl Rng) -> FeatureResponse {
        match self.kind {
            ResponseKind::AxisAligned => FeatureResponse::AxisAligned {
                axis: FeatureIndex::new(rng.gen_range(0..self.dimensions)),
            },
            ResponseKind::Hyperplane => FeatureResponse::Hyperplane {
                weights: (0..self.dimensions)
                    .map(|_| rng.gen_range(-1.0..=1.0))
                    .collect(),
            },
            ResponseKind::HyperplaneNormalized => FeatureResponse::Hyperplane {
                weights: self
                    .stats
                    .iter()
                    .map(|s| {
                        let w: f64 = rng.gen_range(-1.0..=1.0);
                        // A constant feature carries no signal.
                        if s.stdev > 0.0 { w / s.stdev } else { 0.0 }
                    })
                    .collect(),
            },
        }
    }
}
