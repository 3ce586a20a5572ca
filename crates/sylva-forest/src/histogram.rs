//! Class-count histogram, the per-node statistics aggregator.

/// Per-class sample counts accumulated at a tree node.
///
/// Stored in every leaf; entropy over the counts drives split scoring.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassHistogram {
    counts: Vec<u64>,
}

impl ClassHistogram {
    /// Create an empty histogram over `n_classes` classes.
    #[must_use]
    pub fn new(n_classes: usize) -> Self {
        Self {
            counts: vec![0; n_classes],
        }
    }

    /// Record one example with the given class label.
    ///
    /// # Panics
    ///
    /// Panics when `label` is not below the class count.
    pub fn record(&mut self, label: usize) {
        self.counts[label] += 1;
    }

    /// Fold another histogram's counts into this one.
    ///
    /// # Panics
    ///
    /// Panics when the class counts differ.
    pub fn merge(&mut self, other: &ClassHistogram) {
        assert_eq!(self.counts.len(), other.counts.len());
        for (c, o) in self.counts.iter_mut().zip(&other.counts) {
            *c += o;
        }
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    /// Return the count recorded for one class.
    #[must_use]
    pub fn count(&self, label: usize) -> u64 {
        self.counts[label]
    }

    /// Return the total number of recorded examples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Return `true` when at most one class has recorded examples.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.counts.iter().filter(|&&c| c > 0).count() <= 1
    }

    /// Shannon entropy of the class distribution, in nats.
    ///
    /// An empty histogram has entropy 0.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let n = total as f64;
        -self
            .counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / n;
                p * p.ln()
            })
            .sum::<f64>()
    }

    /// Normalized class probability distribution.
    ///
    /// All zeros for an empty histogram.
    #[must_use]
    pub fn distribution(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let n = total as f64;
        self.counts.iter().map(|&c| c as f64 / n).collect()
    }
}
