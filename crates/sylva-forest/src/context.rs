//! The problem definition handed to every tree-training call.

use crate::error::ForestError;
use crate::response::ResponseGenerator;

/// Binds the class count and the response generator for one training run.
///
/// Immutable, shared by reference with every tree training; the generator
/// borrow ties the context's lifetime to the generator's.
#[derive(Debug, Clone, Copy)]
pub struct TrainingContext<'a> {
    n_classes: usize,
    generator: &'a ResponseGenerator,
}

impl<'a> TrainingContext<'a> {
    /// Create a context for `n_classes` classes.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::InvalidClassCount`] when `n_classes` is zero.
    pub fn new(n_classes: usize, generator: &'a ResponseGenerator) -> Result<Self, ForestError> {
        if n_classes == 0 {
            return Err(ForestError::InvalidClassCount { n_classes });
        }
        Ok(Self {
            n_classes,
            generator,
        })
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the response generator.
    #[must_use]
    pub fn generator(&self) -> &ResponseGenerator {
        self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::TrainingContext;
    use crate::error::ForestError;
    use crate::response::{ResponseGenerator, ResponseKind};

    #[test]
    fn zero_classes_rejected() {
        let generator = ResponseGenerator::new(ResponseKind::AxisAligned, 2, vec![]).unwrap();
        let err = TrainingContext::new(0, &generator).unwrap_err();
        assert!(matches!(err, ForestError::InvalidClassCount { n_classes: 0 }));
    }

    #[test]
    fn accessors() {
        let generator = ResponseGenerator::new(ResponseKind::AxisAligned, 2, vec![]).unwrap();
        let context = TrainingContext::new(3, &generator).unwrap();
        assert_eq!(context.n_classes(), 3);
        assert_eq!(context.generator().dimensions(), 2);
    }
}
