use std::fmt::Display;

use crate::{loading::Loading, weight::Weight};

/// The fixed part of a loaded implement: a barbell, or the lifter's own
/// bodyweight (or nothing) under a single stack of plates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bar {
    weight: Weight,
    loading: Loading,
}

impl Bar {
    #[must_use]
    pub fn new(weight: Weight, loading: Loading) -> Self {
        Bar { weight, loading }
    }

    #[must_use]
    pub fn barbell(weight: Weight) -> Self {
        Bar::new(weight, Loading::Barbell)
    }

    #[must_use]
    pub fn single_stack(weight: Weight) -> Self {
        Bar::new(weight, Loading::SingleStack)
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn loading(&self) -> Loading {
        self.loading
    }

    /// Plate load on one side for `total`; zero at or below the bar.
    #[must_use]
    pub fn per_side(&self, total: Weight) -> Weight {
        total
            .saturating_sub(self.weight)
            .divide(self.loading.side_multiplier())
    }

    #[must_use]
    pub fn total(&self, per_side: Weight) -> Weight {
        self.weight + per_side * self.loading.side_multiplier()
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.loading, self.weight)
    }
}
