use std::fmt::Display;

use serde::Serialize;

use crate::{plating::Plating, weight::Weight};

/// One set of the warm-up ladder.
///
/// `weight` is what the lifter sees; `ideal_weight`, when present, is the
/// weight the ladder asked for before it was snapped to something loadable.
/// `added_weight` is the load on top of bodyweight for weighted bodyweight
/// movements.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupSet {
    pub percentage: u32,
    pub weight: Weight,
    pub reps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_weight: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_weight: Option<Weight>,
    pub is_backoff: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plating: Option<Plating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_changes: Option<u32>,
}

impl WarmupSet {
    #[must_use]
    pub fn new(percentage: u32, weight: Weight, reps: u32) -> Self {
        WarmupSet {
            percentage,
            weight,
            reps,
            ideal_weight: None,
            added_weight: None,
            is_backoff: false,
            plating: None,
            plate_changes: None,
        }
    }

    #[must_use]
    pub fn with_ideal_weight(self, ideal_weight: Weight) -> Self {
        WarmupSet {
            ideal_weight: Some(ideal_weight),
            ..self
        }
    }

    #[must_use]
    pub fn with_added_weight(self, added_weight: Weight) -> Self {
        WarmupSet {
            added_weight: Some(added_weight),
            ..self
        }
    }

    #[must_use]
    pub fn backoff(self) -> Self {
        WarmupSet {
            is_backoff: true,
            ..self
        }
    }
}

impl Display for WarmupSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}%  {} x {}", self.percentage, self.weight, self.reps)?;
        if let Some(added) = self.added_weight {
            write!(f, " (+{added})")?;
        }
        if self.is_backoff {
            write!(f, " backoff")?;
        }
        if let Some(plating) = &self.plating {
            write!(f, "  {plating}")?;
        }
        if let Some(changes) = self.plate_changes {
            write!(f, "  [{changes} changes]")?;
        }
        Ok(())
    }
}

/// Everything the calculator hands back for one request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmupPlan {
    pub sets: Vec<WarmupSet>,
    pub rounded_target_weight: Weight,
}

impl WarmupPlan {
    #[must_use]
    pub fn new(sets: Vec<WarmupSet>, rounded_target_weight: Weight) -> Self {
        WarmupPlan {
            sets,
            rounded_target_weight,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    #[must_use]
    pub fn sets(&self) -> &[WarmupSet] {
        &self.sets
    }
}

impl IntoIterator for WarmupPlan {
    type Item = WarmupSet;
    type IntoIter = std::vec::IntoIter<WarmupSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.into_iter()
    }
}
