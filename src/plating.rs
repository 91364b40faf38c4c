use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use crate::{bar::Bar, loadout::Loadout, weight::Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlateEntry {
    pub weight: Weight,
    pub count: u32,
}

/// A concrete way to load one set, as reported to the caller.
///
/// `actual_weight` is always `bar + entries * side multiplier`. `remaining`
/// is the per-side shortfall against the requested weight.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plating {
    pub entries: Vec<PlateEntry>,
    pub remaining: Weight,
    pub actual_weight: Weight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_target_weight: Option<Weight>,
    #[serde(skip)]
    bar: Bar,
}

impl Plating {
    #[must_use]
    pub fn new(loadout: &Loadout, bar: Bar, target_per_side: Weight) -> Self {
        let loaded = loadout.per_side_weight();
        Plating {
            entries: loadout
                .entries()
                .into_iter()
                .map(|(weight, count)| PlateEntry { weight, count })
                .collect(),
            remaining: target_per_side.saturating_sub(loaded),
            actual_weight: bar.total(loaded),
            adjusted_target_weight: None,
            bar,
        }
    }

    /// No plates at all; the whole weight sits in the implement itself.
    #[must_use]
    pub fn unloaded(bar: Bar) -> Self {
        Plating::new(&Loadout::empty(), bar, Weight::ZERO)
    }

    /// Settles for what the plates achieve: a shortfall becomes an adjusted
    /// target instead.
    #[must_use]
    pub fn accept_nearest(self) -> Self {
        if self.remaining.is_zero() {
            return self;
        }
        Plating {
            remaining: Weight::ZERO,
            adjusted_target_weight: Some(self.actual_weight),
            ..self
        }
    }

    #[must_use]
    pub fn loadout(&self) -> Loadout {
        Loadout::from_counts(self.entries.iter().map(|e| (e.weight, e.count)))
    }

    #[must_use]
    pub fn bar(&self) -> Bar {
        self.bar
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.remaining.is_zero()
    }
}

impl Display for Plating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plates = self
            .entries
            .iter()
            .map(|e| format!("{}x{}", e.weight, e.count))
            .join(", ");
        write!(f, "[{plates}] = {}", self.actual_weight)?;
        if !self.remaining.is_zero() {
            write!(f, " (short {} per side)", self.remaining)?;
        }
        Ok(())
    }
}
