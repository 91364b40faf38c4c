use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::weight::Weight;

/// Plate weights offered by the standard inventory, heaviest first.
pub const STANDARD_WEIGHTS: [Weight; 12] = [
    Weight::whole(55),
    Weight::whole(45),
    Weight::whole(35),
    Weight::whole(25),
    Weight::whole(15),
    Weight::whole(10),
    Weight::whole(5),
    Weight::from_milli(2500),
    Weight::whole(1),
    Weight::from_milli(750),
    Weight::from_milli(500),
    Weight::from_milli(250),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plate {
    pub weight: Weight,
    pub available: bool,
}

impl Plate {
    #[must_use]
    pub fn new(weight: Weight, available: bool) -> Self {
        Plate { weight, available }
    }

    #[must_use]
    pub fn from_weights(weights: &[Weight], available: bool) -> Vec<Plate> {
        weights.iter().map(|w| Plate::new(*w, available)).collect()
    }
}

/// The plates a lifter owns, keyed by weight. Only available plates take
/// part in any computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    plates: BTreeMap<Weight, bool>,
}

impl Inventory {
    /// Later entries for the same weight win; zero-weight plates are dropped.
    #[must_use]
    pub fn new(plates: impl IntoIterator<Item = Plate>) -> Self {
        Inventory {
            plates: plates
                .into_iter()
                .filter(|plate| !plate.weight.is_zero())
                .map(|plate| (plate.weight, plate.available))
                .collect(),
        }
    }

    /// Every standard weight except 55 is available.
    #[must_use]
    pub fn standard() -> Self {
        Inventory::new(
            STANDARD_WEIGHTS
                .iter()
                .map(|w| Plate::new(*w, *w != Weight::whole(55))),
        )
    }

    #[must_use]
    pub fn plates(&self) -> Vec<Plate> {
        self.plates
            .iter()
            .rev()
            .map(|(weight, available)| Plate::new(*weight, *available))
            .collect()
    }

    /// Available plate weights, heaviest first.
    #[must_use]
    pub fn available(&self) -> Vec<Weight> {
        self.plates
            .iter()
            .rev()
            .filter(|(_, available)| **available)
            .map(|(weight, _)| *weight)
            .collect()
    }

    /// A copy keeping only plates of at least `min` as available.
    #[must_use]
    pub fn at_least(&self, min: Weight) -> Inventory {
        Inventory {
            plates: self
                .plates
                .iter()
                .map(|(weight, available)| (*weight, *available && *weight >= min))
                .collect(),
        }
    }

    #[must_use]
    pub fn heaviest(&self) -> Option<Weight> {
        self.available().first().copied()
    }

    #[must_use]
    pub fn lightest(&self) -> Option<Weight> {
        self.available().last().copied()
    }

    /// `weight` snapped to a multiple of the lightest available plate; as is
    /// when nothing is available.
    #[must_use]
    pub fn round_to_lightest(&self, weight: Weight) -> Weight {
        self.lightest().map_or(weight, |plate| weight.round_to(plate))
    }

    pub fn set_available(&mut self, weight: Weight, available: bool) {
        if !weight.is_zero() {
            self.plates.insert(weight, available);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_inventory_disables_55() {
        let inventory = Inventory::standard();
        let available = inventory.available();
        assert_eq!(available.len(), 11);
        assert_eq!(available[0], Weight::whole(45));
        assert_eq!(available[10], Weight::from_milli(250));
        assert_eq!(inventory.plates().len(), 12);
    }

    #[test]
    fn test_later_entries_override() {
        let inventory = Inventory::new([
            Plate::new(Weight::whole(10), true),
            Plate::new(Weight::whole(10), false),
            Plate::new(Weight::ZERO, true),
        ]);
        assert!(inventory.available().is_empty());
        assert_eq!(inventory.plates().len(), 1);
    }

    #[test]
    fn test_round_to_lightest() {
        let inventory = Inventory::standard();
        assert_eq!(inventory.lightest(), Some(Weight::from_milli(250)));
        assert_eq!(
            inventory.round_to_lightest(Weight::from_milli(261_100)),
            Weight::whole(261)
        );
        assert_eq!(
            inventory.at_least(Weight::FIVE).round_to_lightest(Weight::whole(263)),
            Weight::whole(265)
        );
        assert_eq!(Inventory::default().round_to_lightest(Weight::whole(7)), Weight::whole(7));
    }

    #[test]
    fn test_at_least_filters_small_plates() {
        let inventory = Inventory::standard().at_least(Weight::FIVE);
        assert_eq!(
            inventory.available(),
            vec![
                Weight::whole(45),
                Weight::whole(35),
                Weight::whole(25),
                Weight::whole(15),
                Weight::whole(10),
                Weight::whole(5),
            ]
        );
    }
}
