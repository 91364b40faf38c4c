use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;

use crate::weight::Weight;

/// Plates on one side of the bar, as counts per plate weight.
///
/// Loadouts are values: every operation returns a new one, so candidate
/// lists can be shared and compared freely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loadout {
    counts: BTreeMap<Weight, u32>,
}

/// Plates put on and taken off between two loadouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    pub added: u32,
    pub removed: u32,
}

impl Changes {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.added + self.removed
    }
}

impl Loadout {
    #[must_use]
    pub fn empty() -> Self {
        Loadout::default()
    }

    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (Weight, u32)>) -> Self {
        counts
            .into_iter()
            .fold(Loadout::empty(), |loadout, (plate, count)| {
                loadout.with_plates(plate, count)
            })
    }

    #[must_use]
    pub fn with_plates(&self, plate: Weight, count: u32) -> Self {
        if count == 0 {
            return self.clone();
        }
        let mut counts = self.counts.clone();
        *counts.entry(plate).or_insert(0) += count;
        Loadout { counts }
    }

    #[must_use]
    pub fn combined(&self, other: &Loadout) -> Self {
        other
            .counts
            .iter()
            .fold(self.clone(), |loadout, (plate, count)| {
                loadout.with_plates(*plate, *count)
            })
    }

    #[must_use]
    pub fn count(&self, plate: Weight) -> u32 {
        self.counts.get(&plate).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn per_side_weight(&self) -> Weight {
        self.counts
            .iter()
            .map(|(plate, count)| *plate * *count)
            .sum()
    }

    #[must_use]
    pub fn plate_count(&self) -> u32 {
        self.counts.values().sum()
    }

    /// `(plate, count)` pairs, heaviest plate first.
    #[must_use]
    pub fn entries(&self) -> Vec<(Weight, u32)> {
        self.counts
            .iter()
            .rev()
            .map(|(plate, count)| (*plate, *count))
            .collect()
    }

    #[must_use]
    pub fn changes_to(&self, next: &Loadout) -> Changes {
        self.counts
            .keys()
            .chain(next.counts.keys())
            .unique()
            .fold(Changes::default(), |changes, plate| {
                let (from, to) = (self.count(*plate), next.count(*plate));
                Changes {
                    added: changes.added + to.saturating_sub(from),
                    removed: changes.removed + from.saturating_sub(to),
                }
            })
    }

    /// Plates of `other` that are already on this loadout.
    #[must_use]
    pub fn shared_with(&self, other: &Loadout) -> u32 {
        other
            .counts
            .iter()
            .map(|(plate, count)| self.count(*plate).min(*count))
            .sum()
    }
}

impl Display for Loadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        let plates = self
            .entries()
            .into_iter()
            .map(|(plate, count)| match count {
                1 => plate.to_string(),
                _ => format!("{plate}x{count}"),
            })
            .join(" + ");
        write!(f, "{plates}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loadout(plates: &[(u32, u32)]) -> Loadout {
        Loadout::from_counts(plates.iter().map(|(w, c)| (Weight::whole(*w), *c)))
    }

    #[test]
    fn test_order_does_not_matter() {
        assert_eq!(loadout(&[(10, 1), (25, 1), (10, 1)]), loadout(&[(25, 1), (10, 2)]));
        assert_eq!(loadout(&[(25, 0)]), Loadout::empty());
    }

    #[test]
    fn test_with_plates_leaves_original_untouched() {
        let base = loadout(&[(45, 1)]);
        let extended = base.with_plates(Weight::whole(10), 2);
        assert_eq!(base.plate_count(), 1);
        assert_eq!(extended.plate_count(), 3);
        assert_eq!(extended.per_side_weight(), Weight::whole(65));
    }

    #[test]
    fn test_changes_to() {
        let from = loadout(&[(25, 1), (10, 1)]);
        let to = loadout(&[(45, 1), (10, 1)]);
        assert_eq!(from.changes_to(&to), Changes { added: 1, removed: 1 });
        assert_eq!(to.changes_to(&to).total(), 0);
        assert_eq!(Loadout::empty().changes_to(&to), Changes { added: 2, removed: 0 });
    }

    #[test]
    fn test_shared_with() {
        let candidate = loadout(&[(45, 1), (10, 2)]);
        let future = loadout(&[(45, 1), (25, 1), (10, 1)]);
        assert_eq!(candidate.shared_with(&future), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(loadout(&[(45, 1), (2, 2)]).to_string(), "45 + 2x2");
        assert_eq!(Loadout::empty().to_string(), "empty");
    }
}
