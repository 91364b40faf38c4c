use hashbrown::HashSet;

use crate::{loadout::Loadout, weight::Weight};

/// Bounds for the exhaustive plating search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Most plates on one side.
    pub max_depth: usize,
    /// Most platings returned.
    pub max_candidates: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_candidates: 15,
        }
    }
}

/// Largest plates first, as many of each as fit. Returns the loadout and
/// the per-side weight it could not cover.
///
/// `plates` must be sorted heaviest first.
#[must_use]
pub fn greedy(per_side: Weight, plates: &[Weight]) -> (Loadout, Weight) {
    plates
        .iter()
        .fold((Loadout::empty(), per_side), |(loadout, remaining), plate| {
            let count = remaining.fits(*plate);
            (
                loadout.with_plates(*plate, count),
                remaining.saturating_sub(*plate * count),
            )
        })
}

/// Distinct loadouts that hit `per_side` exactly. The greedy loadout comes
/// first when it is exact. May be empty when no combination of `plates`
/// adds up; callers then fall back to [`greedy`].
///
/// `plates` must be sorted heaviest first.
#[must_use]
pub fn all_platings(per_side: Weight, plates: &[Weight], limits: SearchLimits) -> Vec<Loadout> {
    if per_side.is_zero() {
        return vec![Loadout::empty()];
    }

    let mut found = Vec::new();
    let mut seen = HashSet::new();

    let (canonical, remainder) = greedy(per_side, plates);
    if remainder.is_zero() && limits.max_candidates > 0 {
        seen.insert(canonical.clone());
        found.push(canonical);
    }

    let mut search = Search {
        plates,
        limits,
        found,
        seen,
    };
    search.descend(per_side, 0, &Loadout::empty());
    search.found
}

struct Search<'a> {
    plates: &'a [Weight],
    limits: SearchLimits,
    found: Vec<Loadout>,
    seen: HashSet<Loadout>,
}

impl Search<'_> {
    fn is_full(&self) -> bool {
        self.found.len() >= self.limits.max_candidates
    }

    /// Plates are tried heaviest first from `start` onward, so every
    /// composition is visited in non-increasing plate order exactly once.
    fn descend(&mut self, remaining: Weight, start: usize, current: &Loadout) {
        if self.is_full() {
            return;
        }
        if remaining.is_zero() {
            if self.seen.insert(current.clone()) {
                self.found.push(current.clone());
            }
            return;
        }

        let depth = current.plate_count() as usize;
        let slots = self.limits.max_depth.saturating_sub(depth);
        if slots == 0 {
            return;
        }

        for (index, plate) in self.plates.iter().enumerate().skip(start) {
            if *plate * u32::try_from(slots).unwrap_or(u32::MAX) < remaining {
                // Lighter plates cannot close the gap either.
                break;
            }
            if *plate > remaining {
                continue;
            }
            self.descend(
                remaining.saturating_sub(*plate),
                index,
                &current.with_plates(*plate, 1),
            );
            if self.is_full() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plates(weights: &[f64]) -> Vec<Weight> {
        weights.iter().map(|w| Weight::from_f64(*w)).collect()
    }

    #[test]
    fn test_greedy_takes_largest_first() {
        let (loadout, remainder) = greedy(Weight::whole(70), &plates(&[45.0, 25.0, 10.0, 5.0]));
        assert_eq!(
            loadout,
            Loadout::from_counts([(Weight::whole(45), 1), (Weight::whole(25), 1)])
        );
        assert_eq!(remainder, Weight::ZERO);
    }

    #[test]
    fn test_greedy_reports_remainder() {
        let (loadout, remainder) = greedy(Weight::whole(47), &plates(&[45.0, 5.0]));
        assert_eq!(loadout, Loadout::from_counts([(Weight::whole(45), 1)]));
        assert_eq!(remainder, Weight::whole(2));
    }

    #[test]
    fn test_zero_per_side() {
        let available = plates(&[45.0, 25.0]);
        assert_eq!(greedy(Weight::ZERO, &available), (Loadout::empty(), Weight::ZERO));
        assert_eq!(
            all_platings(Weight::ZERO, &available, SearchLimits::default()),
            vec![Loadout::empty()]
        );
    }

    #[test]
    fn test_all_platings_exact_and_distinct() {
        let available = plates(&[45.0, 25.0, 10.0, 5.0, 2.5]);
        let target = Weight::whole(45);
        let platings = all_platings(target, &available, SearchLimits::default());

        assert_eq!(platings[0], Loadout::from_counts([(Weight::whole(45), 1)]));
        assert!(platings.len() > 1);
        assert!(platings.len() <= 15);
        assert!(platings.iter().all(|p| p.per_side_weight() == target));
        assert!(platings.iter().all(|p| p.plate_count() <= 10));

        let distinct = platings.iter().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), platings.len());
    }

    #[test]
    fn test_all_platings_finds_non_greedy_solution() {
        // Greedy takes 25 and strands 5, but 10 + 10 + 10 fits.
        let available = plates(&[25.0, 10.0]);
        let platings = all_platings(Weight::whole(30), &available, SearchLimits::default());
        assert_eq!(platings, vec![Loadout::from_counts([(Weight::whole(10), 3)])]);
    }

    #[test]
    fn test_all_platings_unreachable_is_empty() {
        let available = plates(&[25.0, 10.0]);
        assert!(all_platings(Weight::whole(7), &available, SearchLimits::default()).is_empty());
    }

    #[test]
    fn test_limits_are_honoured() {
        let available = plates(&[10.0, 5.0, 2.5, 1.0]);
        let limits = SearchLimits {
            max_depth: 4,
            max_candidates: 3,
        };
        let platings = all_platings(Weight::whole(20), &available, limits);
        assert_eq!(platings.len(), 3);
        assert!(platings.iter().all(|p| p.plate_count() <= 4));
    }
}
