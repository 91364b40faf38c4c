use std::collections::VecDeque;

use hashbrown::HashSet;
use itertools::Itertools;

use crate::{bar::Bar, plate::Inventory, weight::Weight};

/// How far past the current weight [`step_weight`] looks.
const STEP_SEARCH_SPAN: Weight = Weight::whole(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Every total weight the inventory can put on `bar` without exceeding
/// `bound`, ascending. Always contains the bar itself.
#[must_use]
pub fn reachable_weights(bar: &Bar, bound: Weight, inventory: &Inventory) -> Vec<Weight> {
    let plates = inventory.available();
    let step = bar.loading().side_multiplier();

    let mut seen: HashSet<Weight> = [bar.weight()].into_iter().collect();
    let mut frontier = VecDeque::from([bar.weight()]);

    while let Some(current) = frontier.pop_front() {
        for plate in &plates {
            let next = current + *plate * step;
            if next <= bound && seen.insert(next) {
                frontier.push_back(next);
            }
        }
    }

    seen.into_iter().sorted().collect()
}

/// The reachable weight nearest to `target`; the lighter one on a tie.
#[must_use]
pub fn closest(target: Weight, reachable: &[Weight]) -> Option<Weight> {
    reachable
        .iter()
        .copied()
        .min_by_key(|weight| weight.abs_diff(target))
}

/// The next reachable weight above or below `current`, clamped to the
/// lightest and heaviest weights in range.
#[must_use]
pub fn step_weight(
    current: Weight,
    direction: Direction,
    bar: &Bar,
    inventory: &Inventory,
) -> Weight {
    let bound = current.max(bar.weight()) + STEP_SEARCH_SPAN;
    let reachable = reachable_weights(bar, bound, inventory);

    let next = match direction {
        Direction::Up => reachable
            .iter()
            .find(|w| **w > current)
            .or_else(|| reachable.last()),
        Direction::Down => reachable
            .iter()
            .rev()
            .find(|w| **w < current)
            .or_else(|| reachable.first()),
    };

    next.copied().unwrap_or(bar.weight())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::Plate;

    fn inventory(weights: &[u32]) -> Inventory {
        Inventory::new(weights.iter().map(|w| Plate::new(Weight::whole(*w), true)))
    }

    #[test]
    fn test_empty_inventory_yields_bar() {
        let bar = Bar::barbell(Weight::whole(45));
        assert_eq!(
            reachable_weights(&bar, Weight::whole(300), &Inventory::default()),
            vec![Weight::whole(45)]
        );
    }

    #[test]
    fn test_reachable_respects_bound_and_contains_bar() {
        let bar = Bar::barbell(Weight::whole(45));
        let reachable = reachable_weights(&bar, Weight::whole(100), &inventory(&[25, 10]));
        let expected = [45, 65, 85, 95]
            .into_iter()
            .map(Weight::whole)
            .collect::<Vec<_>>();
        assert_eq!(reachable, expected);
        assert!(reachable.iter().all(|w| *w <= Weight::whole(100)));
    }

    #[test]
    fn test_single_sided_steps_by_plate() {
        let bar = Bar::single_stack(Weight::whole(150));
        let reachable = reachable_weights(&bar, Weight::whole(170), &inventory(&[10, 5]));
        let expected = [150, 155, 160, 165, 170]
            .into_iter()
            .map(Weight::whole)
            .collect::<Vec<_>>();
        assert_eq!(reachable, expected);
    }

    #[test]
    fn test_unavailable_plates_ignored() {
        let bar = Bar::barbell(Weight::whole(45));
        let inventory = Inventory::new([
            Plate::new(Weight::whole(45), false),
            Plate::new(Weight::whole(25), true),
        ]);
        assert_eq!(
            reachable_weights(&bar, Weight::whole(135), &inventory),
            vec![Weight::whole(45), Weight::whole(95)]
        );
    }

    #[test]
    fn test_closest_prefers_lighter_on_tie() {
        let reachable = [Weight::whole(45), Weight::whole(65), Weight::whole(85)];
        assert_eq!(closest(Weight::whole(75), &reachable), Some(Weight::whole(65)));
        assert_eq!(closest(Weight::whole(80), &reachable), Some(Weight::whole(85)));
        assert_eq!(closest(Weight::whole(10), &[]), None);
    }

    #[test]
    fn test_step_weight() {
        let bar = Bar::barbell(Weight::whole(45));
        let plates = inventory(&[45, 5]);
        assert_eq!(
            step_weight(Weight::whole(135), Direction::Up, &bar, &plates),
            Weight::whole(145)
        );
        assert_eq!(
            step_weight(Weight::whole(135), Direction::Down, &bar, &plates),
            Weight::whole(125)
        );
        assert_eq!(
            step_weight(Weight::whole(45), Direction::Down, &bar, &plates),
            Weight::whole(45)
        );
    }
}
