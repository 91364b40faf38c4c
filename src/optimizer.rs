use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::{
    bar::Bar,
    decompose::{SearchLimits, all_platings, greedy},
    loadout::Loadout,
    plate::Inventory,
    plating::Plating,
    weight::Weight,
};

/// Weights of the plate-change cost and the lookahead reward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    /// Cost of putting one plate on.
    pub add_weight: f64,
    /// Cost of taking one plate off.
    pub remove_weight: f64,
    /// Reward for each upcoming set whose plates are already loaded.
    pub lookahead_scale: f64,
    /// How many upcoming sets are inspected.
    pub lookahead_horizon: usize,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            add_weight: 0.8,
            remove_weight: 1.0,
            lookahead_scale: 0.5,
            lookahead_horizon: 2,
        }
    }
}

impl CostModel {
    #[must_use]
    pub fn transition(&self, from: &Loadout, to: &Loadout) -> f64 {
        let changes = from.changes_to(to);
        f64::from(changes.added) * self.add_weight + f64::from(changes.removed) * self.remove_weight
    }

    /// Sum over the next sets of the fraction of their plates `candidate`
    /// already carries, scaled down with distance.
    #[must_use]
    pub fn lookahead_bonus(&self, candidate: &Loadout, upcoming: &[Loadout]) -> f64 {
        upcoming
            .iter()
            .take(self.lookahead_horizon)
            .enumerate()
            .map(|(offset, future)| {
                let needed = future.plate_count();
                if needed == 0 {
                    return 0.0;
                }
                let staged = f64::from(candidate.shared_with(future)) / f64::from(needed);
                staged / (offset + 1) as f64 * self.lookahead_scale
            })
            .sum()
    }

    /// Total transition cost of walking `sequence` in order.
    #[must_use]
    pub fn path_cost(&self, sequence: &[Loadout]) -> f64 {
        sequence
            .windows(2)
            .map(|pair| self.transition(&pair[0], &pair[1]))
            .sum()
    }
}

/// A chosen plating and how many plates moved to get there from the
/// previous set.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPlating {
    pub plating: Plating,
    pub plate_changes: u32,
}

/// Picks one plating per set so the lifter moves as few plates as possible
/// across an ascending ladder.
pub struct PlateChangeOptimizer {
    bar: Bar,
    plates: Vec<Weight>,
    cost_model: CostModel,
    limits: SearchLimits,
}

impl PlateChangeOptimizer {
    #[must_use]
    pub fn new(bar: Bar, inventory: &Inventory) -> Self {
        PlateChangeOptimizer {
            bar,
            plates: inventory.available(),
            cost_model: CostModel::default(),
            limits: SearchLimits::default(),
        }
    }

    #[must_use]
    pub fn with_cost_model(self, cost_model: CostModel) -> Self {
        PlateChangeOptimizer { cost_model, ..self }
    }

    #[must_use]
    pub fn with_limits(self, limits: SearchLimits) -> Self {
        PlateChangeOptimizer { limits, ..self }
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Plans a plating for each of `targets`, which should be ascending.
    /// Shortfalls are reported in each plating's `remaining`.
    #[must_use]
    pub fn optimize(&self, targets: &[Weight]) -> Vec<PlannedPlating> {
        if targets.is_empty() {
            return Vec::new();
        }

        let per_side = self.per_side(targets);
        let candidates = self.candidates(targets);
        let path = self.find_optimal_sequence(&candidates, &self.canonical(targets));

        let chosen = path
            .iter()
            .zip(&candidates)
            .map(|(index, pool)| pool[*index].clone())
            .collect::<Vec<_>>();

        debug!(
            sets = chosen.len(),
            cost = self.cost_model.path_cost(&chosen),
            "optimizer.path"
        );

        chosen
            .iter()
            .enumerate()
            .map(|(i, loadout)| PlannedPlating {
                plating: Plating::new(loadout, self.bar, per_side[i]),
                plate_changes: match i {
                    0 => 0,
                    _ => chosen[i - 1].changes_to(loadout).total(),
                },
            })
            .collect()
    }

    /// The largest-plates-first loadout of every set.
    #[must_use]
    pub fn canonical(&self, targets: &[Weight]) -> Vec<Loadout> {
        self.per_side(targets)
            .into_iter()
            .map(|side| greedy(side, &self.plates).0)
            .collect()
    }

    /// Candidate loadouts per set. The last set only ever gets its
    /// canonical loadout; every pool holds at least one loadout.
    #[must_use]
    pub fn candidates(&self, targets: &[Weight]) -> Vec<Vec<Loadout>> {
        let per_side = self.per_side(targets);
        let last = per_side.len().saturating_sub(1);
        let mut pools: Vec<Vec<Loadout>> = Vec::with_capacity(per_side.len());

        for (i, side) in per_side.iter().enumerate() {
            let (canonical, _) = greedy(*side, &self.plates);
            if i == last {
                pools.push(vec![canonical]);
                continue;
            }

            let exhaustive = all_platings(*side, &self.plates, self.limits);
            let previous = i.checked_sub(1).map(|p| (per_side[p], &pools[p]));

            let extensions = match previous {
                Some((prev_side, prev_pool)) if *side > prev_side => {
                    self.extensions(prev_pool, *side)
                }
                _ => Vec::new(),
            };
            let regressive = previous.is_some_and(|(prev_side, _)| *side <= prev_side);

            let mut seen = HashSet::new();
            let pool = exhaustive
                .iter()
                .take(1)
                .chain(&extensions)
                .chain(exhaustive.iter().skip(1))
                .chain(regressive.then_some(&canonical))
                .filter(|loadout| seen.insert(*loadout))
                .take(self.limits.max_candidates)
                .cloned()
                .collect::<Vec<_>>();

            pools.push(match pool.is_empty() {
                true => vec![canonical.clone()],
                false => pool,
            });
        }

        trace!(pools = ?pools.iter().map(Vec::len).collect::<Vec<_>>(), "optimizer.candidates");
        pools
    }

    fn per_side(&self, targets: &[Weight]) -> Vec<Weight> {
        targets.iter().map(|t| self.bar.per_side(*t)).collect()
    }

    /// Loadouts reached from a previous candidate by only adding plates.
    fn extensions(&self, previous: &[Loadout], side: Weight) -> Vec<Loadout> {
        previous
            .iter()
            .filter(|loadout| loadout.per_side_weight() < side)
            .flat_map(|loadout| {
                let missing = side.saturating_sub(loadout.per_side_weight());
                all_platings(missing, &self.plates, self.limits)
                    .into_iter()
                    .map(|added| loadout.combined(&added))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Dynamic programming over the candidate pools:
    /// `cost[i][j] = min_k(cost[i-1][k] + transition(k, j)) - lookahead(j)`.
    /// Returns the chosen index into each pool.
    fn find_optimal_sequence(&self, candidates: &[Vec<Loadout>], canonical: &[Loadout]) -> Vec<usize> {
        let n = candidates.len();
        if n == 0 {
            return Vec::new();
        }

        // dp[i][j] = (cost, best previous candidate)
        let mut dp: Vec<Vec<(f64, Option<usize>)>> = Vec::with_capacity(n);
        dp.push(vec![(0.0, None); candidates[0].len()]);

        for i in 1..n {
            let row = candidates[i]
                .iter()
                .map(|candidate| {
                    let (best_prev, best_cost) = dp[i - 1].iter().enumerate().fold(
                        (None, f64::INFINITY),
                        |(best_prev, best_cost), (k, (prev_cost, _))| {
                            let total =
                                prev_cost + self.cost_model.transition(&candidates[i - 1][k], candidate);
                            match total < best_cost {
                                true => (Some(k), total),
                                false => (best_prev, best_cost),
                            }
                        },
                    );
                    let bonus = self.cost_model.lookahead_bonus(candidate, &canonical[i + 1..]);
                    (best_cost - bonus, best_prev)
                })
                .collect::<Vec<_>>();
            trace!(set = i, costs = ?row.iter().map(|(cost, _)| *cost).collect::<Vec<_>>(), "optimizer.dp");
            dp.push(row);
        }

        let mut current = dp[n - 1]
            .iter()
            .enumerate()
            .min_by(|(_, (a, _)), (_, (b, _))| a.total_cmp(b))
            .map_or(0, |(j, _)| j);

        // Reconstruct path
        let mut path = vec![current];
        for i in (1..n).rev() {
            if let Some(prev) = dp[i][current].1 {
                current = prev;
            }
            path.push(current);
        }

        path.reverse();
        path
    }
}
