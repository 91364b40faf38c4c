use std::{fmt::Display, str::FromStr};

use crate::{
    bar::Bar,
    plate::Inventory,
    reachable::{closest, reachable_weights},
    warmup_error::WarmupError,
    warmup_set::WarmupSet,
    weight::Weight,
};

/// The warm-up ladders the calculator knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    PercentageBased,
    FixedIncrements,
    StandardPyramid,
    WeightedBodyweight,
    DumbbellPreClimbing,
    DumbbellPostClimbing,
}

/// Everything a scheme may look at. `target_weight` is the full working
/// weight, bodyweight included for weighted bodyweight movements.
#[derive(Clone, Copy, Debug)]
pub struct SchemeParams<'a> {
    pub target_weight: Weight,
    pub num_sets: Option<usize>,
    pub bar_weight: Weight,
    pub inventory: &'a Inventory,
    pub minimize_plate_changes: bool,
    pub is_bodyweight: bool,
    pub bodyweight: Weight,
}

impl SchemeParams<'_> {
    /// Load the ladder is computed on: the working weight, or only the part
    /// above bodyweight.
    fn working_load(&self) -> Weight {
        if self.is_bodyweight {
            self.target_weight.saturating_sub(self.bodyweight)
        } else {
            self.target_weight
        }
    }

    fn added(&self, weight: Weight) -> Option<Weight> {
        self.is_bodyweight
            .then(|| weight.saturating_sub(self.bodyweight))
    }
}

/// Maps a set's percentage of the working weight to its reps: the first
/// step whose ceiling is not below the percentage wins.
struct Staircase {
    steps: &'static [(u32, u32)],
    otherwise: u32,
}

impl Staircase {
    fn reps(&self, percentage: u32) -> u32 {
        self.steps
            .iter()
            .find(|(ceiling, _)| percentage <= *ceiling)
            .map_or(self.otherwise, |(_, reps)| *reps)
    }
}

const RAMP_REPS: Staircase = Staircase {
    steps: &[(50, 10), (60, 8), (70, 6), (80, 5), (85, 3)],
    otherwise: 2,
};

const PYRAMID_REPS: Staircase = Staircase {
    steps: &[(50, 10), (60, 8), (70, 6)],
    otherwise: 5,
};

const RAMP_FLOOR: u32 = 40;
const RAMP_CEILING: u32 = 90;
const PYRAMID_PERCENTAGES: [u32; 4] = [50, 60, 70, 80];

impl Scheme {
    pub const ALL: [Scheme; 6] = [
        Scheme::PercentageBased,
        Scheme::FixedIncrements,
        Scheme::StandardPyramid,
        Scheme::WeightedBodyweight,
        Scheme::DumbbellPreClimbing,
        Scheme::DumbbellPostClimbing,
    ];

    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Scheme::PercentageBased => "percentageBased",
            Scheme::FixedIncrements => "fixedIncrements",
            Scheme::StandardPyramid => "standardPyramid",
            Scheme::WeightedBodyweight => "weightedBodyweight",
            Scheme::DumbbellPreClimbing => "dumbbellPreClimbing",
            Scheme::DumbbellPostClimbing => "dumbbellPostClimbing",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::PercentageBased => "Percentage-Based",
            Scheme::FixedIncrements => "Fixed Increments",
            Scheme::StandardPyramid => "Standard Pyramid",
            Scheme::WeightedBodyweight => "Weighted Bodyweight",
            Scheme::DumbbellPreClimbing => "Dumbbell Pre-Climbing",
            Scheme::DumbbellPostClimbing => "Dumbbell Post-Climbing",
        }
    }

    /// Unknown identifiers fall back to the percentage ramp.
    #[must_use]
    pub fn resolve(id: &str) -> Scheme {
        id.parse().unwrap_or(Scheme::PercentageBased)
    }

    /// Whether the caller may choose the number of sets.
    #[must_use]
    pub fn is_configurable(&self) -> bool {
        matches!(self, Scheme::PercentageBased | Scheme::FixedIncrements)
    }

    #[must_use]
    pub fn default_sets(&self) -> usize {
        match self {
            Scheme::PercentageBased => 6,
            Scheme::FixedIncrements => 5,
            Scheme::StandardPyramid => 4,
            Scheme::WeightedBodyweight | Scheme::DumbbellPreClimbing => 3,
            Scheme::DumbbellPostClimbing => 2,
        }
    }

    /// The ladder for `params`, lightest set first.
    #[must_use]
    pub fn generate(&self, params: &SchemeParams<'_>) -> Vec<WarmupSet> {
        let num_sets = match self.is_configurable() {
            true => params.num_sets.unwrap_or_else(|| self.default_sets()),
            false => self.default_sets(),
        };

        let mut sets = match self {
            Scheme::PercentageBased => percentage_ramp(params, num_sets),
            Scheme::FixedIncrements => fixed_increments(params, num_sets),
            Scheme::StandardPyramid => standard_pyramid(params),
            Scheme::WeightedBodyweight => percentage_ramp(
                &SchemeParams {
                    bar_weight: Weight::ZERO,
                    minimize_plate_changes: false,
                    is_bodyweight: true,
                    ..*params
                },
                num_sets,
            ),
            Scheme::DumbbellPreClimbing => fixed_ladder(params, &[(50, 12), (75, 6), (100, 0)]),
            Scheme::DumbbellPostClimbing => fixed_ladder(params, &[(50, 8), (100, 0)]),
        };

        sets.sort_by_key(|set| set.weight);
        sets
    }
}

/// `round(40 + 50 * index / (sets - 1))`; a single set sits at the floor.
fn ramp_percentage(index: usize, num_sets: usize) -> u32 {
    let span = num_sets.saturating_sub(1) as u32;
    if span == 0 {
        return RAMP_FLOOR;
    }
    let step = (RAMP_CEILING - RAMP_FLOOR) * index as u32;
    RAMP_FLOOR + (step + span / 2) / span
}

fn percentage_ramp(params: &SchemeParams<'_>, num_sets: usize) -> Vec<WarmupSet> {
    let load = params.working_load();

    let ideals = (0..num_sets).map(|index| {
        let percentage = ramp_percentage(index, num_sets);
        let ideal = match params.is_bodyweight {
            true => load
                .scale_whole_plus(percentage, 100, params.bodyweight)
                .max(params.bodyweight),
            false => load.percent_whole(percentage),
        };
        (percentage, ideal)
    });

    if !params.minimize_plate_changes {
        return ideals
            .map(|(percentage, ideal)| ramp_set(params, percentage, ideal))
            .collect();
    }

    let bar = match params.is_bodyweight {
        true => Bar::single_stack(params.bodyweight),
        false => Bar::barbell(params.bar_weight),
    };
    let reachable = reachable_weights(&bar, params.target_weight, params.inventory);

    ideals
        .map(|(percentage, ideal)| {
            let snapped = closest(ideal, &reachable).unwrap_or(ideal);
            ramp_set(params, percentage, snapped).with_ideal_weight(ideal)
        })
        .collect()
}

fn ramp_set(params: &SchemeParams<'_>, percentage: u32, weight: Weight) -> WarmupSet {
    let set = WarmupSet::new(percentage, weight, RAMP_REPS.reps(percentage));
    match params.added(weight) {
        Some(added) => set.with_added_weight(added),
        None => set,
    }
}

const FIXED_TOP_RATIO_MIN: f64 = 0.9;
const FIXED_TOP_RATIO_MAX: f64 = 0.95;
const FIXED_CAP_RATIO: f64 = 0.99;

/// Equal jumps from the bar (or bodyweight) up to 90-95% of the working
/// load, never touching the working load itself.
fn fixed_increments(params: &SchemeParams<'_>, num_sets: usize) -> Vec<WarmupSet> {
    if num_sets == 0 {
        return Vec::new();
    }

    let load = params.working_load().as_f64();
    let base = match params.is_bodyweight {
        true => 0.0,
        false => params.bar_weight.as_f64(),
    };
    let sets = num_sets as f64;
    let top_ratio = (sets / (sets + 1.0)).clamp(FIXED_TOP_RATIO_MIN, FIXED_TOP_RATIO_MAX);
    let increment = (load * top_ratio - base) / sets;

    (1..=num_sets)
        .map(|step| {
            let mut component = base + increment * step as f64;
            if component >= load {
                component = load * FIXED_CAP_RATIO;
            }

            let (display, percentage) = match params.is_bodyweight {
                true => {
                    let total = params.bodyweight.as_f64() + component;
                    (total, ratio_percentage(total, params.target_weight.as_f64()))
                }
                false => (component, ratio_percentage(component, load)),
            };

            let weight = Weight::from_f64(display.round());
            let set = WarmupSet::new(percentage, weight, RAMP_REPS.reps(percentage));
            match params.added(weight) {
                Some(added) => set.with_added_weight(added),
                None => set,
            }
        })
        .collect()
}

fn ratio_percentage(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        return 0;
    }
    (part / whole * 100.0).round().max(0.0) as u32
}

fn standard_pyramid(params: &SchemeParams<'_>) -> Vec<WarmupSet> {
    PYRAMID_PERCENTAGES
        .iter()
        .map(|percentage| {
            let weight = params.target_weight.percent_whole(*percentage);
            let set = WarmupSet::new(*percentage, weight, PYRAMID_REPS.reps(*percentage));
            match params.added(weight) {
                Some(added) => set.with_added_weight(added),
                None => set,
            }
        })
        .collect()
}

/// Fixed `(percentage, reps)` pairs of the working weight.
fn fixed_ladder(params: &SchemeParams<'_>, ladder: &[(u32, u32)]) -> Vec<WarmupSet> {
    ladder
        .iter()
        .map(|(percentage, reps)| {
            WarmupSet::new(
                *percentage,
                params.target_weight.percent_whole(*percentage),
                *reps,
            )
        })
        .collect()
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scheme {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| WarmupError::UnknownScheme(s.to_owned()))
    }
}
