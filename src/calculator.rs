use tracing::debug;

use crate::{
    bar::Bar,
    decompose::{SearchLimits, greedy},
    equipment::Equipment,
    optimizer::{CostModel, PlateChangeOptimizer},
    plate::Inventory,
    plating::Plating,
    reachable::{closest, reachable_weights},
    scheme::{Scheme, SchemeParams},
    warmup_error::WarmupError,
    warmup_set::{WarmupPlan, WarmupSet},
    weight::Weight,
};

const BASELINE_REPS: u32 = 12;
const BACKOFF_REPS: u32 = 8;
const ROUNDING_STEP: Weight = Weight::FIVE;
/// Barbell loads are rounded per side, i.e. in steps of twice this.
const BARBELL_ROUNDING_STEP: Weight = Weight::whole(10);

/// One calculation request, as entered by the lifter.
#[derive(Clone, Debug)]
pub struct WarmupRequest {
    /// Working weight; only the added load for weighted bodyweight movements.
    pub target_weight: Weight,
    pub scheme: Scheme,
    pub num_sets: Option<usize>,
    pub bar_weight: Weight,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub minimize_plate_changes: bool,
    pub bodyweight: Weight,
    /// Backoff percentage of the working weight, when a backoff set is wanted.
    pub backoff_percentage: Option<u32>,
}

impl WarmupRequest {
    #[must_use]
    pub fn new(target_weight: Weight, equipment: Equipment) -> Self {
        WarmupRequest {
            target_weight,
            scheme: Scheme::PercentageBased,
            num_sets: None,
            bar_weight: Weight::whole(45),
            equipment,
            inventory: Inventory::standard(),
            minimize_plate_changes: false,
            bodyweight: Weight::ZERO,
            backoff_percentage: None,
        }
    }

    /// Uses an estimated max as the working weight, rounded to the lightest
    /// plate on hand.
    #[must_use]
    pub fn with_estimated_max(self, max: Weight) -> Self {
        WarmupRequest {
            target_weight: self.inventory.round_to_lightest(max),
            ..self
        }
    }

    /// Checks the request the way the calculator does before computing.
    ///
    /// # Errors
    /// If the working weight is zero outside weighted bodyweight mode, or the
    /// bodyweight is missing in it.
    pub fn validate(&self) -> Result<(), WarmupError> {
        match self.equipment.is_bodyweight() {
            true if self.bodyweight.is_zero() => Err(WarmupError::MissingBodyweight),
            false if self.target_weight.is_zero() => {
                Err(WarmupError::NonPositiveTarget(self.target_weight))
            }
            _ => Ok(()),
        }
    }

    fn is_bodyweight(&self) -> bool {
        self.equipment.is_bodyweight()
    }

    /// Bodyweight plus added load, or the working weight.
    fn total_target(&self) -> Weight {
        match self.is_bodyweight() {
            true => self.bodyweight + self.target_weight,
            false => self.target_weight,
        }
    }

    fn minimizes(&self) -> bool {
        self.minimize_plate_changes && self.equipment.supports_plate_minimization()
    }
}

/// Turns a request into a finished, plated warm-up plan.
#[derive(Clone, Debug)]
pub struct Calculator {
    pub cost_model: CostModel,
    pub limits: SearchLimits,
    /// Plates lighter than this are never suggested.
    pub min_plate_weight: Weight,
    /// Prepend an empty-bar (or bodyweight-only) set when the ladder starts
    /// above it.
    pub baseline_set: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            cost_model: CostModel::default(),
            limits: SearchLimits::default(),
            min_plate_weight: Weight::FIVE,
            baseline_set: true,
        }
    }
}

impl Calculator {
    /// The plan for `request`, or an empty plan when the request is invalid.
    #[must_use]
    pub fn calculate(&self, request: &WarmupRequest) -> WarmupPlan {
        self.try_calculate(request).unwrap_or_else(|err| {
            debug!(error = %err, "calculator.invalid_request");
            WarmupPlan::default()
        })
    }

    ///
    /// # Errors
    /// If the request fails [`WarmupRequest::validate`].
    ///
    pub fn try_calculate(&self, request: &WarmupRequest) -> Result<WarmupPlan, WarmupError> {
        request.validate()?;

        let rounded_target = self.rounded_target_weight(request);
        let inventory = request.inventory.at_least(self.min_plate_weight);
        let params = SchemeParams {
            target_weight: request.total_target(),
            num_sets: request.num_sets.filter(|_| request.scheme.is_configurable()),
            bar_weight: request.bar_weight,
            inventory: &inventory,
            minimize_plate_changes: request.minimizes(),
            is_bodyweight: request.is_bodyweight(),
            bodyweight: request.bodyweight,
        };

        let mut sets = request.scheme.generate(&params);
        if sets.is_empty() {
            return Ok(WarmupPlan::new(sets, rounded_target));
        }

        if self.baseline_set
            && let Some(baseline) = baseline(request, &sets[0])
        {
            sets.insert(0, baseline);
        }

        let mut sets = sets
            .into_iter()
            .map(|set| round_set(request, set))
            .collect::<Vec<_>>();

        match request.minimizes() {
            true => self.plate_optimized(request, &inventory, &mut sets),
            false => {
                for set in &mut sets {
                    plate_set(request, &inventory, set);
                }
            }
        }

        if let Some(percentage) = request.backoff_percentage {
            sets.push(backoff_set(request, &inventory, percentage));
        }

        debug!(
            scheme = request.scheme.id(),
            sets = sets.len(),
            minimize = request.minimizes(),
            "calculator.plan"
        );
        Ok(WarmupPlan::new(sets, rounded_target))
    }

    /// The working weight as shown to the lifter: nearest 5 for dumbbells,
    /// nearest loadable weight for a barbell.
    #[must_use]
    pub fn rounded_target_weight(&self, request: &WarmupRequest) -> Weight {
        match request.equipment {
            Equipment::Dumbbell => request.target_weight.round_to(ROUNDING_STEP),
            Equipment::WeightedBodyweight => request.target_weight,
            Equipment::Barbell => {
                let inventory = request.inventory.at_least(self.min_plate_weight);
                let headroom = inventory.heaviest().unwrap_or(Weight::ZERO) * 2;
                let bar = Bar::barbell(request.bar_weight);
                let reachable =
                    reachable_weights(&bar, request.target_weight + headroom, &inventory);
                closest(request.target_weight, &reachable).unwrap_or(request.target_weight)
            }
        }
    }

    fn plate_optimized(&self, request: &WarmupRequest, inventory: &Inventory, sets: &mut [WarmupSet]) {
        let optimizer = PlateChangeOptimizer::new(Bar::barbell(request.bar_weight), inventory)
            .with_cost_model(self.cost_model)
            .with_limits(self.limits);
        let targets = sets.iter().map(|set| set.weight).collect::<Vec<_>>();

        for (set, planned) in sets.iter_mut().zip(optimizer.optimize(&targets)) {
            set.plating = Some(planned.plating);
            set.plate_changes = Some(planned.plate_changes);
        }
    }
}

/// An empty-bar or bodyweight-only set, when the ladder starts above it.
fn baseline(request: &WarmupRequest, lightest: &WarmupSet) -> Option<WarmupSet> {
    let total = request.total_target();
    match request.equipment {
        Equipment::WeightedBodyweight => {
            let starts_at_bodyweight = match lightest.added_weight {
                Some(added) => added.is_zero(),
                None => lightest.weight <= request.bodyweight,
            };
            (!starts_at_bodyweight).then(|| {
                WarmupSet::new(
                    request.bodyweight.percent_of(total),
                    request.bodyweight,
                    BASELINE_REPS,
                )
                .with_added_weight(Weight::ZERO)
            })
        }
        Equipment::Barbell => (lightest.weight > request.bar_weight).then(|| {
            WarmupSet::new(
                request.bar_weight.percent_of(total),
                request.bar_weight,
                BASELINE_REPS,
            )
        }),
        Equipment::Dumbbell => None,
    }
}

/// Backoff sets are plated on their own, never through the optimizer.
fn backoff_set(request: &WarmupRequest, inventory: &Inventory, percentage: u32) -> WarmupSet {
    let percentage = percentage.min(100);
    let set = match request.is_bodyweight() {
        true => {
            let added = request.target_weight.percent(percentage);
            WarmupSet::new(percentage, request.bodyweight + added, BACKOFF_REPS)
                .with_added_weight(added)
        }
        false => WarmupSet::new(
            percentage,
            request.total_target().percent(percentage),
            BACKOFF_REPS,
        ),
    };

    let mut set = round_set(request, set.backoff());
    plate_set(request, inventory, &mut set);
    set
}

/// Snaps a set to what the equipment can express. `ideal_weight` follows
/// the rounded weight.
fn round_set(request: &WarmupRequest, mut set: WarmupSet) -> WarmupSet {
    match request.equipment {
        Equipment::WeightedBodyweight => match set.added_weight {
            Some(added) => {
                let added = added.round_to(ROUNDING_STEP);
                set.added_weight = Some(added);
                set.weight = request.bodyweight + added;
            }
            None => set.weight = set.weight.max(request.bodyweight),
        },
        Equipment::Dumbbell => set.weight = set.weight.round_to(ROUNDING_STEP),
        Equipment::Barbell => {
            let bar = request.bar_weight;
            set.weight = match set.weight <= bar {
                true => bar,
                false => bar + set.weight.saturating_sub(bar).round_to(BARBELL_ROUNDING_STEP),
            };
        }
    }

    if set.ideal_weight.is_some() {
        set.ideal_weight = Some(set.weight);
    }
    set
}

/// Plates one set on its own, largest plates first. Outside plate-change
/// minimisation a shortfall is swallowed and the set shows what the plates
/// actually make.
fn plate_set(request: &WarmupRequest, inventory: &Inventory, set: &mut WarmupSet) {
    let plates = inventory.available();
    let minimizes = request.minimizes();

    let plating = match request.equipment {
        Equipment::Dumbbell => Plating::unloaded(Bar::single_stack(set.weight)),
        Equipment::WeightedBodyweight => {
            let stack = Bar::single_stack(Weight::ZERO);
            let added = set.added_weight.unwrap_or(Weight::ZERO);
            let (loadout, _) = greedy(added, &plates);
            Plating::new(&loadout, stack, added)
        }
        Equipment::Barbell => {
            let bar = Bar::barbell(request.bar_weight);
            let side = bar.per_side(set.weight);
            let (loadout, _) = greedy(side, &plates);
            Plating::new(&loadout, bar, side)
        }
    };

    let plating = match minimizes {
        true => plating,
        false => plating.accept_nearest(),
    };

    if let Some(adjusted) = plating.adjusted_target_weight {
        match request.is_bodyweight() {
            true => {
                set.added_weight = Some(adjusted);
                set.weight = request.bodyweight + adjusted;
            }
            false => set.weight = adjusted,
        }
    }
    set.plating = Some(plating);
}
