use warmup_rs::{
    bar::Bar,
    calculator::{Calculator, WarmupRequest},
    equipment::Equipment,
    optimizer::PlateChangeOptimizer,
    plate::Inventory,
    reachable::{Direction, step_weight},
    rep_max::{MaxMethod, RepSet, estimate_max},
    scheme::{Scheme, SchemeParams},
    settings::Settings,
    strength::{Lift, StrengthLevel, assess},
    warmup_set::WarmupPlan,
    weight::Weight,
};

fn whole(weights: &[u32]) -> Vec<Weight> {
    weights.iter().map(|w| Weight::whole(*w)).collect()
}

fn barbell(target: u32, minimize: bool) -> WarmupRequest {
    WarmupRequest {
        minimize_plate_changes: minimize,
        ..WarmupRequest::new(Weight::whole(target), Equipment::Barbell)
    }
}

fn assert_platings_add_up(plan: &WarmupPlan) {
    for set in plan.sets() {
        let plating = set.plating.as_ref().expect("every set is plated");
        let loaded = plating
            .entries
            .iter()
            .map(|e| e.weight * e.count)
            .sum::<Weight>();
        assert_eq!(plating.bar().total(loaded), plating.actual_weight, "{set}");
    }
}

#[test]
fn test_percentage_scheme_for_225() {
    let inventory = Inventory::standard();
    let params = SchemeParams {
        target_weight: Weight::whole(225),
        num_sets: Some(6),
        bar_weight: Weight::whole(45),
        inventory: &inventory,
        minimize_plate_changes: false,
        is_bodyweight: false,
        bodyweight: Weight::ZERO,
    };
    let sets = Scheme::PercentageBased.generate(&params);

    assert_eq!(
        sets.iter().map(|s| s.weight).collect::<Vec<_>>(),
        whole(&[90, 113, 135, 158, 180, 203])
    );
    assert_eq!(
        sets.iter().map(|s| s.percentage).collect::<Vec<_>>(),
        vec![40, 50, 60, 70, 80, 90]
    );
}

#[test]
fn test_calculation_is_repeatable() {
    let calculator = Calculator::default();
    for request in [barbell(225, false), barbell(315, true)] {
        assert_eq!(calculator.calculate(&request), calculator.calculate(&request));
    }
}

#[test]
fn test_platings_add_up_with_and_without_minimizing() {
    let calculator = Calculator::default();
    for target in [95, 135, 185, 225, 315, 405] {
        let plain = calculator.calculate(&barbell(target, false));
        assert_platings_add_up(&plain);
        for set in plain.sets() {
            assert_eq!(set.plating.as_ref().unwrap().actual_weight, set.weight);
        }

        let minimized = calculator.calculate(&barbell(target, true));
        assert_platings_add_up(&minimized);
        assert!(minimized.sets().iter().all(|s| s.plate_changes.is_some()));
    }
}

#[test]
fn test_weighted_bodyweight_never_below_bodyweight() {
    let request = WarmupRequest {
        scheme: Scheme::WeightedBodyweight,
        bodyweight: Weight::whole(180),
        ..WarmupRequest::new(Weight::whole(10), Equipment::WeightedBodyweight)
    };
    let plan = Calculator::default().calculate(&request);

    assert!(!plan.is_empty());
    for set in plan.sets() {
        assert!(set.weight >= Weight::whole(180), "{set}");
        assert_eq!(set.weight, Weight::whole(180) + set.added_weight.unwrap());
    }
}

#[test]
fn test_optimized_ladder_costs_no_more_than_greedy() {
    let bar = Bar::barbell(Weight::whole(45));
    let inventory = Inventory::standard().at_least(Weight::FIVE);
    let targets = whole(&[95, 135, 185]);

    let optimizer = PlateChangeOptimizer::new(bar, &inventory);
    let chosen = optimizer
        .optimize(&targets)
        .iter()
        .map(|p| p.plating.loadout())
        .collect::<Vec<_>>();

    let model = optimizer.cost_model();
    let greedy = optimizer.canonical(&targets);
    assert!(model.path_cost(&chosen) <= model.path_cost(&greedy) + 1e-9);
}

#[test]
fn test_settings_select_the_journey() {
    let settings = Settings::from_json(
        r#"{"sessionTiming": "post", "equipmentType": "dumbbell", "barWeight": 45}"#,
    )
    .unwrap();
    assert_eq!(settings.scheme(), Scheme::DumbbellPostClimbing);

    let request = WarmupRequest {
        scheme: settings.scheme(),
        inventory: settings.inventory(),
        ..WarmupRequest::new(Weight::whole(60), settings.equipment())
    };
    let plan = Calculator::default().calculate(&request);
    assert_eq!(
        plan.sets().iter().map(|s| s.weight).collect::<Vec<_>>(),
        whole(&[30, 60])
    );
}

#[test]
fn test_step_weight_moves_one_pair() {
    let bar = Bar::barbell(Weight::whole(45));
    let inventory = Inventory::standard().at_least(Weight::FIVE);

    assert_eq!(
        step_weight(Weight::whole(135), Direction::Up, &bar, &inventory),
        Weight::whole(145)
    );
    assert_eq!(
        step_weight(Weight::whole(135), Direction::Down, &bar, &inventory),
        Weight::whole(125)
    );
    assert_eq!(
        step_weight(Weight::whole(45), Direction::Down, &bar, &inventory),
        Weight::whole(45)
    );
}

#[test]
fn test_step_weight_for_added_load() {
    let bar = Equipment::WeightedBodyweight.stepping_bar(Weight::whole(45));
    let inventory = Inventory::standard();

    assert_eq!(
        step_weight(Weight::whole(20), Direction::Up, &bar, &inventory),
        Weight::from_milli(20_250)
    );
    assert_eq!(
        step_weight(Weight::whole(20), Direction::Down, &bar, &inventory),
        Weight::from_milli(19_750)
    );
    assert_eq!(
        step_weight(Weight::ZERO, Direction::Down, &bar, &inventory),
        Weight::ZERO
    );
}

#[test]
fn test_plan_from_logged_sets() {
    let sets = ["200x5", "200x12"]
        .iter()
        .map(|s| s.parse::<RepSet>().unwrap())
        .collect::<Vec<_>>();
    let estimate = estimate_max(&sets, MaxMethod::Average).unwrap();
    assert_eq!(estimate.estimated_max, Weight::whole(261));

    let request = WarmupRequest {
        inventory: Inventory::standard().at_least(Weight::FIVE),
        ..barbell(0, false)
    }
    .with_estimated_max(estimate.estimated_max);
    assert_eq!(request.target_weight, Weight::whole(260));

    let plan = Calculator::default().calculate(&request);
    assert!(!plan.is_empty());
    assert_platings_add_up(&plan);

    let strength = assess(Lift::Squat, estimate.estimated_max, Weight::whole(200)).unwrap();
    assert_eq!(strength.level, StrengthLevel::Novice);
    assert_eq!(strength.next.map(|n| n.weight), Some(Weight::whole(350)));
}
