use itertools::Itertools;
use tracing_subscriber::EnvFilter;
use warmup_rs::{
    bar::Bar,
    loadout::Loadout,
    optimizer::PlateChangeOptimizer,
    plate::Inventory,
    weight::Weight,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    println!("=== Debugging plate-change DP candidate selection ===\n");

    let inventory = Inventory::standard().at_least(Weight::FIVE);
    let bar = Bar::barbell(Weight::whole(45));
    let targets = [95, 135, 185].map(Weight::whole);

    let optimizer = PlateChangeOptimizer::new(bar, &inventory);
    let candidates = optimizer.candidates(&targets);

    for (target, pool) in targets.iter().zip(&candidates) {
        println!("Set {target} ({} candidates):", pool.len());
        for loadout in pool {
            println!("  {loadout}");
        }
    }

    let canonical = optimizer.canonical(&targets);
    let planned = optimizer.optimize(&targets);
    let chosen = planned
        .iter()
        .map(|p| p.plating.loadout())
        .collect::<Vec<Loadout>>();

    println!("\nChosen path:");
    for (target, p) in targets.iter().zip(&planned) {
        println!("  {target}: {}  [{} changes]", p.plating, p.plate_changes);
    }

    let model = optimizer.cost_model();
    println!(
        "\nDP cost {:.2} vs greedy {:.2} ({})",
        model.path_cost(&chosen),
        model.path_cost(&canonical),
        canonical.iter().join(" -> ")
    );

    Ok(())
}
