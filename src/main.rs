use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use warmup_rs::{
    calculator::{Calculator, WarmupRequest},
    equipment::{Equipment, SessionTiming},
    plate::Plate,
    reachable::{Direction, step_weight},
    rep_max::{MaxMethod, RepMaxEstimate, RepSet, estimate_max},
    scheme::Scheme,
    settings::Settings,
    strength::{Lift, StrengthAssessment, assess},
    warmup_set::WarmupPlan,
    weight::Weight,
};

#[derive(Clone, Copy, ValueEnum)]
enum Step {
    Up,
    Down,
}

#[derive(Parser)]
struct Args {
    /// Working weight; the added load for weighted bodyweight movements.
    #[arg(value_parser = clap::value_parser!(Weight), required_unless_present = "from_sets")]
    target: Option<Weight>,

    /// Work from the max estimated from these sets, e.g. 225x5,205x8.
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(RepSet), conflicts_with = "target")]
    from_sets: Vec<RepSet>,

    /// How set estimates combine: average, highest, lowest or weighted.
    #[arg(long, value_parser = clap::value_parser!(MaxMethod))]
    max_method: Option<MaxMethod>,

    /// Rate the max against this lift's bodyweight standards.
    #[arg(long, value_parser = clap::value_parser!(Lift))]
    lift: Option<Lift>,

    /// Saved settings JSON to start from.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_parser = clap::value_parser!(Scheme))]
    scheme: Option<Scheme>,

    #[arg(long)]
    sets: Option<usize>,

    #[arg(long, value_parser = clap::value_parser!(Weight))]
    bar: Option<Weight>,

    #[arg(long, value_parser = clap::value_parser!(Equipment))]
    equipment: Option<Equipment>,

    #[arg(long, value_parser = clap::value_parser!(SessionTiming))]
    timing: Option<SessionTiming>,

    #[arg(long, value_parser = clap::value_parser!(Weight))]
    bodyweight: Option<Weight>,

    /// Available plate weights, e.g. 45,25,10,5.
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(Weight))]
    plates: Vec<Weight>,

    /// Plate weights to leave out, e.g. 2.5,5.
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(Weight))]
    disable: Vec<Weight>,

    #[arg(long)]
    minimize: bool,

    /// Append a backoff set at this percentage of the working weight.
    #[arg(long)]
    backoff: Option<u32>,

    /// Print the next loadable weight in this direction instead of a plan.
    #[arg(long, value_enum)]
    step: Option<Step>,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rep_max: Option<&'a RepMaxEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strength: Option<&'a StrengthAssessment>,
    #[serde(flatten)]
    plan: &'a WarmupPlan,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(timing) = args.timing {
        settings.session_timing = Some(timing);
    }
    if let Some(equipment) = args.equipment {
        settings.equipment_type = Some(equipment);
    }
    if let Some(bar) = args.bar {
        settings.bar_weight = bar;
    }
    if let Some(bodyweight) = args.bodyweight {
        settings.bodyweight = bodyweight;
    }
    if !args.plates.is_empty() {
        settings.available_plates = Plate::from_weights(&args.plates, true);
    }
    if let Some(percentage) = args.backoff {
        settings.enable_backoff = true;
        settings.backoff_percentage = percentage;
    }
    settings.minimize_plate_changes |= args.minimize;

    let mut inventory = settings.inventory();
    for plate in &args.disable {
        inventory.set_available(*plate, false);
    }

    let estimate = match args.from_sets.is_empty() {
        true => None,
        false => Some(estimate_max(
            &args.from_sets,
            args.max_method.unwrap_or_default(),
        )?),
    };

    let request = WarmupRequest {
        scheme: args.scheme.unwrap_or_else(|| settings.scheme()),
        num_sets: args.sets.or(settings.num_warmup_sets),
        bar_weight: settings.bar_weight,
        inventory,
        minimize_plate_changes: settings.minimize_plate_changes,
        bodyweight: settings.bodyweight(),
        backoff_percentage: settings.backoff(),
        ..WarmupRequest::new(args.target.unwrap_or(Weight::ZERO), settings.equipment())
    };
    let request = match &estimate {
        Some(estimate) => request.with_estimated_max(estimate.estimated_max),
        None => request,
    };

    if let Some(step) = args.step {
        let direction = match step {
            Step::Up => Direction::Up,
            Step::Down => Direction::Down,
        };
        let bar = settings.equipment().stepping_bar(settings.bar_weight);
        println!(
            "{}",
            step_weight(request.target_weight, direction, &bar, &request.inventory)
        );
        return Ok(());
    }

    let strength = match args.lift {
        Some(lift) => {
            let max = estimate
                .as_ref()
                .map_or(request.target_weight, |e| e.estimated_max);
            Some(assess(lift, max, settings.bodyweight)?)
        }
        None => None,
    };

    let plan = Calculator::default().try_calculate(&request)?;

    match args.json {
        true => {
            let report = Report {
                rep_max: estimate.as_ref(),
                strength: strength.as_ref(),
                plan: &plan,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        false => {
            if let Some(estimate) = &estimate {
                println!(
                    "Estimated max {} ({} of {} sets)",
                    estimate.estimated_max, estimate.method, estimate.sets_used
                );
                for range in &estimate.rep_ranges {
                    println!("  {:>2} reps: {} ({}%)", range.reps, range.weight, range.percentage);
                }
            }
            if let Some(strength) = &strength {
                println!("{strength}");
            }
            println!(
                "{} for {} ({})",
                request.scheme,
                plan.rounded_target_weight,
                request.equipment
            );
            for set in plan.sets() {
                println!("{set}");
            }
        }
    }

    Ok(())
}
