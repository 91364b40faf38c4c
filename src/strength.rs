use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use tracing::debug;

use crate::{warmup_error::WarmupError, weight::Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Lift {
    Squat,
    BenchPress,
    BentOverRow,
    Deadlift,
    OverheadPress,
    BarbellLunge,
    Dip,
    RomanianDeadlift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthLevel {
    BelowUntrained,
    Untrained,
    Novice,
    Intermediate,
    Advanced,
    Elite,
}

const LEVELS: [StrengthLevel; 5] = [
    StrengthLevel::Untrained,
    StrengthLevel::Novice,
    StrengthLevel::Intermediate,
    StrengthLevel::Advanced,
    StrengthLevel::Elite,
];

impl Lift {
    pub const ALL: [Lift; 8] = [
        Lift::Squat,
        Lift::BenchPress,
        Lift::BentOverRow,
        Lift::Deadlift,
        Lift::OverheadPress,
        Lift::BarbellLunge,
        Lift::Dip,
        Lift::RomanianDeadlift,
    ];

    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Lift::Squat => "squat",
            Lift::BenchPress => "benchPress",
            Lift::BentOverRow => "bentOverRow",
            Lift::Deadlift => "deadlift",
            Lift::OverheadPress => "overheadPress",
            Lift::BarbellLunge => "barbellLunge",
            Lift::Dip => "dip",
            Lift::RomanianDeadlift => "romanianDeadlift",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Lift::Squat => "Back Squat",
            Lift::BenchPress => "Bench Press",
            Lift::BentOverRow => "Bent Over Barbell Row",
            Lift::Deadlift => "Deadlift",
            Lift::OverheadPress => "Overhead Press",
            Lift::BarbellLunge => "Barbell Lunge",
            Lift::Dip => "Dip",
            Lift::RomanianDeadlift => "Romanian Deadlift",
        }
    }

    /// Bodyweight multiples, in hundredths, for untrained through elite.
    #[must_use]
    pub fn standards(&self) -> [u32; 5] {
        match self {
            Lift::Squat | Lift::RomanianDeadlift => [75, 125, 175, 225, 275],
            Lift::BenchPress | Lift::BentOverRow => [50, 75, 125, 175, 225],
            Lift::Deadlift => [100, 150, 225, 300, 375],
            Lift::OverheadPress => [35, 50, 75, 110, 150],
            Lift::BarbellLunge => [40, 60, 100, 140, 180],
            Lift::Dip => [25, 50, 100, 150, 200],
        }
    }
}

impl Display for Lift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Lift {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.replace([' ', '-', '_'], "").to_lowercase();
        Lift::ALL
            .into_iter()
            .find(|lift| {
                lift.id().to_lowercase() == key || lift.name().replace(' ', "").to_lowercase() == key
            })
            .ok_or_else(|| WarmupError::UnknownLift(s.to_owned()))
    }
}

impl Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthLevel::BelowUntrained => write!(f, "Below untrained"),
            StrengthLevel::Untrained => write!(f, "Untrained"),
            StrengthLevel::Novice => write!(f, "Novice"),
            StrengthLevel::Intermediate => write!(f, "Intermediate"),
            StrengthLevel::Advanced => write!(f, "Advanced"),
            StrengthLevel::Elite => write!(f, "Elite"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextLevel {
    pub level: StrengthLevel,
    /// Max needed for the level, to the nearest 5.
    pub weight: Weight,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthAssessment {
    pub lift: Lift,
    pub estimated_max: Weight,
    pub bodyweight: Weight,
    pub ratio: f64,
    pub level: StrengthLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextLevel>,
}

impl Display for StrengthAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at {:.2}x bodyweight",
            self.lift, self.level, self.ratio
        )?;
        if let Some(next) = self.next {
            write!(f, ", {} at {}", next.level, next.weight)?;
        }
        Ok(())
    }
}

/// Places `estimated_max` among the lift's bodyweight standards.
///
/// # Errors
/// If `bodyweight` is zero.
pub fn assess(
    lift: Lift,
    estimated_max: Weight,
    bodyweight: Weight,
) -> Result<StrengthAssessment, WarmupError> {
    if bodyweight.is_zero() {
        return Err(WarmupError::MissingBodyweight);
    }
    let reaches = |multiple: u32| {
        u64::from(estimated_max.milli()) * 100 >= u64::from(multiple) * u64::from(bodyweight.milli())
    };
    let mut standards = LEVELS.into_iter().zip(lift.standards());

    let level = standards
        .clone()
        .rev()
        .find(|(_, multiple)| reaches(*multiple))
        .map_or(StrengthLevel::BelowUntrained, |(level, _)| level);
    let next = standards
        .find(|(_, multiple)| !reaches(*multiple))
        .map(|(level, multiple)| NextLevel {
            level,
            weight: bodyweight.scale_to(multiple, 100, Weight::FIVE),
        });

    let assessment = StrengthAssessment {
        lift,
        estimated_max,
        bodyweight,
        ratio: estimated_max.as_f64() / bodyweight.as_f64(),
        level,
        next,
    };
    debug!(lift = lift.id(), level = %level, "strength.assess");
    Ok(assessment)
}
