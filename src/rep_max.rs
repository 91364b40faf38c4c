use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::Serialize;
use tracing::debug;

use crate::{warmup_error::WarmupError, weight::Weight};

/// Sets with more reps than this say too little about a max to be used.
pub const MAX_RELIABLE_REPS: u32 = 30;
/// Epley up to here, Brzycki above.
const EPLEY_MAX_REPS: u32 = 10;
/// Rep counts listed in the rep range table.
pub const REP_RANGE: RangeInclusive<u32> = 1..=15;

/// One performed set, e.g. `225x5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RepSet {
    pub weight: Weight,
    pub reps: u32,
}

impl RepSet {
    #[must_use]
    pub fn new(weight: Weight, reps: u32) -> Self {
        RepSet { weight, reps }
    }

    /// Estimated one-rep max in whole units: the weight itself for a single,
    /// `w * (1 + r/30)` up to 10 reps, `w * 36 / (37 - r)` up to 30. `None`
    /// for empty or unreliable sets.
    #[must_use]
    pub fn estimated_max(&self) -> Option<Weight> {
        if self.weight.is_zero() {
            return None;
        }
        match self.reps {
            0 => None,
            1 => Some(self.weight),
            reps if reps > MAX_RELIABLE_REPS => None,
            reps if reps <= EPLEY_MAX_REPS => Some(self.weight.scale_whole(30 + reps, 30)),
            reps => Some(self.weight.scale_whole(36, 37 - reps)),
        }
    }
}

impl Display for RepSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.weight, self.reps)
    }
}

impl FromStr for RepSet {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WarmupError::InvalidRepSet(s.to_owned());
        let (weight, reps) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        Ok(RepSet {
            weight: weight.parse().map_err(|_| invalid())?,
            reps: reps.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// How the per-set estimates are combined into one max.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MaxMethod {
    #[default]
    Average,
    Highest,
    Lowest,
    /// Average weighted by each set's `weight * reps`.
    Weighted,
}

impl Display for MaxMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaxMethod::Average => write!(f, "average"),
            MaxMethod::Highest => write!(f, "highest"),
            MaxMethod::Lowest => write!(f, "lowest"),
            MaxMethod::Weighted => write!(f, "weighted"),
        }
    }
}

impl FromStr for MaxMethod {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "average" => Ok(MaxMethod::Average),
            "highest" => Ok(MaxMethod::Highest),
            "lowest" => Ok(MaxMethod::Lowest),
            "weighted" => Ok(MaxMethod::Weighted),
            _ => Err(WarmupError::UnknownMaxMethod(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RepRange {
    pub reps: u32,
    pub weight: Weight,
    pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepMaxEstimate {
    pub estimated_max: Weight,
    pub method: MaxMethod,
    pub sets_used: usize,
    /// Sets left out for being empty or above the reliable rep count.
    pub skipped_sets: usize,
    pub rep_ranges: Vec<RepRange>,
}

/// Combines every usable set into one estimated max and derives the rep
/// range table from it.
///
/// # Errors
/// If no set has a positive weight and between 1 and 30 reps.
pub fn estimate_max(sets: &[RepSet], method: MaxMethod) -> Result<RepMaxEstimate, WarmupError> {
    let estimates = sets
        .iter()
        .filter_map(|set| set.estimated_max().map(|max| (*set, max)))
        .collect::<Vec<_>>();
    let skipped_sets = sets.len() - estimates.len();
    if skipped_sets > 0 {
        debug!(skipped = skipped_sets, "rep_max.skipped_sets");
    }

    let estimated_max = match method {
        MaxMethod::Highest => estimates.iter().map(|(_, max)| *max).max(),
        MaxMethod::Lowest => estimates.iter().map(|(_, max)| *max).min(),
        MaxMethod::Average => average(&estimates),
        MaxMethod::Weighted => weighted_average(&estimates),
    }
    .filter(|max| !max.is_zero())
    .ok_or(WarmupError::NoValidSets)?;

    debug!(max = %estimated_max, %method, sets = estimates.len(), "rep_max.estimate");
    Ok(RepMaxEstimate {
        estimated_max,
        method,
        sets_used: estimates.len(),
        skipped_sets,
        rep_ranges: rep_ranges(estimated_max),
    })
}

fn average(estimates: &[(RepSet, Weight)]) -> Option<Weight> {
    let count = u32::try_from(estimates.len()).ok().filter(|n| *n > 0)?;
    let total = estimates.iter().map(|(_, max)| *max).sum::<Weight>();
    Some(total.scale_whole(1, count))
}

fn weighted_average(estimates: &[(RepSet, Weight)]) -> Option<Weight> {
    let (weighted, factors) = estimates.iter().fold((0u128, 0u128), |(weighted, factors), (set, max)| {
        let factor = u128::from(set.weight.milli()) * u128::from(set.reps);
        (weighted + u128::from(max.milli()) * factor, factors + factor)
    });
    if factors == 0 {
        return None;
    }
    let divisor = factors * u128::from(Weight::whole(1).milli());
    let units = (weighted + divisor / 2) / divisor;
    u32::try_from(units).ok().map(Weight::whole)
}

/// Weight for each rep count at `max`, reversing whichever formula covers it.
#[must_use]
pub fn rep_ranges(max: Weight) -> Vec<RepRange> {
    REP_RANGE
        .map(|reps| {
            let weight = match reps <= EPLEY_MAX_REPS {
                true => max.scale_whole(30, 30 + reps),
                false => max.scale_whole(37 - reps, 36),
            };
            RepRange {
                reps,
                weight,
                percentage: weight.percent_of(max),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(weight: u32, reps: u32) -> RepSet {
        RepSet::new(Weight::whole(weight), reps)
    }

    #[test]
    fn test_set_formulas() {
        assert_eq!(set(315, 1).estimated_max(), Some(Weight::whole(315)));
        // Epley: 200 * 35 / 30 = 233.3
        assert_eq!(set(200, 5).estimated_max(), Some(Weight::whole(233)));
        // Brzycki: 200 * 36 / 25 = 288
        assert_eq!(set(200, 12).estimated_max(), Some(Weight::whole(288)));
        assert_eq!(set(100, 30).estimated_max(), Some(Weight::whole(514)));
        assert_eq!(set(100, 31).estimated_max(), None);
        assert_eq!(set(0, 5).estimated_max(), None);
        assert_eq!(set(100, 0).estimated_max(), None);
    }

    #[test]
    fn test_combining_methods() {
        let sets = [set(200, 5), set(200, 12)];
        let max = |method| estimate_max(&sets, method).unwrap().estimated_max;

        // (233 + 288) / 2 = 260.5
        assert_eq!(max(MaxMethod::Average), Weight::whole(261));
        assert_eq!(max(MaxMethod::Highest), Weight::whole(288));
        assert_eq!(max(MaxMethod::Lowest), Weight::whole(233));
        // (233 * 1000 + 288 * 2400) / 3400 = 271.8
        assert_eq!(max(MaxMethod::Weighted), Weight::whole(272));
    }

    #[test]
    fn test_unreliable_sets_are_skipped() {
        let estimate = estimate_max(&[set(200, 5), set(100, 31), set(0, 3)], MaxMethod::Average).unwrap();
        assert_eq!(estimate.estimated_max, Weight::whole(233));
        assert_eq!(estimate.sets_used, 1);
        assert_eq!(estimate.skipped_sets, 2);

        assert!(matches!(
            estimate_max(&[set(100, 31)], MaxMethod::Highest),
            Err(WarmupError::NoValidSets)
        ));
        assert!(matches!(estimate_max(&[], MaxMethod::Average), Err(WarmupError::NoValidSets)));
    }

    #[test]
    fn test_rep_range_table() {
        let table = rep_ranges(Weight::whole(300));
        assert_eq!(table.len(), 15);
        assert_eq!(table[0], RepRange { reps: 1, weight: Weight::whole(290), percentage: 97 });
        assert_eq!(table[4], RepRange { reps: 5, weight: Weight::whole(257), percentage: 86 });
        assert_eq!(table[11], RepRange { reps: 12, weight: Weight::whole(208), percentage: 69 });
        assert_eq!(table[14], RepRange { reps: 15, weight: Weight::whole(183), percentage: 61 });
    }

    #[test]
    fn test_parse_rep_set() {
        assert_eq!("225x5".parse::<RepSet>().unwrap(), set(225, 5));
        assert_eq!(
            " 102.5X8 ".parse::<RepSet>().unwrap(),
            RepSet::new(Weight::from_milli(102_500), 8)
        );
        assert!("225".parse::<RepSet>().is_err());
        assert!("225xfive".parse::<RepSet>().is_err());
        assert_eq!("Weighted".parse::<MaxMethod>().unwrap(), MaxMethod::Weighted);
    }
}
