use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{bar::Bar, scheme::Scheme, warmup_error::WarmupError, weight::Weight};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Equipment {
    #[default]
    Barbell,
    Dumbbell,
    WeightedBodyweight,
}

/// Whether the lift is trained before or after the rest of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionTiming {
    #[default]
    Pre,
    Post,
}

impl Equipment {
    /// The scheme picked for this equipment at this point of the session.
    #[must_use]
    pub fn auto_scheme(&self, timing: SessionTiming) -> Scheme {
        match (self, timing) {
            (Equipment::WeightedBodyweight, _) => Scheme::WeightedBodyweight,
            (Equipment::Dumbbell, SessionTiming::Pre) => Scheme::DumbbellPreClimbing,
            (Equipment::Dumbbell, SessionTiming::Post) => Scheme::DumbbellPostClimbing,
            (Equipment::Barbell, SessionTiming::Post) => Scheme::StandardPyramid,
            (Equipment::Barbell, SessionTiming::Pre) => Scheme::PercentageBased,
        }
    }

    /// Only a barbell has plates worth shuffling between sets.
    #[must_use]
    pub fn supports_plate_minimization(&self) -> bool {
        matches!(self, Equipment::Barbell)
    }

    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        matches!(self, Equipment::WeightedBodyweight)
    }

    /// The implement the working weight is stepped along. Weighted
    /// bodyweight targets are added load on a single stack.
    #[must_use]
    pub fn stepping_bar(&self, bar_weight: Weight) -> Bar {
        match self {
            Equipment::WeightedBodyweight => Bar::single_stack(Weight::ZERO),
            Equipment::Barbell | Equipment::Dumbbell => Bar::barbell(bar_weight),
        }
    }
}

impl Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Equipment::Barbell => write!(f, "Barbell"),
            Equipment::Dumbbell => write!(f, "Dumbbell"),
            Equipment::WeightedBodyweight => write!(f, "Weighted bodyweight"),
        }
    }
}

impl FromStr for Equipment {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "b" | "barbell" => Ok(Equipment::Barbell),
            "d" | "dumbbell" => Ok(Equipment::Dumbbell),
            "w" | "bodyweight" | "weightedbodyweight" => Ok(Equipment::WeightedBodyweight),
            _ => Err(WarmupError::UnknownEquipment(s.to_owned())),
        }
    }
}

impl FromStr for SessionTiming {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pre" => Ok(SessionTiming::Pre),
            "post" => Ok(SessionTiming::Post),
            _ => Err(WarmupError::UnknownSessionTiming(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_bar() {
        let bar = Equipment::WeightedBodyweight.stepping_bar(Weight::whole(45));
        assert_eq!(bar, Bar::single_stack(Weight::ZERO));
        assert_eq!(
            Equipment::Barbell.stepping_bar(Weight::whole(35)),
            Bar::barbell(Weight::whole(35))
        );
    }

    #[test]
    fn test_auto_scheme() {
        assert_eq!(
            Equipment::Barbell.auto_scheme(SessionTiming::Pre),
            Scheme::PercentageBased
        );
        assert_eq!(
            Equipment::Barbell.auto_scheme(SessionTiming::Post),
            Scheme::StandardPyramid
        );
        assert_eq!(
            Equipment::Dumbbell.auto_scheme(SessionTiming::Post),
            Scheme::DumbbellPostClimbing
        );
        assert_eq!(
            Equipment::WeightedBodyweight.auto_scheme(SessionTiming::Post),
            Scheme::WeightedBodyweight
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("d".parse::<Equipment>().unwrap(), Equipment::Dumbbell);
        assert_eq!(
            "weightedBodyweight".parse::<Equipment>().unwrap(),
            Equipment::WeightedBodyweight
        );
        assert!("kettlebell".parse::<Equipment>().is_err());
        assert_eq!("POST".parse::<SessionTiming>().unwrap(), SessionTiming::Post);
    }
}
