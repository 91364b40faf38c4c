use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::warmup_error::WarmupError;

/// Thousandths of a unit per unit.
const SCALE: u32 = 1000;

/// A non-negative load stored as thousandths of a unit (kg or lb, the crate
/// does not care which).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Weight(u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);
    pub const FIVE: Weight = Weight::whole(5);

    #[must_use]
    pub const fn from_milli(milli: u32) -> Self {
        Weight(milli)
    }

    #[must_use]
    pub const fn whole(units: u32) -> Self {
        Weight(units * SCALE)
    }

    /// Negative and non-finite values clamp to zero.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Weight::ZERO;
        }
        Weight((value * f64::from(SCALE)).round().min(f64::from(u32::MAX)) as u32)
    }

    #[must_use]
    pub fn milli(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(SCALE)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn saturating_sub(self, other: Weight) -> Weight {
        Weight(self.0.saturating_sub(other.0))
    }

    #[must_use]
    pub fn abs_diff(self, other: Weight) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// `floor(self / plate)`; zero for a zero plate.
    #[must_use]
    pub fn fits(self, plate: Weight) -> u32 {
        self.0.checked_div(plate.0).unwrap_or(0)
    }

    #[must_use]
    pub fn divide(self, parts: u32) -> Weight {
        Weight(self.0.checked_div(parts).unwrap_or(0))
    }

    /// `self * pct / 100`, exact to the thousandth.
    #[must_use]
    pub fn percent(self, pct: u32) -> Weight {
        let scaled = div_round(u64::from(self.0) * u64::from(pct), 100);
        Weight(u32::try_from(scaled).unwrap_or(u32::MAX))
    }

    /// Nearest multiple of `step`, halves rounding away from zero.
    #[must_use]
    pub fn round_to(self, step: Weight) -> Weight {
        if step.is_zero() {
            return self;
        }
        let steps = div_round(u64::from(self.0), u64::from(step.0));
        Weight(u32::try_from(steps * u64::from(step.0)).unwrap_or(u32::MAX))
    }

    /// `self * num / den` to the nearest multiple of `step`, rounded once from
    /// the exact quotient. Zero for a zero denominator or step.
    #[must_use]
    pub fn scale_to(self, num: u32, den: u32, step: Weight) -> Weight {
        let divisor = u64::from(den) * u64::from(step.0);
        if divisor == 0 {
            return Weight::ZERO;
        }
        let steps = div_round(u64::from(self.0) * u64::from(num), divisor);
        Weight(u32::try_from(steps * u64::from(step.0)).unwrap_or(u32::MAX))
    }

    /// `round(self * num / den)` in whole units.
    #[must_use]
    pub fn scale_whole(self, num: u32, den: u32) -> Weight {
        self.scale_to(num, den, Weight::whole(1))
    }

    /// `round(self * num / den + offset)` in whole units, rounded once.
    #[must_use]
    pub fn scale_whole_plus(self, num: u32, den: u32, offset: Weight) -> Weight {
        if den == 0 {
            return Weight::ZERO;
        }
        let numerator = u64::from(self.0) * u64::from(num) + u64::from(offset.0) * u64::from(den);
        let units = div_round(numerator, u64::from(den) * u64::from(SCALE));
        Weight(u32::try_from(units * u64::from(SCALE)).unwrap_or(u32::MAX))
    }

    /// `round(self * pct / 100)` in whole units.
    #[must_use]
    pub fn percent_whole(self, pct: u32) -> Weight {
        self.scale_whole(pct, 100)
    }

    /// `round(self / of * 100)`; zero when `of` is zero.
    #[must_use]
    pub fn percent_of(self, of: Weight) -> u32 {
        if of.is_zero() {
            return 0;
        }
        u32::try_from(div_round(u64::from(self.0) * 100, u64::from(of.0))).unwrap_or(u32::MAX)
    }
}

fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Self) -> Self::Output {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Weight {
    type Output = Weight;

    fn mul(self, rhs: u32) -> Self::Output {
        Weight(self.0.saturating_mul(rhs))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::ZERO, |acc, weight| acc + weight)
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / SCALE;
        let fraction = self.0 % SCALE;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{fraction:03}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for Weight {
    type Err = WarmupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f64>()
            .map_err(|_| WarmupError::InvalidWeight(s.to_owned()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(WarmupError::InvalidWeight(s.to_owned()));
        }
        Ok(Weight::from_f64(value))
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0.0 {
            return Err(de::Error::custom(format!("invalid weight {value}")));
        }
        Ok(Weight::from_f64(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("225".parse::<Weight>().unwrap(), Weight::whole(225));
        assert_eq!("2.5".parse::<Weight>().unwrap(), Weight::from_milli(2500));
        assert_eq!(Weight::from_milli(112_500).to_string(), "112.5");
        assert_eq!(Weight::from_milli(250).to_string(), "0.25");
        assert_eq!(Weight::whole(45).to_string(), "45");
        assert!("abc".parse::<Weight>().is_err());
        assert!("-5".parse::<Weight>().is_err());
    }

    #[test]
    fn test_percent_rounds_half_away_from_zero() {
        let target = Weight::whole(225);
        assert_eq!(target.percent_whole(50), Weight::whole(113));
        assert_eq!(target.percent_whole(70), Weight::whole(158));
        assert_eq!(target.percent_whole(90), Weight::whole(203));
    }

    #[test]
    fn test_percent_whole_rounds_once() {
        // 50.4995 must not become 50.5 and then 51
        assert_eq!(Weight::from_milli(100_999).percent_whole(50), Weight::whole(50));
        assert_eq!(Weight::whole(225).percent_whole(50), Weight::whole(113));
        assert_eq!(
            Weight::from_milli(10_999).scale_whole_plus(50, 100, Weight::from_milli(150_000)),
            Weight::whole(155)
        );
        assert_eq!(Weight::whole(200).scale_whole(36, 27), Weight::whole(267));
        assert_eq!(Weight::whole(10).scale_whole(1, 0), Weight::ZERO);
        assert_eq!(Weight::whole(183).scale_to(110, 100, Weight::FIVE), Weight::whole(200));
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(Weight::from_milli(112_500).round_to(Weight::FIVE), Weight::whole(115));
        assert_eq!(Weight::from_milli(112_499).round_to(Weight::FIVE), Weight::whole(110));
        assert_eq!(Weight::whole(7).round_to(Weight::ZERO), Weight::whole(7));
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(Weight::from_f64(-3.0), Weight::ZERO);
        assert_eq!(Weight::from_f64(f64::NAN), Weight::ZERO);
        assert_eq!(Weight::whole(10).saturating_sub(Weight::whole(20)), Weight::ZERO);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(Weight::whole(45).percent_of(Weight::whole(225)), 20);
        assert_eq!(Weight::whole(45).percent_of(Weight::ZERO), 0);
    }
}
