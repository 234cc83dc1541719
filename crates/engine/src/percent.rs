//! Percentages with two fixed decimals.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EngineError, MoneyCents};

/// A percentage stored as hundredths of a percent (`15.00%` is `1500`).
///
/// Serialized as the two-decimal string `"15.00"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(i64);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);

    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Whole percent, e.g. `Percentage::whole(30)` is `30.00%`.
    #[must_use]
    pub const fn whole(percent: i64) -> Self {
        Self(percent * 100)
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// `part / whole × 100`, rounded half away from zero to two decimals.
    ///
    /// Returns `None` when `whole` is not positive.
    #[must_use]
    pub fn of(part: MoneyCents, whole: MoneyCents) -> Option<Self> {
        if !whole.is_positive() {
            return None;
        }
        let numerator = i128::from(part.cents()) * 10_000;
        let denominator = i128::from(whole.cents());
        let quotient = numerator / denominator;
        let remainder = numerator % denominator;
        let rounded = if remainder.abs() * 2 >= denominator {
            quotient + numerator.signum()
        } else {
            quotient
        };
        i64::try_from(rounded).ok().map(Self)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Percentage {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Same grammar as an amount: up to two decimals.
        s.trim_end_matches('%')
            .parse::<MoneyCents>()
            .map(|value| Self(value.cents()))
            .map_err(|_| EngineError::InvalidAmount(format!("invalid percentage: {s}")))
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_percent_of_a_thousand() {
        let pct = Percentage::of(MoneyCents::from_major(150), MoneyCents::from_major(1000));
        assert_eq!(pct.map(|p| p.to_string()).as_deref(), Some("15.00"));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 1/3 = 33.333...
        let third = Percentage::of(MoneyCents::new(1), MoneyCents::new(3)).unwrap();
        assert_eq!(third.hundredths(), 3333);
        // 1/8 = 12.5% exactly, 1/16 = 6.25%, 1/32 = 3.125% -> 3.13
        let tiny = Percentage::of(MoneyCents::new(1), MoneyCents::new(32)).unwrap();
        assert_eq!(tiny.to_string(), "3.13");
    }

    #[test]
    fn zero_or_negative_whole_has_no_percentage() {
        assert_eq!(Percentage::of(MoneyCents::new(10), MoneyCents::ZERO), None);
        assert_eq!(Percentage::of(MoneyCents::new(10), MoneyCents::new(-5)), None);
    }

    #[test]
    fn serializes_as_two_decimal_string() {
        let json = serde_json::to_string(&Percentage::from_hundredths(3500)).unwrap();
        assert_eq!(json, "\"35.00\"");
        let back: Percentage = serde_json::from_str("\"7.5\"").unwrap();
        assert_eq!(back, Percentage::from_hundredths(750));
    }
}
