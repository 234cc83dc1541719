//! What-if growth of money currently spent on unnecessary categories.

use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// Annual growth assumed for a NIFTY 50 index fund.
pub const NIFTY_50_RATE: f64 = 0.12;
/// Annual growth assumed for a fixed deposit.
pub const FIXED_DEPOSIT_RATE: f64 = 0.08;
pub const PROJECTION_YEARS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub nifty_50: MoneyCents,
    pub fixed_deposit: MoneyCents,
}

fn compound(principal: MoneyCents, rate: f64, year: u32) -> MoneyCents {
    let grown = principal.to_major_f64() * (1.0 + rate).powi(year as i32);
    MoneyCents::from_major(grown.round() as i64)
}

/// Yearly compounded value of `principal` for years `1..=years`, rounded to
/// whole units. A non-positive principal projects nothing.
pub fn project_savings(principal: MoneyCents, years: u32) -> Vec<ProjectionPoint> {
    if !principal.is_positive() {
        return Vec::new();
    }
    (1..=years)
        .map(|year| ProjectionPoint {
            year,
            nifty_50: compound(principal, NIFTY_50_RATE, year),
            fixed_deposit: compound(principal, FIXED_DEPOSIT_RATE, year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compounds_yearly() {
        let points = project_savings(MoneyCents::from_major(1000), PROJECTION_YEARS);
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].nifty_50, MoneyCents::from_major(1120));
        assert_eq!(points[0].fixed_deposit, MoneyCents::from_major(1080));
        // 1000 * 1.12^2 = 1254.4
        assert_eq!(points[1].nifty_50, MoneyCents::from_major(1254));
        // 1000 * 1.08^10 = 2158.92...
        assert_eq!(points[9].fixed_deposit, MoneyCents::from_major(2159));
    }

    #[test]
    fn zero_principal_projects_nothing() {
        assert!(project_savings(MoneyCents::ZERO, PROJECTION_YEARS).is_empty());
    }
}
