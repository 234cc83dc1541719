//! Assets and their distribution by category.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, Percentage, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    Property,
    Vehicle,
    Stocks,
    Savings,
    Others,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Property,
        AssetCategory::Vehicle,
        AssetCategory::Stocks,
        AssetCategory::Savings,
        AssetCategory::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Property => "Property",
            AssetCategory::Vehicle => "Vehicle",
            AssetCategory::Stocks => "Stocks",
            AssetCategory::Savings => "Savings",
            AssetCategory::Others => "Others",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::InvalidName(format!("unknown asset category: {s}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: AssetCategory,
    pub value: MoneyCents,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        category: AssetCategory,
        value: MoneyCents,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id,
            user_id,
            category,
            value: value.ensure_positive("asset value")?,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetShare {
    pub category: AssetCategory,
    pub value: MoneyCents,
    pub share: Percentage,
}

/// Total value per category with its share of the grand total; categories
/// without assets are left out.
pub fn asset_distribution(assets: &[Asset]) -> Vec<AssetShare> {
    let total: MoneyCents = assets.iter().map(|a| a.value).sum();
    AssetCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let value: MoneyCents = assets
                .iter()
                .filter(|a| a.category == category)
                .map(|a| a.value)
                .sum();
            if value.is_zero() {
                return None;
            }
            Some(AssetShare {
                category,
                value,
                share: Percentage::of(value, total).unwrap_or(Percentage::ZERO),
            })
        })
        .collect()
}
