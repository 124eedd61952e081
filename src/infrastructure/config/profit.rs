//! `[profit]` section: pricing options and ranking weights.

use serde::Deserialize;

use crate::application::profit::{FamilyBonus, ProfitOptions};
use crate::application::rank::RankWeights;
use crate::domain::PriceSide;

/// Profit computation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfitConfig {
    /// Skip recipes where a quoted item has no buy orders.
    #[serde(default = "default_true")]
    pub skip_empty_orders: bool,
    /// Quote side used to price ingredients.
    #[serde(default)]
    pub ingredient_price: PriceSide,
    /// Quote side used to price the output.
    #[serde(default)]
    pub output_price: PriceSide,
    /// Weight of profit in the ranking score.
    #[serde(default = "default_profit_weight")]
    pub profit_weight: f64,
    /// Weight of demand in the ranking score.
    #[serde(default)]
    pub demand_weight: f64,
    /// Optional JSON report path for ranked results.
    #[serde(default)]
    pub report_path: Option<String>,
    /// Revenue multiplier for recipes using a given shard family.
    #[serde(default)]
    pub family_bonus: Option<FamilyBonusConfig>,
}

/// `[profit.family_bonus]`.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyBonusConfig {
    pub family: String,
    pub multiplier: f64,
}

const fn default_true() -> bool {
    true
}

const fn default_profit_weight() -> f64 {
    1.0
}

impl ProfitConfig {
    #[must_use]
    pub fn options(&self) -> ProfitOptions {
        ProfitOptions {
            skip_empty_orders: self.skip_empty_orders,
            ingredient_price: self.ingredient_price,
            output_price: self.output_price,
            family_bonus: self.family_bonus.as_ref().map(|bonus| FamilyBonus {
                family: bonus.family.clone(),
                multiplier: bonus.multiplier,
            }),
        }
    }

    #[must_use]
    pub fn weights(&self) -> RankWeights {
        RankWeights {
            profit: self.profit_weight,
            demand: self.demand_weight,
        }
    }
}

impl Default for ProfitConfig {
    fn default() -> Self {
        Self {
            skip_empty_orders: true,
            ingredient_price: PriceSide::default(),
            output_price: PriceSide::default(),
            profit_weight: default_profit_weight(),
            demand_weight: 0.0,
            report_path: None,
            family_bonus: None,
        }
    }
}
