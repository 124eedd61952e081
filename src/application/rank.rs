//! Weighted ranking of profit entries.

use crate::domain::ProfitEntry;

/// Weights for combining profit and demand into a ranking score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    pub profit: f64,
    pub demand: f64,
}

impl RankWeights {
    #[must_use]
    pub const fn new(profit: f64, demand: f64) -> Self {
        Self { profit, demand }
    }

    #[must_use]
    pub fn score(&self, entry: &ProfitEntry) -> f64 {
        entry.profit * self.profit + entry.demand * self.demand
    }
}

impl Default for RankWeights {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

/// Order entries by descending score.
///
/// The sort is stable, so entries with equal scores keep their input order.
#[must_use]
pub fn rank(mut entries: Vec<ProfitEntry>, weights: RankWeights) -> Vec<ProfitEntry> {
    entries.sort_by(|a, b| weights.score(b).total_cmp(&weights.score(a)));
    entries
}
