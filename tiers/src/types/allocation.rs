use serde::{Deserialize, Serialize};

/// One band of a fee allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResult {
    /// Band position; the remainder band is `thresholds.len()`.
    pub index: usize,
    pub lower_bound: f64,
    /// `None` for the unbounded remainder band.
    pub upper_bound: Option<f64>,
    /// Rate as entered, in percent (`1.25` means 1.25%).
    pub rate_percent: f64,
    pub amount_in_band: f64,
    pub fee_in_band: f64,
}

impl TierResult {
    pub fn is_remainder(&self) -> bool {
        self.upper_bound.is_none()
    }
}

/// Result of applying an amount to a tier schedule.
///
/// `bands` always holds one entry per threshold plus the remainder band, in
/// band order. `total_fee` is the running sum of `fee_in_band` in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAllocation {
    pub total_fee: f64,
    pub bands: Vec<TierResult>,
}

impl FeeAllocation {
    /// Bands that received a non-zero share of the amount.
    pub fn active_bands(&self) -> impl Iterator<Item = &TierResult> {
        self.bands.iter().filter(|b| b.amount_in_band != 0.0)
    }
}
