//! Tier schedule: thresholds plus one more rate than thresholds.
//!
//! Every constructor and edit keeps `rates.len() == thresholds.len() + 1`, so
//! a `TierSchedule` can always be handed to the calculator. Ordering of the
//! thresholds is left to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::calculator::allocate;
use crate::error::{Result, TierError};
use crate::types::FeeAllocation;
use crate::utils::{ensure_finite, ensure_shape, parse_values};

/// Threshold step used when a tier is appended.
pub const DEFAULT_TIER_INCREMENT: f64 = 1_000_000.0;

/// Rate given to a newly appended tier, in percent.
pub const DEFAULT_NEW_TIER_RATE: f64 = 0.0;

/// Ordered absolute thresholds and percentage rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSchedule {
    thresholds: Vec<f64>,
    rates: Vec<f64>,
}

/// Unvalidated wire form; deserialization goes through [`TierSchedule::new`].
#[derive(Deserialize)]
struct RawSchedule {
    thresholds: Vec<f64>,
    rates: Vec<f64>,
}

impl<'de> Deserialize<'de> for TierSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSchedule::deserialize(deserializer)?;
        Self::new(raw.thresholds, raw.rates).map_err(serde::de::Error::custom)
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            thresholds: vec![2_000_000.0, 3_000_000.0],
            rates: vec![1.25, 1.00, 0.75],
        }
    }
}

impl TierSchedule {
    /// Build a schedule from absolute thresholds and percentage rates.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `rates.len() != thresholds.len() + 1`;
    /// `InvalidInput` for any non-finite value.
    pub fn new(thresholds: Vec<f64>, rates: Vec<f64>) -> Result<Self> {
        ensure_shape(thresholds.len(), rates.len())?;
        ensure_finite("threshold", &thresholds)?;
        ensure_finite("rate", &rates)?;
        Ok(Self { thresholds, rates })
    }

    /// Build a schedule from textual inputs.
    pub fn parse<T, R>(thresholds: &[T], rates: &[R]) -> Result<Self>
    where
        T: AsRef<str>,
        R: AsRef<str>,
    {
        ensure_shape(thresholds.len(), rates.len())?;
        Self::new(
            parse_values("threshold", thresholds)?,
            parse_values("rate", rates)?,
        )
    }

    /// Build a schedule from tier sizes: the first tier's size followed by
    /// each "next" tier's size. Thresholds are the running sums.
    pub fn from_increments(increments: &[f64], rates: Vec<f64>) -> Result<Self> {
        ensure_finite("threshold", increments)?;
        let thresholds = increments
            .iter()
            .scan(0.0, |acc, inc| {
                *acc += inc;
                Some(*acc)
            })
            .collect();
        Self::new(thresholds, rates)
    }

    /// Parse a schedule from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let schedule: Self = serde_json::from_str(json)?;
        debug!(
            tiers = schedule.thresholds.len(),
            "loaded tier schedule from JSON"
        );
        Ok(schedule)
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Rate of the band above the highest threshold.
    pub fn remainder_rate(&self) -> f64 {
        self.rates[self.thresholds.len()]
    }

    /// Number of bands, including the remainder band.
    pub fn band_count(&self) -> usize {
        self.rates.len()
    }

    /// Tier sizes: the first threshold, then the gap to each next threshold.
    pub fn increments(&self) -> Vec<f64> {
        let mut prev = 0.0;
        self.thresholds
            .iter()
            .map(|&t| {
                let inc = t - prev;
                prev = t;
                inc
            })
            .collect()
    }

    /// Append a tier [`DEFAULT_TIER_INCREMENT`] above the current highest
    /// threshold with a zero rate. The remainder rate stays last.
    pub fn push_tier(&mut self) {
        let last = self.thresholds.last().copied().unwrap_or(0.0);
        let threshold = last + DEFAULT_TIER_INCREMENT;
        self.thresholds.push(threshold);
        let remainder_idx = self.rates.len() - 1;
        self.rates.insert(remainder_idx, DEFAULT_NEW_TIER_RATE);
        debug!(threshold, tiers = self.thresholds.len(), "tier added");
    }

    /// Remove tier `index` together with its rate.
    ///
    /// # Errors
    ///
    /// `TierNotRemovable` for the first tier and for indices past the last
    /// threshold (the remainder band cannot be removed).
    pub fn remove_tier(&mut self, index: usize) -> Result<()> {
        if index == 0 || index >= self.thresholds.len() {
            return Err(TierError::TierNotRemovable(index));
        }
        let threshold = self.thresholds.remove(index);
        self.rates.remove(index);
        debug!(index, threshold, tiers = self.thresholds.len(), "tier removed");
        Ok(())
    }

    /// Allocate `amount` against this schedule.
    pub fn allocate(&self, amount: f64) -> Result<FeeAllocation> {
        allocate(amount, &self.thresholds, &self.rates)
    }
}
