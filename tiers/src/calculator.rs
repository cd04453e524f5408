//! Tiered fee allocation.
//!
//! Splits an amount into bands bounded by ascending absolute thresholds and
//! applies each band's percentage rate to the part of the amount inside it.
//! The band above the last threshold (the remainder band) takes the final
//! rate.
//!
//! Threshold ordering is not checked. Out-of-order thresholds flow through
//! the arithmetic unchanged and may yield negative band amounts.

use crate::error::Result;
use crate::types::{FeeAllocation, TierResult};
use crate::utils::{ensure_finite, ensure_shape, parse_values};

/// Allocate `amount` across the bands defined by `thresholds` and `rates`.
///
/// `rates` are percentages and must hold exactly one more entry than
/// `thresholds`. The returned allocation always has `thresholds.len() + 1`
/// bands, including bands the amount never reaches.
///
/// # Errors
///
/// Returns `TierError::ShapeMismatch` if the rate count is wrong, checked
/// before any arithmetic. Returns `TierError::InvalidInput` if the amount or
/// any threshold or rate is NaN or infinite.
pub fn allocate(amount: f64, thresholds: &[f64], rates: &[f64]) -> Result<FeeAllocation> {
    ensure_shape(thresholds.len(), rates.len())?;
    ensure_finite("amount", &[amount])?;
    ensure_finite("threshold", thresholds)?;
    ensure_finite("rate", rates)?;

    let mut bands = Vec::with_capacity(rates.len());
    let mut total_fee = 0.0;
    let mut prev = 0.0;

    for (index, (&current, &rate_percent)) in thresholds.iter().zip(rates).enumerate() {
        let rate = rate_percent / 100.0;
        let (amount_in_band, fee_in_band) = if amount > prev {
            let band_amount = amount.min(current) - prev;
            (band_amount, band_amount * rate)
        } else {
            (0.0, 0.0)
        };
        total_fee += fee_in_band;

        bands.push(TierResult {
            index,
            lower_bound: prev,
            upper_bound: Some(current),
            rate_percent,
            amount_in_band,
            fee_in_band,
        });

        prev = current;
    }

    // Shape check above guarantees the remainder rate exists.
    let remainder_percent = rates[thresholds.len()];
    let (amount_in_band, fee_in_band) = if amount > prev {
        let band_amount = amount - prev;
        (band_amount, band_amount * (remainder_percent / 100.0))
    } else {
        (0.0, 0.0)
    };
    total_fee += fee_in_band;

    bands.push(TierResult {
        index: thresholds.len(),
        lower_bound: prev,
        upper_bound: None,
        rate_percent: remainder_percent,
        amount_in_band,
        fee_in_band,
    });

    Ok(FeeAllocation { total_fee, bands })
}

/// Parse textual thresholds and rates, then [`allocate`].
///
/// The shape is checked on the raw lists first, so a wrong rate count is
/// reported as `ShapeMismatch` even when some values are also unparsable.
pub fn allocate_raw<T, R>(amount: f64, thresholds: &[T], rates: &[R]) -> Result<FeeAllocation>
where
    T: AsRef<str>,
    R: AsRef<str>,
{
    ensure_shape(thresholds.len(), rates.len())?;
    let thresholds = parse_values("threshold", thresholds)?;
    let rates = parse_values("rate", rates)?;
    allocate(amount, &thresholds, &rates)
}
