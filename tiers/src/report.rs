//! Presentation rows built from a [`FeeAllocation`].
//!
//! Uses `rust_decimal::Decimal` for the 2 dp fee rounding so the rendered
//! values do not depend on float-to-string behaviour.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{Result, TierError};
use crate::types::{Breakdown, BreakdownRow, FeeAllocation, SummaryRow, TierResult};
use crate::utils::plain_number;

/// Fixed divisor for the daily accrual. No calendar or leap-year logic.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Decimal places kept in rendered fees.
pub const FEE_DECIMALS: u32 = 2;

/// Daily accrual of an annual fee.
pub fn daily_fee(annual_fee: f64) -> f64 {
    annual_fee / DAYS_PER_YEAR
}

/// Round a fee to [`FEE_DECIMALS`] places, half to even, on the exact
/// binary value of `fee` (`2.675` rounds to `2.67`).
///
/// The result always carries exactly [`FEE_DECIMALS`] places (`10000.00`).
///
/// # Errors
///
/// Returns `TierError::FeeOutOfRange` if `fee` is NaN, infinite, or too
/// large for a `Decimal`.
pub fn round_fee(fee: f64) -> Result<Decimal> {
    let mut rounded = Decimal::from_f64_retain(fee)
        .ok_or(TierError::FeeOutOfRange(fee))?
        .round_dp(FEE_DECIMALS);
    rounded.rescale(FEE_DECIMALS);
    Ok(rounded)
}

/// Label for a tier: "First X", "Next Y" or "Remainder" (`upper` is `None`).
pub fn tier_label(index: usize, lower: f64, upper: Option<f64>) -> String {
    match upper {
        None => "Remainder".to_string(),
        Some(upper) if index == 0 => format!("First {}", plain_number(upper)),
        Some(upper) => format!("Next {}", plain_number(upper - lower)),
    }
}

/// Range description for a tier: "0 to X", "X to Y" or "Above Y".
pub fn tier_range(lower: f64, upper: Option<f64>) -> String {
    match upper {
        None => format!("Above {}", plain_number(lower)),
        Some(upper) => format!("{} to {}", plain_number(lower), plain_number(upper)),
    }
}

pub fn band_label(band: &TierResult) -> String {
    tier_label(band.index, band.lower_bound, band.upper_bound)
}

pub fn band_range(band: &TierResult) -> String {
    tier_range(band.lower_bound, band.upper_bound)
}

impl Breakdown {
    /// Build the full report: one row per band, then total and daily rows.
    ///
    /// Every band gets a row, including bands the amount never reached.
    ///
    /// # Errors
    ///
    /// Returns `TierError::FeeOutOfRange` if any band fee, the total or the
    /// daily fee cannot be rounded. No partial report is produced.
    pub fn from_allocation(amount: f64, allocation: &FeeAllocation) -> Result<Self> {
        let rows = allocation
            .bands
            .iter()
            .map(|band| {
                Ok(BreakdownRow {
                    label: band_label(band),
                    range: band_range(band),
                    rate_percent: band.rate_percent,
                    amount_in_band: band.amount_in_band,
                    fee: round_fee(band.fee_in_band)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rows,
            total: SummaryRow {
                label: "Total".to_string(),
                amount: Some(amount),
                fee: round_fee(allocation.total_fee)?,
            },
            daily: SummaryRow {
                label: "Daily Fee".to_string(),
                amount: None,
                fee: round_fee(daily_fee(allocation.total_fee))?,
            },
        })
    }
}
