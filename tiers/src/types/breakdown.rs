use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A presentation row for one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    /// "First 2000000", "Next 1000000" or "Remainder".
    pub label: String,
    /// "0 to 2000000", "2000000 to 3000000" or "Above 3000000".
    pub range: String,
    pub rate_percent: f64,
    pub amount_in_band: f64,
    /// Band fee rounded to 2 decimal places.
    pub fee: Decimal,
}

/// A labelled summary row (`Total` or `Daily Fee`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub label: String,
    /// Amount the row refers to; the daily row has none.
    pub amount: Option<f64>,
    pub fee: Decimal,
}

/// Full per-band report plus total and daily summary rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub rows: Vec<BreakdownRow>,
    pub total: SummaryRow,
    pub daily: SummaryRow,
}
