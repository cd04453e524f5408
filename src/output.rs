use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;
use tiers::report::{tier_label, tier_range};
use tiers::{Breakdown, FeeAllocation, TierSchedule};

use crate::error::CliError;

/// TSV header for the fee breakdown.
const BREAKDOWN_HEADER: &str = "Tier\tRange\tRate (%)\tAmount in Tier\tFee";

/// TSV header for a schedule listing.
const SCHEDULE_HEADER: &str = "Tier\tRange\tIncrement\tRate (%)";

/// JSON document for `calculate --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationReport<'a> {
    amount: f64,
    annual_fee: f64,
    daily_fee: f64,
    allocation: &'a FeeAllocation,
    breakdown: &'a Breakdown,
}

/// JSON document for `schedule --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleReport<'a> {
    thresholds: &'a [f64],
    rates: &'a [f64],
    increments: Vec<f64>,
    labels: Vec<String>,
}

/// Render a calculation and write it to the writer in one piece.
///
/// TSV: one row per band, then `Total` and `Daily Fee` rows.
pub fn write_calculation<W: Write>(
    amount: f64,
    allocation: &FeeAllocation,
    json_mode: bool,
    buf: &mut String,
    writer: &mut W,
) -> Result<(), CliError> {
    let breakdown = Breakdown::from_allocation(amount, allocation)?;

    buf.clear();

    if json_mode {
        let report = CalculationReport {
            amount,
            annual_fee: allocation.total_fee,
            daily_fee: tiers::daily_fee(allocation.total_fee),
            allocation,
            breakdown: &breakdown,
        };
        buf.push_str(&serde_json::to_string(&report)?);
        buf.push('\n');
    } else {
        buf.push_str(BREAKDOWN_HEADER);
        buf.push('\n');
        for row in &breakdown.rows {
            buf.push_str(&row.label);
            buf.push('\t');
            buf.push_str(&row.range);
            buf.push('\t');
            format_f64(buf, row.rate_percent);
            buf.push('\t');
            format_f64(buf, row.amount_in_band);
            buf.push('\t');
            let _ = write!(buf, "{:.2}", row.fee);
            buf.push('\n');
        }

        // Total \t \t \t amount \t fee
        buf.push_str(&breakdown.total.label);
        buf.push_str("\t\t\t");
        if let Some(total_amount) = breakdown.total.amount {
            format_f64(buf, total_amount);
        }
        let _ = writeln!(buf, "\t{:.2}", breakdown.total.fee);

        buf.push_str(&breakdown.daily.label);
        buf.push_str("\t\t\t\t");
        let _ = writeln!(buf, "{:.2}", breakdown.daily.fee);
    }

    writer.write_all(buf.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Render a schedule listing: label, range, tier size and rate per tier.
pub fn write_schedule<W: Write>(
    schedule: &TierSchedule,
    json_mode: bool,
    buf: &mut String,
    writer: &mut W,
) -> Result<(), CliError> {
    let increments = schedule.increments();
    let bounds = tier_bounds(schedule);

    buf.clear();

    if json_mode {
        let report = ScheduleReport {
            thresholds: schedule.thresholds(),
            rates: schedule.rates(),
            labels: bounds
                .iter()
                .enumerate()
                .map(|(i, &(lower, upper))| tier_label(i, lower, upper))
                .collect(),
            increments,
        };
        buf.push_str(&serde_json::to_string(&report)?);
        buf.push('\n');
    } else {
        buf.push_str(SCHEDULE_HEADER);
        buf.push('\n');
        for (i, (&(lower, upper), &rate)) in bounds.iter().zip(schedule.rates()).enumerate() {
            buf.push_str(&tier_label(i, lower, upper));
            buf.push('\t');
            buf.push_str(&tier_range(lower, upper));
            buf.push('\t');
            // The remainder band has no size.
            if let Some(inc) = increments.get(i) {
                format_f64(buf, *inc);
            }
            buf.push('\t');
            format_f64(buf, rate);
            buf.push('\n');
        }
    }

    writer.write_all(buf.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// `(lower, upper)` per tier; the remainder tier has no upper bound.
fn tier_bounds(schedule: &TierSchedule) -> Vec<(f64, Option<f64>)> {
    let mut prev = 0.0;
    let mut bounds: Vec<(f64, Option<f64>)> = schedule
        .thresholds()
        .iter()
        .map(|&t| {
            let b = (prev, Some(t));
            prev = t;
            b
        })
        .collect();
    bounds.push((prev, None));
    bounds
}

/// Fast f64 formatting via `ryu`.
fn format_f64(buf: &mut String, val: f64) {
    let mut b = ryu::Buffer::new();
    buf.push_str(b.format(val));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_calc(amount: f64, schedule: &TierSchedule, json: bool) -> String {
        let alloc = schedule.allocate(amount).unwrap();
        let mut buf = String::new();
        let mut out = Vec::new();
        write_calculation(amount, &alloc, json, &mut buf, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tsv_breakdown() {
        let text = render_calc(10_000_000.0, &TierSchedule::default(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], BREAKDOWN_HEADER);
        assert_eq!(lines[1], "First 2000000\t0 to 2000000\t1.25\t2000000.0\t25000.00");
        assert_eq!(lines[2], "Next 1000000\t2000000 to 3000000\t1.0\t1000000.0\t10000.00");
        assert_eq!(lines[3], "Remainder\tAbove 3000000\t0.75\t7000000.0\t52500.00");
        assert_eq!(lines[4], "Total\t\t\t10000000.0\t87500.00");
        assert_eq!(lines[5], "Daily Fee\t\t\t\t239.73");
    }

    #[test]
    fn test_tsv_keeps_unreached_bands() {
        let text = render_calc(1_000_000.0, &TierSchedule::default(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "Next 1000000\t2000000 to 3000000\t1.0\t0.0\t0.00");
        assert_eq!(lines[4], "Total\t\t\t1000000.0\t12500.00");
    }

    #[test]
    fn test_json_calculation() {
        let text = render_calc(500_000.0, &TierSchedule::new(vec![], vec![2.0]).unwrap(), true);
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["amount"], 500_000.0);
        assert!((value["annualFee"].as_f64().unwrap() - 10_000.0).abs() < 1e-6);
        assert_eq!(value["allocation"]["bands"].as_array().unwrap().len(), 1);
        assert_eq!(value["breakdown"]["rows"][0]["label"], "Remainder");
        assert_eq!(value["breakdown"]["total"]["fee"], "10000.00");
    }

    #[test]
    fn test_unroundable_fee_writes_nothing() {
        let schedule = TierSchedule::new(vec![], vec![1.0]).unwrap();
        let alloc = schedule.allocate(1e31).unwrap();
        let mut buf = String::new();
        let mut out = Vec::new();
        let err = write_calculation(1e31, &alloc, false, &mut buf, &mut out).unwrap_err();
        assert!(matches!(
            err,
            CliError::Tier(tiers::TierError::FeeOutOfRange(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_tsv_schedule() {
        let mut buf = String::new();
        let mut out = Vec::new();
        write_schedule(&TierSchedule::default(), false, &mut buf, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], SCHEDULE_HEADER);
        assert_eq!(lines[1], "First 2000000\t0 to 2000000\t2000000.0\t1.25");
        assert_eq!(lines[2], "Next 1000000\t2000000 to 3000000\t1000000.0\t1.0");
        assert_eq!(lines[3], "Remainder\tAbove 3000000\t\t0.75");
    }

    #[test]
    fn test_json_schedule() {
        let mut buf = String::new();
        let mut out = Vec::new();
        write_schedule(&TierSchedule::default(), true, &mut buf, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["labels"][1], "Next 1000000");
        assert_eq!(value["increments"][1], 1_000_000.0);
        assert_eq!(value["rates"].as_array().unwrap().len(), 3);
    }
}
