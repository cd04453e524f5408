//! Subcommand runners.
//!
//! Each runner resolves its inputs, computes everything, and only then
//! writes to stdout, so a failed run prints nothing.

use std::io::{self, BufWriter};

use tracing::info;

use crate::cli::{CalculateArgs, ScheduleArgs};
use crate::config::{self, CalculatorConfig};
use crate::error::CliError;
use crate::output;

/// Build the run configuration for `calculate`.
pub fn calculator_config(args: &CalculateArgs) -> Result<CalculatorConfig, CliError> {
    let schedule = config::resolve_schedule(&args.source, config::schedule_path_from_env())?;
    Ok(CalculatorConfig {
        amount: args.amount,
        schedule,
        json: args.json,
    })
}

/// Allocate the amount over the schedule and print the breakdown.
pub fn run_calculate(args: &CalculateArgs) -> Result<(), CliError> {
    let cfg = calculator_config(args)?;
    let allocation = cfg.schedule.allocate(cfg.amount)?;

    info!(
        amount = cfg.amount,
        bands = allocation.bands.len(),
        annual_fee = allocation.total_fee,
        daily_fee = tiers::daily_fee(allocation.total_fee),
        "fees calculated"
    );

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);
    let mut buf = String::with_capacity(512);
    output::write_calculation(cfg.amount, &allocation, cfg.json, &mut buf, &mut writer)
}

/// Print the schedule after applying any requested edits.
pub fn run_schedule(args: &ScheduleArgs) -> Result<(), CliError> {
    let mut schedule = config::resolve_schedule(&args.source, config::schedule_path_from_env())?;

    if let Some(index) = args.remove_tier {
        schedule.remove_tier(index)?;
    }
    if args.add_tier {
        schedule.push_tier();
    }

    info!(tiers = schedule.thresholds().len(), "schedule ready");

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);
    let mut buf = String::with_capacity(256);
    output::write_schedule(&schedule, args.json, &mut buf, &mut writer)
}
