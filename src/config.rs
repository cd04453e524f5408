//! Calculator configuration.
//!
//! The schedule is resolved in layers: the built-in default, replaced by a
//! JSON schedule file when one is given (`--schedule` or
//! `TIERFEE_SCHEDULE`), with `--thresholds` / `--rates` overriding the
//! matching list from that base.

use std::path::{Path, PathBuf};

use tiers::TierSchedule;
use tracing::{debug, info};

use crate::cli::ScheduleSource;
use crate::error::CliError;

/// Environment variable naming a default JSON schedule file.
pub const SCHEDULE_ENV: &str = "TIERFEE_SCHEDULE";

/// Amount used when none is given.
pub const DEFAULT_AMOUNT: f64 = 10_000_000.0;

/// Everything one `calculate` run needs.
///
/// Use [`Default::default()`] for the stock schedule and amount.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Amount to charge fees on.
    pub amount: f64,
    /// Tier thresholds and rates.
    pub schedule: TierSchedule,
    /// Emit JSON instead of TSV.
    pub json: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            schedule: TierSchedule::default(),
            json: false,
        }
    }
}

/// Schedule file path from the environment (after `.env` has been loaded).
pub fn schedule_path_from_env() -> Option<PathBuf> {
    std::env::var_os(SCHEDULE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve the schedule for a run.
///
/// `env_path` is the fallback file used when `--schedule` is absent.
///
/// # Errors
///
/// Returns [`CliError::ScheduleFile`] if the file cannot be read, and
/// [`CliError::Tier`] for unparsable values or a rates/thresholds length
/// mismatch.
pub fn resolve_schedule(
    source: &ScheduleSource,
    env_path: Option<PathBuf>,
) -> Result<TierSchedule, CliError> {
    let base = match source.schedule.clone().or(env_path) {
        Some(path) => load_schedule_file(&path)?,
        None => TierSchedule::default(),
    };

    if source.thresholds.is_none() && source.rates.is_none() {
        return Ok(base);
    }

    // Shape is checked on the raw lists so a mismatch wins over bad values.
    let threshold_count = source
        .thresholds
        .as_ref()
        .map_or(base.thresholds().len(), Vec::len);
    let rate_count = source.rates.as_ref().map_or(base.rates().len(), Vec::len);
    tiers::utils::ensure_shape(threshold_count, rate_count)?;

    let thresholds = match &source.thresholds {
        Some(raw) => tiers::utils::parse_values("threshold", raw)?,
        None if source.increments => base.increments(),
        None => base.thresholds().to_vec(),
    };
    let rates = match &source.rates {
        Some(raw) => tiers::utils::parse_values("rate", raw)?,
        None => base.rates().to_vec(),
    };

    let schedule = if source.increments {
        TierSchedule::from_increments(&thresholds, rates)?
    } else {
        TierSchedule::new(thresholds, rates)?
    };
    debug!(
        thresholds = ?schedule.thresholds(),
        rates = ?schedule.rates(),
        "schedule resolved from arguments"
    );
    Ok(schedule)
}

fn load_schedule_file(path: &Path) -> Result<TierSchedule, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::ScheduleFile {
        path: path.to_path_buf(),
        source,
    })?;
    let schedule = TierSchedule::from_json(&json)?;
    info!(path = %path.display(), tiers = schedule.thresholds().len(), "schedule file loaded");
    Ok(schedule)
}
