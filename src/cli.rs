use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_AMOUNT;

/// tierfee: tiered fee calculator.
#[derive(Parser, Debug)]
#[command(name = "tierfee", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the annual and daily fee with a per-tier breakdown
    Calculate(CalculateArgs),

    /// Print a tier schedule, optionally after adding or removing a tier
    Schedule(ScheduleArgs),
}

/// Where the tier schedule comes from. Shared by both subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleSource {
    /// Tier thresholds (absolute upper bounds, or tier sizes with --increments)
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub thresholds: Option<Vec<String>>,

    /// Tier rates in percent; one more than thresholds, the last is the remainder rate
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub rates: Option<Vec<String>>,

    /// Read thresholds as "first" and "next" tier sizes instead of absolute bounds
    #[arg(long)]
    pub increments: bool,

    /// JSON schedule file ({"thresholds": [...], "rates": [...]})
    #[arg(long)]
    pub schedule: Option<PathBuf>,
}

/// Arguments for the `calculate` subcommand.
#[derive(Parser, Debug)]
pub struct CalculateArgs {
    /// Amount to charge fees on
    #[arg(long, default_value_t = DEFAULT_AMOUNT, allow_hyphen_values = true)]
    pub amount: f64,

    #[command(flatten)]
    pub source: ScheduleSource,

    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `schedule` subcommand.
#[derive(Parser, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub source: ScheduleSource,

    /// Append a tier 1000000 above the highest threshold with a 0% rate
    #[arg(long)]
    pub add_tier: bool,

    /// Remove the tier at this index (the first tier cannot be removed)
    #[arg(long)]
    pub remove_tier: Option<usize>,

    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_defaults() {
        let cli = Cli::parse_from(["tierfee", "calculate"]);
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Calculate(args) => {
                assert_eq!(args.amount, DEFAULT_AMOUNT);
                assert!(args.source.thresholds.is_none());
                assert!(args.source.rates.is_none());
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_comma_separated_lists() {
        let cli = Cli::parse_from([
            "tierfee",
            "calculate",
            "--amount",
            "500000",
            "--thresholds",
            "2000000,3000000",
            "--rates",
            "1.25,1.00,0.75",
            "--json",
        ]);
        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.amount, 500_000.0);
        assert_eq!(
            args.source.thresholds.unwrap(),
            vec!["2000000".to_string(), "3000000".to_string()]
        );
        assert_eq!(args.source.rates.unwrap().len(), 3);
        assert!(args.json);
    }

    #[test]
    fn test_empty_thresholds_for_remainder_only() {
        let cli = Cli::parse_from(["tierfee", "calculate", "--thresholds", "--rates", "2"]);
        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.source.thresholds, Some(vec![]));
        assert_eq!(args.source.rates, Some(vec!["2".to_string()]));
    }

    #[test]
    fn test_schedule_edit_flags() {
        let cli = Cli::parse_from([
            "tierfee",
            "--log-level",
            "debug",
            "schedule",
            "--add-tier",
            "--remove-tier",
            "1",
        ]);
        assert_eq!(cli.log_level, "debug");
        let Command::Schedule(args) = cli.command else {
            panic!("expected schedule");
        };
        assert!(args.add_tier);
        assert_eq!(args.remove_tier, Some(1));
    }
}
