//! Tiered fee calculation.
//!
//! An amount is split into bands by ascending thresholds; each band's share
//! of the amount is charged at that band's percentage rate. The band above
//! the highest threshold takes the last rate.
//!
//! ```
//! use tiers::{allocate, daily_fee};
//!
//! let alloc = allocate(10_000_000.0, &[2_000_000.0, 3_000_000.0], &[1.25, 1.00, 0.75]).unwrap();
//! assert_eq!(alloc.bands.len(), 3);
//! assert!((alloc.total_fee - 87_500.0).abs() < 1e-6);
//! assert!((daily_fee(alloc.total_fee) - 239.73).abs() < 0.01);
//! ```

pub mod calculator;
pub mod error;
pub mod report;
pub mod schedule;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

pub use calculator::{allocate, allocate_raw};
pub use error::{Result, TierError};
pub use report::{daily_fee, DAYS_PER_YEAR};
pub use schedule::TierSchedule;

pub use types::{Breakdown, BreakdownRow, FeeAllocation, SummaryRow, TierResult};
