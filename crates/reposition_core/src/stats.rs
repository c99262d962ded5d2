//! Demand statistics: per-region, per-time-bin aggregates of ride-hail demand.
//!
//! This module provides:
//!
//! - **TimeBinConfig**: the fixed-width time discretization a store is keyed by
//! - **StatsEntry**: one (region, bin) aggregate
//! - **DemandStatisticsStore**: immutable snapshot of every region's bins
//! - **DemandStatisticsBuilder**: accumulates raw observations into a store
//! - **merge / merge_all**: reconcile stores produced by parallel replicas
//!
//! A store is built once per simulation iteration, read during that iteration's
//! repositioning decisions and then merged with other replicas to seed the next one.

mod builder;
mod entry;
mod merge;
#[cfg(feature = "persist")]
mod persist;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

pub use builder::DemandStatisticsBuilder;
pub use entry::StatsEntry;
pub use merge::merge_all;
pub use store::DemandStatisticsStore;

/// Default bin width: 5 minutes.
pub const DEFAULT_TIME_BIN_SIZE_SECS: u64 = 5 * 60;
/// Default bin count: one simulated day of 5-minute bins.
pub const DEFAULT_NUMBER_OF_TIME_BINS: usize = 288;

/// Time discretization shared by a store for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeBinConfig")]
pub struct TimeBinConfig {
    time_bin_size_secs: u64,
    number_of_time_bins: usize,
}

/// Unchecked serde form of [`TimeBinConfig`].
#[derive(Deserialize)]
struct RawTimeBinConfig {
    time_bin_size_secs: u64,
    number_of_time_bins: usize,
}

impl TryFrom<RawTimeBinConfig> for TimeBinConfig {
    type Error = StatsError;

    fn try_from(raw: RawTimeBinConfig) -> Result<Self, Self::Error> {
        Self::new(raw.time_bin_size_secs, raw.number_of_time_bins)
    }
}

impl TimeBinConfig {
    pub fn new(time_bin_size_secs: u64, number_of_time_bins: usize) -> Result<Self, StatsError> {
        if time_bin_size_secs == 0 {
            return Err(StatsError::InvalidTimeBinConfig(
                "time bin size must be positive".to_string(),
            ));
        }
        if number_of_time_bins == 0 {
            return Err(StatsError::InvalidTimeBinConfig(
                "number of time bins must be positive".to_string(),
            ));
        }
        Ok(Self {
            time_bin_size_secs,
            number_of_time_bins,
        })
    }

    pub fn time_bin_size_secs(&self) -> u64 {
        self.time_bin_size_secs
    }

    pub fn number_of_time_bins(&self) -> usize {
        self.number_of_time_bins
    }

    /// `floor(seconds / time_bin_size_secs)`. May exceed the last valid bin.
    pub fn time_bin(&self, seconds: u64) -> usize {
        (seconds / self.time_bin_size_secs) as usize
    }

    pub fn last_bin(&self) -> usize {
        self.number_of_time_bins - 1
    }
}

impl Default for TimeBinConfig {
    fn default() -> Self {
        Self {
            time_bin_size_secs: DEFAULT_TIME_BIN_SIZE_SECS,
            number_of_time_bins: DEFAULT_NUMBER_OF_TIME_BINS,
        }
    }
}

impl fmt::Display for TimeBinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bins of {}s",
            self.number_of_time_bins, self.time_bin_size_secs
        )
    }
}
