//! Demand scoring of regions over a time horizon.

use serde::{Deserialize, Serialize};

use crate::stats::{DemandStatisticsStore, TimeBinConfig};

/// How the last bin of a horizon is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizonEndRule {
    /// `end = floor(duration / bin_size)`, independent of the tick.
    ///
    /// Matches the historical behaviour; for ticks later than the horizon duration
    /// this yields an empty horizon.
    #[default]
    DurationOnly,
    /// `end = floor(tick / bin_size) + floor(duration / bin_size)`.
    TickPlusDuration,
}

/// Inclusive bin range `[start_bin, end_bin]`, already clamped to the store's bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    start_bin: usize,
    end_bin: usize,
    empty: bool,
}

impl Horizon {
    pub fn new(
        config: TimeBinConfig,
        tick_secs: u64,
        duration_secs: u64,
        rule: HorizonEndRule,
    ) -> Self {
        let start_bin = config.time_bin(tick_secs);
        let duration_bins = config.time_bin(duration_secs);
        let raw_end = match rule {
            HorizonEndRule::DurationOnly => duration_bins,
            HorizonEndRule::TickPlusDuration => start_bin.saturating_add(duration_bins),
        };
        let end_bin = raw_end.min(config.last_bin());
        Self {
            start_bin,
            end_bin,
            empty: start_bin > end_bin,
        }
    }

    pub fn start_bin(&self) -> usize {
        self.start_bin
    }

    pub fn end_bin(&self) -> usize {
        self.end_bin
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Bins covered, `0` for an empty horizon.
    pub fn len(&self) -> usize {
        if self.empty {
            0
        } else {
            self.end_bin - self.start_bin + 1
        }
    }
}

/// Scores regions by their summed waiting times in a statistics snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RepositioningScorer<'a> {
    stats: &'a DemandStatisticsStore,
}

impl<'a> RepositioningScorer<'a> {
    pub fn new(stats: &'a DemandStatisticsStore) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &'a DemandStatisticsStore {
        self.stats
    }

    /// Sum of `sum_of_waiting_times` over `[start_bin, end_bin_inclusive]`.
    ///
    /// Absent bins and unknown regions contribute 0, as does an empty range.
    ///
    /// # Panics
    ///
    /// Panics if a bin in a non-empty range is past the store's last bin.
    pub fn score_region(&self, region: &str, start_bin: usize, end_bin_inclusive: usize) -> f64 {
        if start_bin > end_bin_inclusive {
            return 0.0;
        }
        (start_bin..=end_bin_inclusive)
            .filter_map(|bin| self.stats.lookup(region, bin))
            .map(|entry| entry.sum_of_waiting_times)
            .sum()
    }

    pub fn score_horizon(&self, region: &str, horizon: &Horizon) -> f64 {
        if horizon.is_empty() {
            return 0.0;
        }
        self.score_region(region, horizon.start_bin(), horizon.end_bin())
    }

    /// Horizon for `tick_secs` built against this snapshot's bin configuration.
    pub fn horizon(&self, tick_secs: u64, duration_secs: u64, rule: HorizonEndRule) -> Horizon {
        Horizon::new(self.stats.config(), tick_secs, duration_secs, rule)
    }
}
