use std::collections::BTreeMap;

use super::{DemandStatisticsStore, StatsEntry, TimeBinConfig};
use crate::spatial::RegionId;

/// Accumulates raw demand observations for one iteration into a store.
#[derive(Debug, Clone)]
pub struct DemandStatisticsBuilder {
    config: TimeBinConfig,
    regions: BTreeMap<RegionId, Vec<Option<StatsEntry>>>,
    dropped: usize,
}

impl DemandStatisticsBuilder {
    pub fn new(config: TimeBinConfig) -> Self {
        Self {
            config,
            regions: BTreeMap::new(),
            dropped: 0,
        }
    }

    /// Add `entry` to the bin containing `time_secs`.
    ///
    /// Observations past the last bin are dropped; returns whether it was recorded.
    pub fn record(&mut self, region: &str, time_secs: u64, entry: StatsEntry) -> bool {
        let bin = self.config.time_bin(time_secs);
        if bin >= self.config.number_of_time_bins() {
            self.dropped += 1;
            tracing::debug!(region, time_secs, bin, "observation past last time bin dropped");
            return false;
        }
        let bins = self.config.number_of_time_bins();
        let slots = self
            .regions
            .entry(region.to_string())
            .or_insert_with(|| vec![None; bins]);
        let slot = &mut slots[bin];
        *slot = Some(slot.map_or(entry, |existing| existing.aggregate(&entry)));
        true
    }

    /// One served request that waited `waiting_time_secs` for pickup.
    pub fn record_request(&mut self, region: &str, time_secs: u64, waiting_time_secs: f64) -> bool {
        self.record(
            region,
            time_secs,
            StatsEntry::new(1.0, waiting_time_secs, 0.0),
        )
    }

    /// One vehicle observed idling.
    pub fn record_idle_vehicle(&mut self, region: &str, time_secs: u64) -> bool {
        self.record(region, time_secs, StatsEntry::new(0.0, 0.0, 1.0))
    }

    /// Number of observations dropped for falling outside the bin range.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn build(self) -> DemandStatisticsStore {
        tracing::debug!(
            regions = self.regions.len(),
            dropped = self.dropped,
            "demand statistics built"
        );
        DemandStatisticsStore::from_validated(self.config, self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observations_in_same_bin_are_summed() {
        let config = TimeBinConfig::new(60, 10).expect("config");
        let mut builder = DemandStatisticsBuilder::new(config);
        assert!(builder.record_request("R1", 10, 30.0));
        assert!(builder.record_request("R1", 59, 45.0));
        assert!(builder.record_idle_vehicle("R1", 61));
        let store = builder.build();

        let first = store.lookup("R1", 0).expect("bin 0");
        assert_eq!(first.sum_of_requested_rides, 2.0);
        assert_eq!(first.sum_of_waiting_times, 75.0);
        let second = store.lookup("R1", 1).expect("bin 1");
        assert_eq!(second.sum_of_idling_vehicles, 1.0);
        assert!(store.lookup("R1", 2).is_none());
        assert_eq!(store.slots("R1").map(<[_]>::len), Some(10));
    }

    #[test]
    fn observations_past_horizon_are_dropped() {
        let config = TimeBinConfig::new(60, 2).expect("config");
        let mut builder = DemandStatisticsBuilder::new(config);
        assert!(!builder.record_request("R1", 120, 10.0));
        assert_eq!(builder.dropped(), 1);
        assert!(builder.build().is_empty());
    }
}
