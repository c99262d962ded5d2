use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{StatsEntry, TimeBinConfig};
use crate::error::StatsError;
use crate::spatial::RegionId;

/// Immutable snapshot of per-region, per-time-bin demand aggregates.
///
/// Every region holds exactly `number_of_time_bins` slots. Regions are kept in
/// id order so iteration, merges and serialization are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStore")]
pub struct DemandStatisticsStore {
    config: TimeBinConfig,
    regions: BTreeMap<RegionId, Vec<Option<StatsEntry>>>,
}

/// Unchecked serde form of [`DemandStatisticsStore`].
#[derive(Deserialize)]
struct RawStore {
    config: TimeBinConfig,
    regions: BTreeMap<RegionId, Vec<Option<StatsEntry>>>,
}

impl TryFrom<RawStore> for DemandStatisticsStore {
    type Error = StatsError;

    fn try_from(raw: RawStore) -> Result<Self, Self::Error> {
        Self::from_regions(raw.config, raw.regions)
    }
}

impl DemandStatisticsStore {
    /// Store with no regions.
    pub fn empty(config: TimeBinConfig) -> Self {
        Self {
            config,
            regions: BTreeMap::new(),
        }
    }

    /// Build a store from raw region slots, checking every region has one slot per bin.
    ///
    /// A region id given twice keeps its last slots.
    pub fn from_regions<I>(config: TimeBinConfig, regions: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = (RegionId, Vec<Option<StatsEntry>>)>,
    {
        let mut validated = BTreeMap::new();
        for (region, slots) in regions {
            if slots.len() != config.number_of_time_bins() {
                return Err(StatsError::SlotCountMismatch {
                    region,
                    expected: config.number_of_time_bins(),
                    actual: slots.len(),
                });
            }
            validated.insert(region, slots);
        }
        Ok(Self::from_validated(config, validated))
    }

    pub(crate) fn from_validated(
        config: TimeBinConfig,
        regions: BTreeMap<RegionId, Vec<Option<StatsEntry>>>,
    ) -> Self {
        debug_assert!(regions
            .values()
            .all(|slots| slots.len() == config.number_of_time_bins()));
        Self { config, regions }
    }

    pub fn config(&self) -> TimeBinConfig {
        self.config
    }

    pub fn time_bin_size_secs(&self) -> u64 {
        self.config.time_bin_size_secs()
    }

    pub fn number_of_time_bins(&self) -> usize {
        self.config.number_of_time_bins()
    }

    pub fn time_bin(&self, seconds: u64) -> usize {
        self.config.time_bin(seconds)
    }

    /// Entry for `region` at `time_bin`, or `None` when the region is unknown or the
    /// slot is empty.
    ///
    /// # Panics
    ///
    /// Panics if `time_bin` is not in `0..number_of_time_bins`.
    pub fn lookup(&self, region: &str, time_bin: usize) -> Option<&StatsEntry> {
        assert!(
            time_bin < self.config.number_of_time_bins(),
            "time bin {time_bin} out of range 0..{}",
            self.config.number_of_time_bins()
        );
        self.regions.get(region)?[time_bin].as_ref()
    }

    /// All slots of one region.
    pub fn slots(&self, region: &str) -> Option<&[Option<StatsEntry>]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    /// Region ids in ascending order.
    pub fn region_ids(&self) -> impl Iterator<Item = &RegionId> {
        self.regions.keys()
    }

    /// `(region, slots)` pairs in ascending region order.
    pub fn regions(&self) -> impl Iterator<Item = (&RegionId, &[Option<StatsEntry>])> {
        self.regions
            .iter()
            .map(|(region, slots)| (region, slots.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Compare two stores field by field allowing `tolerance` of floating point drift.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        if self.config != other.config || self.regions.len() != other.regions.len() {
            return false;
        }
        self.regions
            .iter()
            .zip(other.regions.iter())
            .all(|((left_id, left), (right_id, right))| {
                left_id == right_id
                    && left.iter().zip(right.iter()).all(|pair| match pair {
                        (Some(a), Some(b)) => entries_close(a, b, tolerance),
                        (None, None) => true,
                        _ => false,
                    })
            })
    }
}

fn entries_close(a: &StatsEntry, b: &StatsEntry, tolerance: f64) -> bool {
    (a.sum_of_requested_rides - b.sum_of_requested_rides).abs() <= tolerance
        && (a.sum_of_waiting_times - b.sum_of_waiting_times).abs() <= tolerance
        && (a.sum_of_idling_vehicles - b.sum_of_idling_vehicles).abs() <= tolerance
}
