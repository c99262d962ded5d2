//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures to reduce duplication across test files.

use std::sync::Once;

use crate::geo::Coord;
use crate::spatial::{Region, TazIndex};
use crate::stats::{DemandStatisticsStore, StatsEntry, TimeBinConfig};

/// A standard H3 cell (resolution 10) used by H3-backed tests.
pub const TEST_CELL: u64 = 0x8a1fb46622dffff;

/// Spacing in degrees of longitude between zones of [`test_zone_row`] (~1.1 km at the equator).
pub const ZONE_SPACING_DEG: f64 = 0.01;

/// Install a `tracing` subscriber once, honouring `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Centroid of zone `i` of [`test_zone_row`].
pub fn zone_centroid(i: usize) -> Coord {
    Coord::new(0.0, i as f64 * ZONE_SPACING_DEG)
}

/// `count` zones named `Z0`, `Z1`, ... laid out on the equator, west to east.
pub fn test_zone_row(count: usize) -> TazIndex {
    TazIndex::new((0..count).map(|i| Region::new(format!("Z{i}"), zone_centroid(i), 1.0e6)))
}

/// Time bin configuration with `bins` bins of ten minutes.
pub fn ten_minute_bins(bins: usize) -> TimeBinConfig {
    TimeBinConfig::new(600, bins).expect("test bin config should be valid")
}

/// Slots holding only waiting-time sums; `None` marks an absent bin.
pub fn waiting_slots(values: &[Option<f64>]) -> Vec<Option<StatsEntry>> {
    values
        .iter()
        .map(|value| value.map(StatsEntry::with_waiting_time))
        .collect()
}

/// Store built from `(region, waiting-time slots)` pairs.
///
/// # Panics
///
/// Panics if a region's slot count differs from `config`.
pub fn store_from_waiting(
    config: TimeBinConfig,
    regions: &[(&str, &[Option<f64>])],
) -> DemandStatisticsStore {
    DemandStatisticsStore::from_regions(
        config,
        regions
            .iter()
            .map(|(id, values)| (id.to_string(), waiting_slots(values))),
    )
    .expect("test store should match its bin config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::SpatialIndex;

    #[test]
    fn zone_row_resolves_centroids_to_their_zone() {
        let index = test_zone_row(4);
        for i in 0..4 {
            assert_eq!(index.region_containing(zone_centroid(i)), Some(format!("Z{i}")));
        }
    }

    #[test]
    fn store_from_waiting_keeps_absent_bins() {
        let store = store_from_waiting(ten_minute_bins(2), &[("R1", &[Some(3.0), None])]);
        assert_eq!(store.lookup("R1", 0).map(|e| e.sum_of_waiting_times), Some(3.0));
        assert!(store.lookup("R1", 1).is_none());
    }
}
