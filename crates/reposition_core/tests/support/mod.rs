#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reposition_core::stats::{DemandStatisticsStore, StatsEntry, TimeBinConfig};

/// Random store for property checks: each region/bin slot is filled with probability `fill`.
pub fn random_store(
    seed: u64,
    config: TimeBinConfig,
    regions: &[&str],
    fill: f64,
) -> DemandStatisticsStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let regions: Vec<(String, Vec<Option<StatsEntry>>)> = regions
        .iter()
        .map(|region| {
            let slots = (0..config.number_of_time_bins())
                .map(|_| {
                    rng.gen_bool(fill).then(|| {
                        StatsEntry::new(
                            rng.gen_range(0..20) as f64,
                            rng.gen_range(0.0..5_000.0),
                            rng.gen_range(0..10) as f64,
                        )
                    })
                })
                .collect();
            (region.to_string(), slots)
        })
        .collect();
    DemandStatisticsStore::from_regions(config, regions).expect("random store should be valid")
}

/// Store where replica `replica` owns only the bins `b` with `b % replicas == replica`.
pub fn striped_store(
    config: TimeBinConfig,
    regions: &[&str],
    replica: usize,
    replicas: usize,
) -> DemandStatisticsStore {
    let regions: Vec<(String, Vec<Option<StatsEntry>>)> = regions
        .iter()
        .enumerate()
        .map(|(r, region)| {
            let slots = (0..config.number_of_time_bins())
                .map(|bin| {
                    (bin % replicas == replica).then(|| {
                        StatsEntry::new(1.0, (r * 100 + bin) as f64 + 0.25, replica as f64)
                    })
                })
                .collect();
            (region.to_string(), slots)
        })
        .collect();
    DemandStatisticsStore::from_regions(config, regions).expect("striped store should be valid")
}
