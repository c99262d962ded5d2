//! Performance benchmarks for reposition_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reposition_core::assigner::RepositioningAssigner;
use reposition_core::config::RepositioningConfig;
use reposition_core::geo::Coord;
use reposition_core::grouping::VehicleLocation;
use reposition_core::idling::IdlingCandidateSelector;
use reposition_core::spatial::TazIndex;
use reposition_core::stats::{
    merge_all, DemandStatisticsBuilder, DemandStatisticsStore, TimeBinConfig,
};
use reposition_core::test_helpers::{test_zone_row, ZONE_SPACING_DEG};

const ZONES: usize = 200;

fn random_stats(seed: u64) -> DemandStatisticsStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = DemandStatisticsBuilder::new(TimeBinConfig::default());
    for _ in 0..20_000 {
        let zone = rng.gen_range(0..ZONES);
        let time = rng.gen_range(0..86_400);
        builder.record_request(&format!("Z{zone}"), time, rng.gen_range(0.0..900.0));
    }
    builder.build()
}

fn random_vehicles(seed: u64, count: usize) -> Vec<VehicleLocation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lng = rng.gen_range(0.0..ZONES as f64 * ZONE_SPACING_DEG);
            VehicleLocation::new(format!("V{i}"), Coord::new(0.0, lng))
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_all");
    for replicas in [2usize, 8, 32] {
        let stores: Vec<DemandStatisticsStore> = (0..replicas as u64).map(random_stats).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(replicas),
            &stores,
            |b, stores| {
                b.iter(|| black_box(merge_all(stores.clone())));
            },
        );
    }
    group.finish();
}

fn bench_decision_cycle(c: &mut Criterion) {
    let index: TazIndex = test_zone_row(ZONES);
    let stats = random_stats(7);
    let config = RepositioningConfig::default().with_radius_m(3_000.0);

    let mut group = c.benchmark_group("decision_cycle");
    for vehicles in [100usize, 1_000] {
        let fleet = random_vehicles(11, vehicles);
        group.bench_with_input(BenchmarkId::new("assign", vehicles), &fleet, |b, fleet| {
            let assigner = RepositioningAssigner::new(&index, &stats, config);
            b.iter(|| black_box(assigner.assign(fleet, 3_600)));
        });
        group.bench_with_input(BenchmarkId::new("select_idle", vehicles), &fleet, |b, fleet| {
            let selector = IdlingCandidateSelector::new(&index, &stats, config.horizon_end_rule);
            b.iter(|| {
                black_box(selector.select(
                    fleet,
                    config.max_idle_candidates,
                    3_600,
                    config.horizon_secs,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge, bench_decision_cycle);
criterion_main!(benches);
