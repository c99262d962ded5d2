//! Merge statistics from three replicas and run one repositioning cycle.
//!
//! Run with: cargo run -p reposition_core --example replica_cycle

use reposition_core::assigner::RepositioningAssigner;
use reposition_core::config::RepositioningConfig;
use reposition_core::grouping::VehicleLocation;
use reposition_core::idling::IdlingCandidateSelector;
use reposition_core::resource::DemandStatisticsHandle;
use reposition_core::stats::{merge_all, DemandStatisticsBuilder, TimeBinConfig};
use reposition_core::test_helpers::{init_tracing, test_zone_row, zone_centroid};

fn main() {
    const ZONES: usize = 8;
    const REPLICAS: u64 = 3;

    init_tracing();
    let index = test_zone_row(ZONES);
    let config = TimeBinConfig::default();

    let replicas = (0..REPLICAS)
        .map(|replica| {
            let mut builder = DemandStatisticsBuilder::new(config);
            for zone in 0..ZONES {
                let waiting = ((zone as u64 * 37 + replica * 11) % 240) as f64;
                builder.record_request(&format!("Z{zone}"), 600 + replica * 60, waiting);
            }
            builder.build()
        })
        .collect();
    let merged = match merge_all(replicas) {
        Ok(Some(store)) => store,
        Ok(None) => return,
        Err(err) => {
            eprintln!("merge failed: {err}");
            return;
        }
    };
    let handle = DemandStatisticsHandle::new(merged);

    let cfg = RepositioningConfig::default()
        .with_radius_m(2_500.0)
        .with_max_idle_candidates(4);
    let idle: Vec<VehicleLocation> = (0..ZONES)
        .flat_map(|zone| {
            (0..2).map(move |i| {
                VehicleLocation::new(format!("veh-{zone}-{i}"), zone_centroid(zone))
            })
        })
        .collect();

    let selector = IdlingCandidateSelector::new(&index, &handle, cfg.horizon_end_rule);
    let selected: Vec<VehicleLocation> = selector
        .select(&idle, cfg.max_idle_candidates, 0, cfg.horizon_secs)
        .into_iter()
        .map(|candidate| candidate.candidate)
        .collect();

    let assigner = RepositioningAssigner::new(&index, &handle, cfg);
    println!("--- Repositioning cycle ({REPLICAS} replicas, {ZONES} zones) ---");
    for assignment in assigner.assign(&selected, 0) {
        println!(
            "{:>10} -> {} ({:.4}, {:.4})",
            assignment.vehicle_id,
            assignment.region,
            assignment.destination.lat,
            assignment.destination.lng
        );
    }
}
