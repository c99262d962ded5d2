//! Ride-hail repositioning decision engine.
//!
//! Given time-binned, per-region demand statistics, this crate decides which idle
//! vehicles should be relocated and where to, ahead of the next simulated window.
//! Every decision is a pure function of an immutable statistics snapshot and the
//! vehicle positions supplied for one cycle; moving the vehicles is up to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use reposition_core::assigner::RepositioningAssigner;
//! use reposition_core::config::RepositioningConfig;
//! use reposition_core::geo::Coord;
//! use reposition_core::grouping::VehicleLocation;
//! use reposition_core::spatial::H3RegionIndex;
//! use reposition_core::stats::{DemandStatisticsBuilder, TimeBinConfig};
//!
//! let index = H3RegionIndex::default();
//! let mut builder = DemandStatisticsBuilder::new(TimeBinConfig::default());
//! builder.record_request("891f1d48177ffff", 120, 95.0);
//! let stats = builder.build();
//!
//! let assigner = RepositioningAssigner::new(&index, &stats, RepositioningConfig::default());
//! let vehicles = vec![VehicleLocation::new("veh-1", Coord::new(52.52, 13.405))];
//! for assignment in assigner.assign(&vehicles, 0) {
//!     println!("{} -> {}", assignment.vehicle_id, assignment.region);
//! }
//! ```
//!
//! # Architecture
//!
//! - [`stats`]: demand statistics store, builder and replica merge
//! - [`scoring`]: region demand score over a time horizon
//! - [`spatial`]: spatial index contract plus TAZ and H3 implementations
//! - [`grouping`]: vehicles partitioned by region
//! - [`assigner`]: vehicle groups matched to top-scoring nearby regions
//! - [`idling`]: bounded, ranked selection of idle vehicles
//! - [`ranking`]: deterministic top-N used by both decisions
//! - [`resource`]: ECS resource holding the current snapshot

pub mod assigner;
pub mod config;
pub mod error;
pub mod geo;
pub mod grouping;
pub mod idling;
pub mod ranking;
pub mod resource;
pub mod scoring;
pub mod spatial;
pub mod stats;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
