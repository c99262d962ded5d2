//! Vehicle-group to destination-region assignment.
//!
//! For every occupied region the nearby regions are ranked by their demand score
//! over the look-ahead horizon, and the group's vehicles are paired one-to-one with
//! the best of them. When a group holds more vehicles than there are candidate
//! regions, the surplus vehicles stay where they are.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::RepositioningConfig;
use crate::geo::Coord;
use crate::grouping::{group_by_region, VehicleId, VehicleLocation};
use crate::ranking::{rank_top_n, ScoredCandidate};
use crate::scoring::{Horizon, RepositioningScorer};
use crate::spatial::{Region, RegionId, SpatialIndex};
use crate::stats::DemandStatisticsStore;

/// One vehicle sent toward the centroid of a destination region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositioningAssignment {
    pub vehicle_id: VehicleId,
    pub region: RegionId,
    pub destination: Coord,
}

pub struct RepositioningAssigner<'a, S: SpatialIndex + ?Sized> {
    index: &'a S,
    scorer: RepositioningScorer<'a>,
    config: RepositioningConfig,
}

impl<'a, S: SpatialIndex + ?Sized> RepositioningAssigner<'a, S> {
    pub fn new(
        index: &'a S,
        stats: &'a DemandStatisticsStore,
        config: RepositioningConfig,
    ) -> Self {
        Self {
            index,
            scorer: RepositioningScorer::new(stats),
            config,
        }
    }

    pub fn horizon(&self, tick_secs: u64) -> Horizon {
        self.scorer.horizon(
            tick_secs,
            self.config.horizon_secs,
            self.config.horizon_end_rule,
        )
    }

    /// Group `vehicles` by region and assign each group its best nearby regions.
    pub fn assign(
        &self,
        vehicles: &[VehicleLocation],
        tick_secs: u64,
    ) -> Vec<RepositioningAssignment> {
        let groups = group_by_region(self.index, vehicles);
        self.assign_groups(&groups, tick_secs)
    }

    /// Assign pre-grouped vehicles. Groups are visited in region-id order.
    pub fn assign_groups(
        &self,
        groups: &BTreeMap<RegionId, Vec<VehicleId>>,
        tick_secs: u64,
    ) -> Vec<RepositioningAssignment> {
        let horizon = self.horizon(tick_secs);
        let mut assignments = Vec::new();
        let mut unassigned = 0usize;

        for (region, vehicles) in groups {
            if vehicles.is_empty() {
                continue;
            }
            let Some(origin) = self.index.region(region) else {
                tracing::warn!(region = %region, "group region unknown to spatial index");
                unassigned += vehicles.len();
                continue;
            };
            let destinations = self.rank_destinations(&origin, &horizon, vehicles.len());
            tracing::trace!(
                region = %region,
                vehicles = vehicles.len(),
                destinations = destinations.len(),
                "group ranked"
            );
            unassigned += vehicles.len() - destinations.len();
            assignments.extend(vehicles.iter().zip(destinations).map(
                |(vehicle_id, destination)| RepositioningAssignment {
                    vehicle_id: vehicle_id.clone(),
                    region: destination.candidate.id,
                    destination: destination.candidate.centroid,
                },
            ));
        }

        tracing::debug!(
            tick_secs,
            groups = groups.len(),
            assigned = assignments.len(),
            unassigned,
            "repositioning cycle"
        );
        assignments
    }

    /// Regions within the configured radius of `origin`, best first, at most `limit`.
    pub fn rank_destinations(
        &self,
        origin: &Region,
        horizon: &Horizon,
        limit: usize,
    ) -> Vec<ScoredCandidate<Region>> {
        let candidates = self
            .index
            .regions_within_radius(origin.centroid, self.config.radius_m)
            .into_iter()
            .filter_map(|id| self.index.region(&id))
            .map(|region| {
                let score = self.scorer.score_horizon(&region.id, horizon);
                ScoredCandidate::new(region, score)
            })
            .collect();
        rank_top_n(candidates, limit, |region: &Region| region.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::HorizonEndRule;
    use crate::spatial::TazIndex;
    use crate::stats::{StatsEntry, TimeBinConfig};

    fn index() -> TazIndex {
        TazIndex::new([
            Region::new("A", Coord::new(0.0, 0.0), 1.0),
            Region::new("B", Coord::new(0.0, 0.01), 1.0),
            Region::new("C", Coord::new(0.0, 0.02), 1.0),
            Region::new("FAR", Coord::new(0.0, 1.0), 1.0),
        ])
    }

    fn stats(scores: &[(&str, f64)]) -> DemandStatisticsStore {
        let config = TimeBinConfig::new(600, 2).expect("config");
        DemandStatisticsStore::from_regions(
            config,
            scores.iter().map(|(id, score)| {
                (
                    id.to_string(),
                    vec![Some(StatsEntry::with_waiting_time(*score)), None],
                )
            }),
        )
        .expect("store")
    }

    fn config(radius_m: f64) -> RepositioningConfig {
        RepositioningConfig::default()
            .with_radius_m(radius_m)
            .with_horizon_secs(600)
            .with_horizon_end_rule(HorizonEndRule::DurationOnly)
    }

    #[test]
    fn group_is_zipped_with_best_regions_in_rank_order() {
        let index = index();
        let stats = stats(&[("A", 1.0), ("B", 9.0), ("C", 5.0), ("FAR", 100.0)]);
        let assigner = RepositioningAssigner::new(&index, &stats, config(3_000.0));
        let vehicles = vec![
            VehicleLocation::new("v2", Coord::new(0.0, 0.0)),
            VehicleLocation::new("v1", Coord::new(0.0, 0.0)),
        ];

        let assignments = assigner.assign(&vehicles, 0);
        let pairs: Vec<(&str, &str)> = assignments
            .iter()
            .map(|a| (a.vehicle_id.as_str(), a.region.as_str()))
            .collect();
        assert_eq!(pairs, vec![("v2", "B"), ("v1", "C")]);
        assert_eq!(assignments[0].destination, Coord::new(0.0, 0.01));
    }

    #[test]
    fn surplus_vehicles_stay_unassigned() {
        let index = index();
        let stats = stats(&[]);
        // Only A itself lies within 500 m of A.
        let assigner = RepositioningAssigner::new(&index, &stats, config(500.0));
        let vehicles = vec![
            VehicleLocation::new("v1", Coord::new(0.0, 0.0)),
            VehicleLocation::new("v2", Coord::new(0.0, 0.0)),
        ];

        let assignments = assigner.assign(&vehicles, 0);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].vehicle_id, "v1");
        assert_eq!(assignments[0].region, "A");
    }

    #[test]
    fn equal_scores_fall_back_to_region_id() {
        let index = index();
        let stats = stats(&[("A", 2.0), ("B", 2.0), ("C", 2.0)]);
        let assigner = RepositioningAssigner::new(&index, &stats, config(3_000.0));
        let origin = index.region("C").expect("C");
        let ranked = assigner.rank_destinations(&origin, &assigner.horizon(0), 3);
        let ids: Vec<&str> = ranked.iter().map(|c| c.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn no_vehicles_no_assignments() {
        let index = index();
        let stats = stats(&[("A", 1.0)]);
        let assigner = RepositioningAssigner::new(&index, &stats, config(3_000.0));
        assert!(assigner.assign(&[], 0).is_empty());
    }
}
