use crate::grouping::VehicleLocation;
use crate::ranking::{rank_top_n, ScoredCandidate};
use crate::scoring::{HorizonEndRule, RepositioningScorer};
use crate::spatial::SpatialIndex;
use crate::stats::DemandStatisticsStore;

/// Picks the idle vehicles most worth repositioning this cycle.
///
/// A vehicle's score is the demand score of its own current region over the
/// horizon; vehicles outside the index's coverage score 0.
pub struct IdlingCandidateSelector<'a, S: SpatialIndex + ?Sized> {
    index: &'a S,
    scorer: RepositioningScorer<'a>,
    horizon_end_rule: HorizonEndRule,
}

impl<'a, S: SpatialIndex + ?Sized> IdlingCandidateSelector<'a, S> {
    pub fn new(
        index: &'a S,
        stats: &'a DemandStatisticsStore,
        horizon_end_rule: HorizonEndRule,
    ) -> Self {
        Self {
            index,
            scorer: RepositioningScorer::new(stats),
            horizon_end_rule,
        }
    }

    /// Score every idle vehicle and return the best `max_count`, highest first.
    ///
    /// Equal scores are ordered by vehicle id.
    pub fn select(
        &self,
        idle: &[VehicleLocation],
        max_count: usize,
        tick_secs: u64,
        horizon_secs: u64,
    ) -> Vec<ScoredCandidate<VehicleLocation>> {
        let horizon = self
            .scorer
            .horizon(tick_secs, horizon_secs, self.horizon_end_rule);
        let scored = idle
            .iter()
            .map(|vehicle| {
                let score = self
                    .index
                    .region_containing(vehicle.coord)
                    .map_or(0.0, |region| self.scorer.score_horizon(&region, &horizon));
                ScoredCandidate::new(vehicle.clone(), score)
            })
            .collect();
        let selected = rank_top_n(scored, max_count, |vehicle: &VehicleLocation| {
            vehicle.id.as_str()
        });
        tracing::debug!(
            tick_secs,
            idle = idle.len(),
            selected = selected.len(),
            "idle candidates selected"
        );
        selected
    }
}
