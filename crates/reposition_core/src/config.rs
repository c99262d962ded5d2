use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::scoring::HorizonEndRule;

/// Default search radius around a vehicle group's region: 5 km.
const DEFAULT_RADIUS_M: f64 = 5_000.0;

/// Default look-ahead window: 30 minutes.
const DEFAULT_HORIZON_SECS: u64 = 30 * 60;

/// Default per-cycle bound on idle vehicles considered for repositioning.
const DEFAULT_MAX_IDLE_CANDIDATES: usize = 20;

/// Repositioning decision parameters, shared by the assigner and the idle selector.
#[derive(Debug, Clone, Copy, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositioningConfig {
    /// Radius (meters) around a group's region centroid searched for destinations.
    pub radius_m: f64,
    /// Length of the demand look-ahead window in seconds.
    pub horizon_secs: u64,
    /// How the horizon's last bin is derived from tick and duration.
    pub horizon_end_rule: HorizonEndRule,
    /// Maximum idle vehicles selected per decision cycle.
    pub max_idle_candidates: usize,
}

impl Default for RepositioningConfig {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            horizon_secs: DEFAULT_HORIZON_SECS,
            horizon_end_rule: HorizonEndRule::default(),
            max_idle_candidates: DEFAULT_MAX_IDLE_CANDIDATES,
        }
    }
}

impl RepositioningConfig {
    pub fn with_radius_m(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }

    pub fn with_horizon_secs(mut self, horizon_secs: u64) -> Self {
        self.horizon_secs = horizon_secs;
        self
    }

    pub fn with_horizon_end_rule(mut self, rule: HorizonEndRule) -> Self {
        self.horizon_end_rule = rule;
        self
    }

    pub fn with_max_idle_candidates(mut self, max_idle_candidates: usize) -> Self {
        self.max_idle_candidates = max_idle_candidates;
        self
    }
}
