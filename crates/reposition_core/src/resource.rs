use std::sync::Arc;

use bevy_ecs::prelude::Resource;

use crate::stats::DemandStatisticsStore;

/// The statistics snapshot decision cycles read from.
///
/// A fully merged store is installed with [`swap`](Self::swap) between cycles, so a
/// cycle holding a snapshot never sees a partially merged one.
#[derive(Debug, Clone, Resource)]
pub struct DemandStatisticsHandle(Arc<DemandStatisticsStore>);

impl DemandStatisticsHandle {
    pub fn new(store: DemandStatisticsStore) -> Self {
        Self(Arc::new(store))
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<DemandStatisticsStore> {
        Arc::clone(&self.0)
    }

    /// Install `store` and return the snapshot it replaces.
    pub fn swap(&mut self, store: DemandStatisticsStore) -> Arc<DemandStatisticsStore> {
        std::mem::replace(&mut self.0, Arc::new(store))
    }
}

impl std::ops::Deref for DemandStatisticsHandle {
    type Target = DemandStatisticsStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::World;

    use super::*;
    use crate::stats::{DemandStatisticsBuilder, TimeBinConfig};

    #[test]
    fn swap_keeps_outstanding_snapshots_intact() {
        let config = TimeBinConfig::new(60, 2).expect("config");
        let mut first = DemandStatisticsBuilder::new(config);
        first.record_request("R1", 0, 10.0);
        let mut second = DemandStatisticsBuilder::new(config);
        second.record_request("R2", 0, 20.0);

        let mut world = World::new();
        world.insert_resource(DemandStatisticsHandle::new(first.build()));
        let held = world.resource::<DemandStatisticsHandle>().snapshot();

        let previous = world
            .resource_mut::<DemandStatisticsHandle>()
            .swap(second.build());

        assert!(held.contains_region("R1"));
        assert!(previous.contains_region("R1"));
        let current = world.resource::<DemandStatisticsHandle>();
        assert!(current.contains_region("R2"));
        assert!(!current.contains_region("R1"));
    }
}
