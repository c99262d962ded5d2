use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coord;
use crate::spatial::{RegionId, SpatialIndex};

pub type VehicleId = String;

/// Where a vehicle is at the start of a decision cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLocation {
    pub id: VehicleId,
    pub coord: Coord,
}

impl VehicleLocation {
    pub fn new(id: impl Into<VehicleId>, coord: Coord) -> Self {
        Self {
            id: id.into(),
            coord,
        }
    }
}

/// Partition vehicles by the region containing them.
///
/// Groups are keyed in region-id order and keep the input order of their vehicles.
/// Vehicles outside the index's coverage are left out.
pub fn group_by_region<S>(
    index: &S,
    vehicles: &[VehicleLocation],
) -> BTreeMap<RegionId, Vec<VehicleId>>
where
    S: SpatialIndex + ?Sized,
{
    let mut groups: BTreeMap<RegionId, Vec<VehicleId>> = BTreeMap::new();
    for vehicle in vehicles {
        match index.region_containing(vehicle.coord) {
            Some(region) => groups.entry(region).or_default().push(vehicle.id.clone()),
            None => {
                tracing::warn!(
                    vehicle = %vehicle.id,
                    lat = vehicle.coord.lat,
                    lng = vehicle.coord.lng,
                    "vehicle outside spatial index coverage"
                );
            }
        }
    }
    groups
}
