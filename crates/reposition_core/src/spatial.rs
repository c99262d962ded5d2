//! Spatial queries over regions (TAZs): point-to-region and regions-in-radius.
//!
//! This module provides:
//!
//! - **SpatialIndex**: the query contract the repositioning engine consumes
//! - **TazIndex**: explicit zones, resolved by nearest centroid
//! - **H3RegionIndex**: H3 cells as regions, with an LRU cache of grid disks
//!
//! Radius queries return regions sorted by id so that every caller sees the same
//! candidate order for the same input.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Mutex;

use h3o::{CellIndex, LatLng, Resolution};
use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::geo::Coord;

pub type RegionId = String;

/// A traffic analysis zone: identifier, centroid and area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub centroid: Coord,
    pub area_m2: f64,
}

impl Region {
    pub fn new(id: impl Into<RegionId>, centroid: Coord, area_m2: f64) -> Self {
        Self {
            id: id.into(),
            centroid,
            area_m2,
        }
    }
}

/// Query contract for locating regions.
pub trait SpatialIndex: Send + Sync {
    /// Region containing `coord`, or `None` when the point is outside coverage.
    fn region_containing(&self, coord: Coord) -> Option<RegionId>;

    /// Every region within `radius_m` meters of `coord`, in a stable order.
    fn regions_within_radius(&self, coord: Coord, radius_m: f64) -> Vec<RegionId>;

    /// Region details by id.
    fn region(&self, id: &str) -> Option<Region>;
}

/// Index over an explicit list of zones.
///
/// A point belongs to the zone with the nearest centroid (ties go to the smaller id);
/// radius queries compare centroid distances.
#[derive(Debug, Clone, Default)]
pub struct TazIndex {
    regions: Vec<Region>,
    by_id: HashMap<RegionId, usize>,
}

impl TazIndex {
    /// Build an index. Duplicate ids keep the first zone given.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let mut regions: Vec<Region> = regions.into_iter().collect();
        regions.sort_by(|a, b| a.id.cmp(&b.id));
        regions.dedup_by(|later, earlier| later.id == earlier.id);
        let by_id = regions
            .iter()
            .enumerate()
            .map(|(idx, region)| (region.id.clone(), idx))
            .collect();
        Self { regions, by_id }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl SpatialIndex for TazIndex {
    fn region_containing(&self, coord: Coord) -> Option<RegionId> {
        self.regions
            .iter()
            .min_by(|a, b| {
                a.centroid
                    .distance_m(&coord)
                    .total_cmp(&b.centroid.distance_m(&coord))
            })
            .map(|region| region.id.clone())
    }

    fn regions_within_radius(&self, coord: Coord, radius_m: f64) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|region| region.centroid.distance_m(&coord) <= radius_m)
            .map(|region| region.id.clone())
            .collect()
    }

    fn region(&self, id: &str) -> Option<Region> {
        self.by_id.get(id).map(|&idx| self.regions[idx].clone())
    }
}

/// Largest grid disk expanded for a radius query.
const MAX_GRID_DISK_K: u32 = 64;

/// Shrinks the per-ring distance to cover cell distortion across a large disk.
const RING_STEP_SLACK: f64 = 0.9;

/// Regions are H3 cells at a fixed resolution; a region id is the cell's hex string.
pub struct H3RegionIndex {
    resolution: Resolution,
    grid_disks: Mutex<LruCache<(CellIndex, u32), Vec<CellIndex>>>,
}

impl H3RegionIndex {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            grid_disks: Mutex::new(LruCache::new(
                NonZeroUsize::new(1_000).expect("cache size must be non-zero"),
            )),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn cell_at(&self, coord: Coord) -> Option<CellIndex> {
        LatLng::new(coord.lat, coord.lng)
            .ok()
            .map(|ll| ll.to_cell(self.resolution))
    }

    /// Ring count whose disk covers every cell centroid within `radius_m` of a point
    /// inside `origin`.
    ///
    /// The closest cells of ring `k` sit `k * spacing * sqrt(3) / 2` from the origin
    /// centroid. Spacing is measured on the origin's own neighbours since cells shrink
    /// away from icosahedron face centres; the extra ring absorbs the offset of the
    /// query point within its cell.
    fn disk_k_for_radius(&self, origin: CellIndex, radius_m: f64) -> u32 {
        let origin_centroid = Coord::from(LatLng::from(origin));
        let spacing_m = origin
            .grid_disk::<Vec<_>>(1)
            .into_iter()
            .filter(|cell| *cell != origin)
            .map(|cell| Coord::from(LatLng::from(cell)).distance_m(&origin_centroid))
            .fold(f64::INFINITY, f64::min);
        let spacing_m = if spacing_m.is_finite() && spacing_m > 0.0 {
            spacing_m
        } else {
            self.resolution.edge_length_m() * 3f64.sqrt()
        };
        let ring_step_m = spacing_m * 3f64.sqrt() / 2.0 * RING_STEP_SLACK;
        let rings = (radius_m.max(0.0) / ring_step_m).ceil();
        if rings >= MAX_GRID_DISK_K as f64 {
            tracing::warn!(radius_m, "radius query clamped to {MAX_GRID_DISK_K} rings");
            return MAX_GRID_DISK_K;
        }
        (rings as u32 + 1).min(MAX_GRID_DISK_K)
    }

    fn grid_disk(&self, origin: CellIndex, k: u32) -> Vec<CellIndex> {
        let mut cache = match self.grid_disks.lock() {
            Ok(guard) => guard,
            Err(_) => return origin.grid_disk::<Vec<_>>(k),
        };
        cache
            .get_or_insert((origin, k), || origin.grid_disk::<Vec<_>>(k))
            .clone()
    }
}

impl Default for H3RegionIndex {
    fn default() -> Self {
        Self::new(Resolution::Nine)
    }
}

impl std::fmt::Debug for H3RegionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("H3RegionIndex")
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

impl SpatialIndex for H3RegionIndex {
    fn region_containing(&self, coord: Coord) -> Option<RegionId> {
        self.cell_at(coord).map(|cell| cell.to_string())
    }

    fn regions_within_radius(&self, coord: Coord, radius_m: f64) -> Vec<RegionId> {
        let Some(origin) = self.cell_at(coord) else {
            return Vec::new();
        };
        let k = self.disk_k_for_radius(origin, radius_m);
        let mut regions: Vec<RegionId> = self
            .grid_disk(origin, k)
            .into_iter()
            .filter(|cell| Coord::from(LatLng::from(*cell)).distance_m(&coord) <= radius_m)
            .map(|cell| cell.to_string())
            .collect();
        regions.sort_unstable();
        regions
    }

    fn region(&self, id: &str) -> Option<Region> {
        let cell = CellIndex::from_str(id).ok()?;
        if cell.resolution() != self.resolution {
            return None;
        }
        Some(Region {
            id: id.to_string(),
            centroid: LatLng::from(cell).into(),
            area_m2: cell.area_m2(),
        })
    }
}
