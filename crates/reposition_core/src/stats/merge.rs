//! Reconciliation of demand statistics computed by independent replicas.
//!
//! `merge` is a pure combinator: it never touches its inputs and is commutative,
//! so replicas can hand their stores over threads, processes or messages and
//! combine them in any pairing. `merge_all` reduces many stores with a fixed
//! balanced pairing so that repeated runs over the same input list agree bit for bit.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::{DemandStatisticsStore, StatsEntry};
use crate::error::StatsError;

fn merge_slot(left: Option<&StatsEntry>, right: Option<&StatsEntry>) -> Option<StatsEntry> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a.average(b)),
        (Some(a), None) => Some(*a),
        (None, Some(b)) => Some(*b),
        (None, None) => None,
    }
}

impl DemandStatisticsStore {
    /// Combine two stores into a new one.
    ///
    /// Per (region, bin): both present are averaged, a single present entry is
    /// copied, and a slot absent on both sides stays absent.
    pub fn merge(&self, other: &Self) -> Result<Self, StatsError> {
        if self.config() != other.config() {
            return Err(StatsError::ConfigMismatch {
                left: self.config(),
                right: other.config(),
            });
        }

        let mut merged = BTreeMap::new();
        for (region, slots) in self.regions() {
            let combined = match other.slots(region) {
                Some(other_slots) => slots
                    .iter()
                    .zip(other_slots.iter())
                    .map(|(a, b)| merge_slot(a.as_ref(), b.as_ref()))
                    .collect(),
                None => slots.to_vec(),
            };
            merged.insert(region.clone(), combined);
        }
        for (region, slots) in other.regions() {
            if !self.contains_region(region) {
                merged.insert(region.clone(), slots.to_vec());
            }
        }

        Ok(Self::from_validated(self.config(), merged))
    }
}

/// Reduce any number of replica stores into one.
///
/// Stores are merged pairwise level by level (`0+1`, `2+3`, ...), each level in
/// parallel. Returns `Ok(None)` for an empty input.
pub fn merge_all(
    stores: Vec<DemandStatisticsStore>,
) -> Result<Option<DemandStatisticsStore>, StatsError> {
    if let Some(first) = stores.first() {
        let expected = first.config();
        if let Some(mismatched) = stores.iter().find(|store| store.config() != expected) {
            return Err(StatsError::ConfigMismatch {
                left: expected,
                right: mismatched.config(),
            });
        }
    }

    let replicas = stores.len();
    let mut level = stores;
    while level.len() > 1 {
        level = level
            .par_chunks(2)
            .map(|pair| match pair {
                [left, right] => left.merge(right),
                _ => Ok(pair[0].clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;
    }

    let merged = level.pop();
    tracing::debug!(
        replicas,
        regions = merged.as_ref().map_or(0, DemandStatisticsStore::len),
        "replica statistics merged"
    );
    Ok(merged)
}
