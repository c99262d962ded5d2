//! Byte encoding of a store for handing statistics between iterations or replicas.
//!
//! Where the bytes go (disk, object storage, a message) is up to the caller.

use super::DemandStatisticsStore;
use crate::error::StatsError;

impl DemandStatisticsStore {
    pub fn to_bytes(&self) -> Result<Vec<u8>, StatsError> {
        bincode::serialize(self).map_err(|err| StatsError::Codec(err.to_string()))
    }

    /// Decode a store; the one-slot-per-bin invariant is checked while decoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StatsError> {
        bincode::deserialize(bytes).map_err(|err| StatsError::Codec(err.to_string()))
    }
}
